//! Grade string normalization and banding.
//!
//! Grade levels arrive as free-form strings from the UI ("K",
//! "Kindergarten", "3rd", "Grade 7", "12"). This module normalizes them to
//! a numeric grade and buckets them into one of four coarse bands that
//! drive difficulty defaults and prompt guidance.

use serde::{Deserialize, Serialize};

/// Numeric grade used for Kindergarten.
pub const KINDERGARTEN: u8 = 0;

/// Highest supported numeric grade.
pub const MAX_GRADE: u8 = 12;

/// One of the four coarse grade buckets driving difficulty defaults.
///
/// Unparseable or out-of-range grade strings fall back to
/// [`GradeBand::UpperElementary`], the middle band, so a bad grade string
/// degrades to reasonable defaults instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    /// Kindergarten through grade 2.
    EarlyElementary,
    /// Grades 3 through 5.
    UpperElementary,
    /// Grades 6 through 8.
    MiddleSchool,
    /// Grades 9 through 12.
    HighSchool,
}

impl GradeBand {
    /// Buckets a grade string into a band.
    ///
    /// Always returns a band; unparseable input defaults to
    /// `UpperElementary`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetsmith_core::grade::GradeBand;
    ///
    /// assert_eq!(GradeBand::parse("K"), GradeBand::EarlyElementary);
    /// assert_eq!(GradeBand::parse("3rd"), GradeBand::UpperElementary);
    /// assert_eq!(GradeBand::parse("12"), GradeBand::HighSchool);
    /// assert_eq!(GradeBand::parse("gibberish"), GradeBand::UpperElementary);
    /// ```
    #[must_use]
    pub fn parse(grade: &str) -> Self {
        parse_grade(grade).map_or(Self::UpperElementary, Self::from_grade)
    }

    /// Buckets a numeric grade (0 = Kindergarten) into a band.
    #[must_use]
    pub const fn from_grade(grade: u8) -> Self {
        match grade {
            0..=2 => Self::EarlyElementary,
            3..=5 => Self::UpperElementary,
            6..=8 => Self::MiddleSchool,
            _ => Self::HighSchool,
        }
    }

    /// A human-readable label used in prompt text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::EarlyElementary => "early elementary (K-2)",
            Self::UpperElementary => "upper elementary (3-5)",
            Self::MiddleSchool => "middle school (6-8)",
            Self::HighSchool => "high school (9-12)",
        }
    }
}

impl std::fmt::Display for GradeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EarlyElementary => "early_elementary",
            Self::UpperElementary => "upper_elementary",
            Self::MiddleSchool => "middle_school",
            Self::HighSchool => "high_school",
        };
        write!(f, "{s}")
    }
}

/// Normalizes a grade string to a numeric grade (0 = Kindergarten).
///
/// Handles "K", "Kindergarten", bare numbers ("7"), ordinals ("3rd",
/// "1st"), and a "Grade " prefix, case-insensitively. Returns `None` for
/// unparseable or out-of-range (> 12) input.
#[must_use]
pub fn parse_grade(grade: &str) -> Option<u8> {
    let normalized = grade.trim().to_lowercase();

    if normalized == "k" || normalized == "kindergarten" {
        return Some(KINDERGARTEN);
    }

    let stripped = normalized
        .strip_prefix("grade")
        .map_or(normalized.as_str(), str::trim_start);

    // Ordinal suffixes: 1st, 2nd, 3rd, 4th...
    let digits: String = stripped.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = &stripped[digits.len()..];
    if !matches!(rest, "" | "st" | "nd" | "rd" | "th") {
        return None;
    }

    match digits.parse::<u8>() {
        Ok(n) if (1..=MAX_GRADE).contains(&n) => Some(n),
        _ => None,
    }
}

/// Returns `true` if the grade string denotes Kindergarten.
///
/// Kindergarten gets special-cased difficulty parameters, prompt guidance,
/// and lenient response validation on top of the early-elementary band.
#[must_use]
pub fn is_kindergarten(grade: &str) -> bool {
    parse_grade(grade) == Some(KINDERGARTEN)
}
