//! User-supplied generation options.
//!
//! [`ResourceGenerationOptions`] is the immutable input to one generation
//! attempt: created per submission, read by the prompt builders and the
//! normalizer, and discarded after use.

use serde::{Deserialize, Serialize};

/// Default number of problems/questions per resource.
const fn default_item_count() -> usize {
    5
}

/// Subjects the pipeline can generate content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Mathematics worksheets and quizzes.
    Math,
    /// Reading passages with comprehension questions.
    Reading,
    /// Science content, optionally experiment-based.
    Science,
    /// Subject-agnostic content (handled generically, outside the
    /// format-handler registry).
    General,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Math => "math",
            Self::Reading => "reading",
            Self::Science => "science",
            Self::General => "general",
        };
        write!(f, "{s}")
    }
}

/// The kind of resource being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// A student-facing practice worksheet.
    Worksheet,
    /// A scored quiz with answer options.
    Quiz,
    /// A grading rubric with criteria and levels.
    Rubric,
    /// A short end-of-lesson check.
    ExitSlip,
    /// A structured lesson plan.
    LessonPlan,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Worksheet => "worksheet",
            Self::Quiz => "quiz",
            Self::Rubric => "rubric",
            Self::ExitSlip => "exit_slip",
            Self::LessonPlan => "lesson_plan",
        };
        write!(f, "{s}")
    }
}

/// Requested difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easier than the band baseline.
    Easy,
    /// The band baseline (default).
    #[default]
    Medium,
    /// Harder than the band baseline.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

/// Subject-specific content layout variant.
///
/// The (subject, format) pair determines which handler in the registry
/// applies. The set is closed: adding a format means adding a registry
/// entry, which the exhaustive matches enforce at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Plain numbered problems (math, science).
    Standard,
    /// Problems with worked steps and hints (math).
    Guided,
    /// Passage plus comprehension questions (reading).
    Comprehension,
    /// Passage with vocabulary scaffolding (reading).
    GuidedReading,
    /// Hands-on experiment write-up (science).
    Experiment,
}

impl Format {
    /// The default format for a subject when the caller does not pick one.
    #[must_use]
    pub const fn default_for(subject: Subject) -> Self {
        match subject {
            Subject::Reading => Self::Comprehension,
            Subject::Math | Subject::Science | Subject::General => Self::Standard,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Guided => "guided",
            Self::Comprehension => "comprehension",
            Self::GuidedReading => "guided_reading",
            Self::Experiment => "experiment",
        };
        write!(f, "{s}")
    }
}

/// Scoring style for rubric generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubricStyle {
    /// Numeric 1-4 performance levels (default).
    #[default]
    Numeric,
    /// Binary met/not-met levels scored "\u{2713}" / "\u{d7}".
    Checklist,
}

/// User-supplied request for one generation attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGenerationOptions {
    /// The subject to generate content for.
    pub subject: Subject,

    /// Free-form grade string ("K", "3rd", "Grade 7"); normalized by the
    /// banding logic rather than validated here.
    pub grade_level: String,

    /// The kind of resource to produce.
    pub resource_type: ResourceType,

    /// The topic the content should cover.
    pub topic_area: String,

    /// Requested difficulty tier.
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Optional visual theme, echoed into the response metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Decoration emoji for the rendered page. When absent the subject's
    /// default set applies, unless the LLM supplies its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Vec<String>>,

    /// Exact number of problems/questions to request from the LLM.
    #[serde(
        default = "default_item_count",
        alias = "numberOfProblems",
        alias = "numberOfQuestions"
    )]
    pub item_count: usize,

    /// Content layout variant; defaults per subject when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    /// Extra instructions appended to the prompt verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,

    /// Ask the LLM to describe a visual aid per item.
    #[serde(default)]
    pub include_visuals: bool,

    /// Science only: request experiment-shaped items.
    #[serde(default)]
    pub include_experiments: bool,

    /// Reading only: request a vocabulary list alongside the passage.
    #[serde(default)]
    pub include_vocabulary: bool,

    /// Rubric only: scoring style.
    #[serde(default)]
    pub rubric_style: RubricStyle,
}

impl ResourceGenerationOptions {
    /// The effective format for this request (explicit or subject default).
    #[must_use]
    pub fn effective_format(&self) -> Format {
        self.format.unwrap_or_else(|| Format::default_for(self.subject))
    }
}
