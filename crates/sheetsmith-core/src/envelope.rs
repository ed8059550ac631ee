//! The rendering envelope.
//!
//! [`GeneratedResource`] is the terminal, render-ready artifact handed to
//! the renderers and returned over the wire. Section payloads stay typed
//! in memory; the wire convention of JSON-encoding non-text payloads into
//! the section's `content` string (which existing renderers re-parse) is
//! applied only at serialization time, by the custom [`Serialize`] impl on
//! [`Section`].

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::options::{Difficulty, ResourceType, Subject};

/// The section types existing renderers know how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A reading passage (plain text).
    Passage,
    /// Vocabulary terms (JSON-encoded).
    Vocabulary,
    /// Questions (JSON-encoded).
    Questions,
    /// Worksheet problems (JSON-encoded).
    Problems,
    /// A rubric's criteria (JSON-encoded).
    Rubric,
    /// Free text.
    Text,
}

impl SectionKind {
    /// The `type` string written to the wire.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Passage => "passage",
            Self::Vocabulary => "vocabulary",
            Self::Questions => "questions",
            Self::Problems => "problems",
            Self::Rubric => "rubric",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// A section's payload, kept typed until serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPayload {
    /// Plain text, written to the wire as-is.
    Text(String),
    /// Structured data, JSON-encoded into the `content` string on the wire.
    Data(serde_json::Value),
}

/// One named, typed chunk of the rendering envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Which renderer-known section type this is.
    pub kind: SectionKind,
    /// Optional display title.
    pub title: Option<String>,
    /// The payload.
    pub payload: SectionPayload,
}

impl Section {
    /// Creates a plain-text section.
    #[must_use]
    pub fn text(kind: SectionKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            payload: SectionPayload::Text(content.into()),
        }
    }

    /// Creates a structured-data section from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the value cannot be represented as JSON.
    pub fn data(
        kind: SectionKind,
        title: Option<&str>,
        value: &impl Serialize,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            title: title.map(ToString::to_string),
            payload: SectionPayload::Data(serde_json::to_value(value)?),
        })
    }

    /// Adds a display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let field_count = if self.title.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Section", field_count)?;
        state.serialize_field("type", self.kind.wire_name())?;
        if let Some(title) = &self.title {
            state.serialize_field("title", title)?;
        }
        match &self.payload {
            SectionPayload::Text(text) => state.serialize_field("content", text)?,
            SectionPayload::Data(value) => {
                let encoded =
                    serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
                state.serialize_field("content", &encoded)?;
            }
        }
        state.end()
    }
}

/// Request metadata carried alongside the rendered content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    /// The grade string as the user supplied it.
    pub grade_level: String,
    /// The subject the content covers.
    pub subject: Subject,
    /// The kind of resource generated.
    pub resource_type: ResourceType,
    /// When generation completed (ISO-8601 on the wire).
    pub generated_at: DateTime<Utc>,
    /// The visual theme, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// The requested difficulty tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// The terminal, render-ready artifact.
///
/// Never decoded back into a typed [`crate::resource::Resource`]; each
/// render pass reads it fresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResource {
    /// Display title.
    pub title: String,
    /// Free-text summary/instructions shown above the sections.
    pub content: String,
    /// Request metadata.
    pub metadata: ResourceMetadata,
    /// The ordered sections.
    pub sections: Vec<Section>,
    /// Theme emoji decorating the rendered page.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorations: Vec<String>,
}

/// The default decoration set for a subject.
///
/// Used when neither the LLM nor the caller supplied decorations.
#[must_use]
pub fn default_decorations(subject: Subject) -> Vec<String> {
    let emoji: &[&str] = match subject {
        Subject::Math => &["\u{1f522}", "\u{270f}\u{fe0f}", "\u{1f4d0}", "\u{2797}"],
        Subject::Reading => &["\u{1f4da}", "\u{1f524}", "\u{270f}\u{fe0f}", "\u{1f4d6}"],
        Subject::Science => &["\u{1f52c}", "\u{1f9ea}", "\u{1f331}", "\u{2697}\u{fe0f}"],
        Subject::General => &["\u{2b50}", "\u{1f4dd}", "\u{270f}\u{fe0f}", "\u{1f3a8}"],
    };
    emoji.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn metadata() -> ResourceMetadata {
        ResourceMetadata {
            grade_level: "5".to_string(),
            subject: Subject::Math,
            resource_type: ResourceType::Worksheet,
            generated_at: "2026-03-01T09:30:00Z".parse().unwrap(),
            theme: None,
            difficulty: Some(Difficulty::Medium),
        }
    }

    #[test]
    fn test_text_section_content_is_plain() {
        let section = Section::text(SectionKind::Passage, "Once upon a time.");
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "passage");
        assert_eq!(json["content"], "Once upon a time.");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_data_section_content_is_json_encoded_string() {
        let questions = vec![serde_json::json!({"question": "Q1", "options": ["Yes", "No"]})];
        let section = Section::data(SectionKind::Questions, Some("Questions"), &questions)
            .unwrap();
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["type"], "questions");
        assert_eq!(json["title"], "Questions");

        // The wire content is a string that itself parses as JSON.
        let content = json["content"].as_str().unwrap();
        let decoded: serde_json::Value = serde_json::from_str(content).unwrap();
        assert_eq!(decoded[0]["question"], "Q1");
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = GeneratedResource {
            title: "Arithmetic Practice".to_string(),
            content: "Solve each problem.".to_string(),
            metadata: metadata(),
            sections: vec![Section::data(
                SectionKind::Problems,
                None,
                &vec![serde_json::json!({"question": "2+2"})],
            )
            .unwrap()],
            decorations: default_decorations(Subject::Math),
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["metadata"]["gradeLevel"], "5");
        assert_eq!(json["metadata"]["subject"], "math");
        assert_eq!(json["metadata"]["resourceType"], "worksheet");
        assert_eq!(json["metadata"]["generatedAt"], "2026-03-01T09:30:00Z");
        assert!(json["sections"][0]["content"].is_string());
        assert_eq!(json["decorations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_empty_decorations_omitted() {
        let envelope = GeneratedResource {
            title: "T".to_string(),
            content: String::new(),
            metadata: metadata(),
            sections: Vec::new(),
            decorations: Vec::new(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("decorations").is_none());
    }

    #[test]
    fn test_default_decorations_per_subject() {
        assert_eq!(default_decorations(Subject::Math).len(), 4);
        assert_ne!(
            default_decorations(Subject::Math),
            default_decorations(Subject::Science)
        );
    }
}
