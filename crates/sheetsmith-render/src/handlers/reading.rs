//! Reading worksheet handlers.
//!
//! Both reading layouts render the passage before the questions. The
//! guided layout additionally scaffolds each question with a hint and
//! renders the vocabulary list between passage and questions.

use serde_json::Value;
use sheetsmith_core::{Result, ResourceGenerationOptions, WorksheetResource};

use super::{base_transform, math::header_fragment, problems_fragment, FormatHandler};
use crate::html::escape;

/// Hint supplied when the LLM omits one for a guided reading question.
const DEFAULT_READING_HINT: &str = "Look back at the passage for the answer.";

/// Passage plus comprehension questions.
#[derive(Debug)]
pub struct ComprehensionHandler;

impl FormatHandler for ComprehensionHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        base_transform(raw, options)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        let mut html = header_fragment(resource);
        html.push_str(&passage_fragment(resource));
        html.push_str(&problems_fragment(resource, false));
        html
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        self.preview(resource)
    }
}

/// Passage with vocabulary scaffolding and hinted questions.
#[derive(Debug)]
pub struct GuidedReadingHandler;

impl FormatHandler for GuidedReadingHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        let mut resource = base_transform(raw, options)?;
        for problem in &mut resource.problems {
            if problem.hints.is_empty() {
                problem.hints.push(DEFAULT_READING_HINT.to_string());
            }
        }
        Ok(resource)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        let mut html = header_fragment(resource);
        html.push_str(&passage_fragment(resource));
        html.push_str(&vocabulary_fragment(resource));
        html.push_str(&problems_fragment(resource, true));
        html
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        self.preview(resource)
    }
}

/// Paragraph-split passage block, empty when there is no passage.
fn passage_fragment(resource: &WorksheetResource) -> String {
    resource.passage.as_ref().map_or_else(String::new, |passage| {
        let mut html = String::from("<section class=\"passage\">");
        for paragraph in passage.split("\n\n").filter(|p| !p.trim().is_empty()) {
            html.push_str(&format!("<p>{}</p>", escape(paragraph.trim())));
        }
        html.push_str("</section>\n");
        html
    })
}

/// Vocabulary list block, empty when there are no terms.
fn vocabulary_fragment(resource: &WorksheetResource) -> String {
    if resource.vocabulary.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section class=\"vocabulary\"><h3>Key Words</h3><dl>");
    for term in &resource.vocabulary {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape(&term.word),
            escape(&term.definition)
        ));
    }
    html.push_str("</dl></section>\n");
    html
}
