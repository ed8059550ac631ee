//! Per-subject format handlers.
//!
//! Each handler owns the three operations bound to one (subject, format)
//! pair: `transform` (raw LLM JSON to canonical resource), `preview`
//! (resource to screen HTML fragment), and `generate_pdf` (resource to
//! printable HTML fragment). Transforms default every optional field so
//! rendering never encounters a missing required one, and contain no
//! timestamps or randomness: transforming the same input twice yields
//! structurally identical resources.

pub mod math;
pub mod reading;
pub mod science;

use serde_json::Value;
use sheetsmith_core::{
    GenerationResult, Problem, RawItem, Result, ResourceGenerationOptions, ResourceType,
    WorksheetResource,
};

use crate::html::escape;

/// The capability triple bound to one (subject, format) pair.
pub trait FormatHandler: Send + Sync + std::fmt::Debug {
    /// Transforms a raw LLM payload into the canonical worksheet shape.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the payload cannot be parsed into the
    /// expected result shape.
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource>;

    /// Renders the resource as an HTML fragment for on-screen preview.
    fn preview(&self, resource: &WorksheetResource) -> String;

    /// Renders the resource as a printable HTML fragment.
    fn generate_pdf(&self, resource: &WorksheetResource) -> String;
}

/// Parses the raw payload and builds the worksheet skeleton shared by all
/// handlers; each handler then applies its format-specific defaults. Also
/// used directly for the general subject, which has no registered handler.
pub fn base_transform(
    raw: &Value,
    options: &ResourceGenerationOptions,
) -> Result<WorksheetResource> {
    let result: GenerationResult = serde_json::from_value(raw.clone())?;

    let title = if result.title.trim().is_empty() {
        format!("{} Worksheet", capitalize(&options.topic_area))
    } else {
        result.title
    };

    Ok(WorksheetResource {
        resource_type: ResourceType::Worksheet,
        title,
        subject: options.subject,
        grade_level: options.grade_level.clone(),
        format: options.effective_format(),
        instructions: result
            .instructions
            .unwrap_or_else(|| "Complete each item below.".to_string()),
        problems: result.problems.iter().map(problem_from_raw).collect(),
        passage: result.passage.filter(|p| !p.trim().is_empty()),
        vocabulary: result.vocabulary,
    })
}

/// Converts one raw item into a fully-defaulted problem.
pub(crate) fn problem_from_raw(item: &RawItem) -> Problem {
    let answer = item
        .answer
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "(answer not provided)".to_string());
    let explanation = item
        .explanation
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("The answer is {answer}."));

    Problem {
        question: item.question.clone(),
        answer,
        explanation,
        options: item.options.clone(),
        steps: item.steps.clone(),
        hints: item.hints.clone(),
        visual: item.visual.clone(),
    }
}

/// Uppercases the first character, for defaulted titles.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// The numbered problem list shared by the math and science layouts.
pub(crate) fn problems_fragment(resource: &WorksheetResource, show_steps: bool) -> String {
    let mut html = String::new();
    for (index, problem) in resource.problems.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"problem\"><span class=\"number\">{}.</span> <span class=\"question\">{}</span>",
            index + 1,
            escape(&problem.question)
        ));
        if !problem.options.is_empty() {
            html.push_str("<ul class=\"options\">");
            for option in &problem.options {
                html.push_str(&format!("<li>{}</li>", escape(option)));
            }
            html.push_str("</ul>");
        }
        if let Some(visual) = &problem.visual {
            html.push_str(&format!(
                "<p class=\"visual\">[Visual: {}]</p>",
                escape(visual)
            ));
        }
        if show_steps && !problem.hints.is_empty() {
            html.push_str("<ul class=\"hints\">");
            for hint in &problem.hints {
                html.push_str(&format!("<li>Hint: {}</li>", escape(hint)));
            }
            html.push_str("</ul>");
        }
        html.push_str("<div class=\"work-space\"></div></div>\n");
    }
    html
}
