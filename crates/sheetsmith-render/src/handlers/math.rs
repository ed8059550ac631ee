//! Math worksheet handlers.

use serde_json::Value;
use sheetsmith_core::{Result, ResourceGenerationOptions, WorksheetResource};

use super::{base_transform, problems_fragment, FormatHandler};
use crate::html::escape;

/// Hint supplied when the LLM omits one for a guided problem.
const DEFAULT_GUIDED_HINT: &str = "Break the problem into smaller steps.";

/// Plain numbered math problems.
#[derive(Debug)]
pub struct StandardMathHandler;

impl FormatHandler for StandardMathHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        let mut resource = base_transform(raw, options)?;
        // Standard layout shows no scaffolding, whatever the LLM sent.
        for problem in &mut resource.problems {
            problem.hints.clear();
        }
        Ok(resource)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        header_fragment(resource) + &problems_fragment(resource, false)
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        header_fragment(resource) + &problems_fragment(resource, false)
    }
}

/// Math problems with worked steps and hints.
#[derive(Debug)]
pub struct GuidedMathHandler;

impl FormatHandler for GuidedMathHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        let mut resource = base_transform(raw, options)?;
        for problem in &mut resource.problems {
            if problem.hints.is_empty() {
                problem.hints.push(DEFAULT_GUIDED_HINT.to_string());
            }
        }
        Ok(resource)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        header_fragment(resource) + &problems_fragment(resource, true)
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        let mut html = header_fragment(resource);
        html.push_str(&problems_fragment(resource, true));
        // Printable guided sheets include the worked steps after the
        // problem list so students can check their approach.
        let mut steps_html = String::new();
        for (index, problem) in resource.problems.iter().enumerate() {
            if problem.steps.is_empty() {
                continue;
            }
            steps_html.push_str(&format!(
                "<div class=\"worked-steps\"><h4>Problem {}</h4><ol>",
                index + 1
            ));
            for step in &problem.steps {
                steps_html.push_str(&format!("<li>{}</li>", escape(step)));
            }
            steps_html.push_str("</ol></div>\n");
        }
        if !steps_html.is_empty() {
            html.push_str("<section class=\"steps\"><h3>Worked Steps</h3>");
            html.push_str(&steps_html);
            html.push_str("</section>\n");
        }
        html
    }
}

/// Title and instructions block shared by the worksheet layouts.
pub(crate) fn header_fragment(resource: &WorksheetResource) -> String {
    format!(
        "<h2>{}</h2>\n<p class=\"instructions\">{}</p>\n",
        escape(&resource.title),
        escape(&resource.instructions)
    )
}
