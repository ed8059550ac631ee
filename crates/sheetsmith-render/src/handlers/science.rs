//! Science worksheet handlers.

use serde_json::Value;
use sheetsmith_core::{Result, ResourceGenerationOptions, WorksheetResource};

use super::{base_transform, math::header_fragment, problems_fragment, FormatHandler};
use crate::html::escape;

/// Plain numbered science questions.
#[derive(Debug)]
pub struct StandardScienceHandler;

impl FormatHandler for StandardScienceHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        base_transform(raw, options)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        header_fragment(resource) + &problems_fragment(resource, false)
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        self.preview(resource)
    }
}

/// Hands-on experiment write-ups with a procedure per item.
#[derive(Debug)]
pub struct ExperimentHandler;

impl FormatHandler for ExperimentHandler {
    fn transform(
        &self,
        raw: &Value,
        options: &ResourceGenerationOptions,
    ) -> Result<WorksheetResource> {
        let mut resource = base_transform(raw, options)?;
        for problem in &mut resource.problems {
            if problem.steps.is_empty() {
                problem
                    .steps
                    .push("Observe carefully and record what you see.".to_string());
            }
        }
        Ok(resource)
    }

    fn preview(&self, resource: &WorksheetResource) -> String {
        let mut html = header_fragment(resource);
        for (index, problem) in resource.problems.iter().enumerate() {
            html.push_str(&format!(
                "<div class=\"experiment\"><h3>Experiment {}: {}</h3>",
                index + 1,
                escape(&problem.question)
            ));
            if let Some(visual) = &problem.visual {
                html.push_str(&format!(
                    "<p class=\"visual\">[Visual: {}]</p>",
                    escape(visual)
                ));
            }
            html.push_str("<h4>Procedure</h4><ol>");
            for step in &problem.steps {
                html.push_str(&format!("<li>{}</li>", escape(step)));
            }
            html.push_str("</ol>");
            html.push_str(
                "<h4>What did you observe?</h4><div class=\"work-space\"></div></div>\n",
            );
        }
        html
    }

    fn generate_pdf(&self, resource: &WorksheetResource) -> String {
        self.preview(resource)
    }
}
