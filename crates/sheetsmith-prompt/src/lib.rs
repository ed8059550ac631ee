//! Sheetsmith prompt builders
//!
//! One builder per subject plus dedicated builders for quizzes, exit
//! slips, rubrics, and lesson plans. All builders are pure string
//! assembly: no network, no randomness. Each states the exact required
//! JSON schema and the exact item count, embeds the difficulty-parameter
//! guidance, and appends custom instructions verbatim.

pub mod general;
pub mod guidance;
pub mod math;
pub mod quiz;
pub mod reading;
pub mod science;
pub mod special;

use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions, ResourceType, Subject};

/// System prompt sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an experienced K-12 curriculum writer. \
You produce accurate, age-appropriate educational content and respond with \
strictly valid JSON matching the schema in the request.";

/// Builds the user prompt for a request, dispatching on resource type
/// first, then subject.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    match options.resource_type {
        ResourceType::ExitSlip => special::build_exit_slip_prompt(options, params),
        ResourceType::Rubric => special::build_rubric_prompt(options, params),
        ResourceType::LessonPlan => special::build_lesson_plan_prompt(options, params),
        ResourceType::Quiz => quiz::build_prompt(options, params),
        ResourceType::Worksheet => match options.subject {
            Subject::Math => math::build_prompt(options, params),
            Subject::Reading => reading::build_prompt(options, params),
            Subject::Science => science::build_prompt(options, params),
            Subject::General => general::build_prompt(options, params),
        },
    }
}
