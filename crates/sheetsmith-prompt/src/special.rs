//! Prompt builders for the special-cased resource types.
//!
//! Exit slips, rubrics, and lesson plans are dispatched on resource type
//! before subject, with their own response shapes.

use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions, RubricStyle};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the exit-slip prompt.
#[must_use]
pub fn build_exit_slip_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    format!(
        "Create an exit slip (a quick end-of-lesson check) for a grade \
         {grade} lesson on \"{topic}\".\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"prompt\": string,\n\
         \x20     \"kind\": \"multiple_choice\" or \"short_answer\" or \"rating\",\n\
         \x20     \"options\": [string] (only for multiple_choice)\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         Each question must be answerable in under a minute.\n\
         {tail}",
        grade = options.grade_level,
        topic = options.topic_area,
        count = count_emphasis(options.item_count, "questions"),
        tail = common_tail(options, params),
    )
}

/// Builds the rubric prompt.
///
/// The scoring style decides the level labels: numeric rubrics use
/// "1".."4", checklists use exactly "\u{2713}" and "\u{d7}".
#[must_use]
pub fn build_rubric_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    let level_requirement = match options.rubric_style {
        RubricStyle::Numeric => "Each criterion must have exactly 4 levels with \"score\" values \
             \"4\", \"3\", \"2\", \"1\" in that order (4 is strongest).",
        RubricStyle::Checklist => "Each criterion must have exactly 2 levels with \"score\" values \
             \"\u{2713}\" (met) and \"\u{d7}\" (not met), in that order. Do not \
             use numeric scores.",
    };

    format!(
        "Create a grading rubric for grade {grade} work on \"{topic}\".\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"criteria\": [\n\
         \x20   {{\n\
         \x20     \"name\": string,\n\
         \x20     \"description\": string,\n\
         \x20     \"levels\": [ {{ \"score\": string, \"description\": string }} ]\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         {level_requirement}\n\
         {tail}",
        grade = options.grade_level,
        topic = options.topic_area,
        count = count_emphasis(options.item_count, "criteria"),
        tail = common_tail(options, params),
    )
}

/// Builds the lesson-plan prompt.
#[must_use]
pub fn build_lesson_plan_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    format!(
        "Create a lesson plan for teaching \"{topic}\" to grade {grade} \
         students in a single class period.\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"objectives\": [string],\n\
         \x20 \"materials\": [string],\n\
         \x20 \"activities\": [\n\
         \x20   {{ \"name\": string, \"durationMinutes\": number, \"description\": string }}\n\
         \x20 ],\n\
         \x20 \"assessment\": string\n\
         }}\n\
         \n\
         Provide 2 to 4 objectives and 3 to 5 activities whose durations sum \
         to roughly 45 minutes.\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        tail = common_tail(options, params),
    )
}
