//! Quiz prompt builder.

use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the quiz prompt.
///
/// Quizzes mix multiple-choice and short-answer items; the shaping routine
/// downstream normalizes both shapes and fills derived fields, so the
/// prompt only has to pin the discriminant values.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    format!(
        "Create a quiz about \"{topic}\" for grade {grade} students.\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"question\": string,\n\
         \x20     \"type\": \"multiple_choice\" or \"short_answer\",\n\
         \x20     \"options\": [string] (4 options for multiple_choice, omit for short_answer),\n\
         \x20     \"answer\": string,\n\
         \x20     \"explanation\": string (optional),\n\
         \x20     \"points\": number (optional)\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         For multiple_choice, \"answer\" must exactly match one of the \
         options. Aim for roughly two thirds multiple_choice and one third \
         short_answer.\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        count = count_emphasis(options.item_count, "questions"),
        tail = common_tail(options, params),
    )
}
