//! Reading comprehension prompt builder.

use sheetsmith_core::{is_kindergarten, DifficultyParameters, ResourceGenerationOptions};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the reading comprehension prompt.
///
/// Requests a passage, an optional vocabulary list, and comprehension
/// questions. Kindergarten requests constrain the passage length and force
/// binary Yes/No questions via the band guidance block.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    let vocabulary_requirement = if options.include_vocabulary {
        "\"vocabulary\" must list 3 to 5 words from the passage with \
         grade-appropriate definitions."
    } else {
        "\"vocabulary\" may be an empty array."
    };

    let question_requirement = if is_kindergarten(&options.grade_level) {
        "Every question must have \"type\": \"multiple_choice\" with exactly \
         the two options [\"Yes\", \"No\"]."
    } else {
        "Multiple-choice questions must include at least 3 distinct options; \
         short-answer questions must omit \"options\". Every question needs a \
         non-empty \"answer\"."
    };

    format!(
        "Create a reading comprehension exercise about \"{topic}\" for grade \
         {grade} students.\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"passage\": string,\n\
         \x20 \"vocabulary\": [ {{ \"word\": string, \"definition\": string }} ],\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"question\": string,\n\
         \x20     \"type\": \"multiple_choice\" or \"short_answer\",\n\
         \x20     \"options\": [string],\n\
         \x20     \"answer\": string,\n\
         \x20     \"explanation\": string\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         The \"passage\" must be non-empty and self-contained; every question \
         must be answerable from the passage alone. {vocabulary_requirement} \
         {question_requirement}\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        count = count_emphasis(options.item_count, "questions"),
        tail = common_tail(options, params),
    )
}
