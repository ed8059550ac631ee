//! Subject-agnostic prompt builder.
//!
//! Used for the `general` subject, which is handled outside the
//! format-handler registry.

use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the general-subject worksheet prompt.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    format!(
        "Create an educational worksheet about \"{topic}\" for grade {grade} \
         students.\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"instructions\": string,\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"question\": string,\n\
         \x20     \"answer\": string,\n\
         \x20     \"explanation\": string\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         Every question must have a non-empty \"question\" and a non-empty \
         \"answer\".\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        count = count_emphasis(options.item_count, "questions"),
        tail = common_tail(options, params),
    )
}
