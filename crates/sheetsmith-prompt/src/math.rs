//! Math worksheet prompt builder.

use sheetsmith_core::{DifficultyParameters, Format, ResourceGenerationOptions};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the math worksheet prompt.
///
/// Pure string assembly: states the exact JSON schema, demands the exact
/// problem count, and embeds the difficulty guidance.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    let guided = options.effective_format() == Format::Guided;

    let steps_requirement = if guided {
        "\"steps\" must contain the full worked solution, one step per entry, \
         and \"hints\" must contain at least one hint that does not give away \
         the answer."
    } else {
        "\"steps\" and \"hints\" may be empty arrays."
    };

    let visual_requirement = if options.include_visuals {
        "Every problem must include a \"visual\" field describing a simple \
         diagram or picture that supports it."
    } else {
        "Omit the \"visual\" field."
    };

    format!(
        "Create a math worksheet about \"{topic}\" for grade {grade} students.\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"instructions\": string,\n\
         \x20 \"problems\": [\n\
         \x20   {{\n\
         \x20     \"question\": string,\n\
         \x20     \"answer\": string,\n\
         \x20     \"explanation\": string,\n\
         \x20     \"steps\": [string],\n\
         \x20     \"hints\": [string],\n\
         \x20     \"visual\": string (optional)\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         Every problem must have a non-empty \"question\" and a non-empty \
         \"answer\". {steps_requirement} {visual_requirement}\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        count = count_emphasis(options.item_count, "problems"),
        tail = common_tail(options, params),
    )
}
