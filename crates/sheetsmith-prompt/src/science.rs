//! Science worksheet prompt builder.

use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions};

use crate::guidance::{common_tail, count_emphasis};

/// Builds the science worksheet prompt.
///
/// When experiments are requested the items key switches to
/// `"experiments"` and each item carries a procedure; the response parser
/// accepts either key.
#[must_use]
pub fn build_prompt(
    options: &ResourceGenerationOptions,
    params: &DifficultyParameters,
) -> String {
    let (items_key, noun, item_requirement) = if options.include_experiments {
        (
            "experiments",
            "experiments",
            "Each experiment's \"question\" states the investigation question, \
             \"steps\" lists the procedure in order using only safe, \
             classroom-available materials, and \"answer\" describes the \
             expected observation.",
        )
    } else {
        (
            "problems",
            "problems",
            "Each problem tests one concept; \"steps\" may be an empty array.",
        )
    };

    let visual_requirement = if options.include_visuals {
        "Every item must include a \"visual\" field describing a supporting \
         diagram."
    } else {
        "Omit the \"visual\" field."
    };

    format!(
        "Create a science worksheet about \"{topic}\" for grade {grade} \
         students.\n\
         \n\
         {count}\n\
         \n\
         ## REQUIRED JSON SCHEMA\n\
         \n\
         {{\n\
         \x20 \"title\": string,\n\
         \x20 \"instructions\": string,\n\
         \x20 \"{items_key}\": [\n\
         \x20   {{\n\
         \x20     \"question\": string,\n\
         \x20     \"answer\": string,\n\
         \x20     \"explanation\": string,\n\
         \x20     \"steps\": [string],\n\
         \x20     \"visual\": string (optional)\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         {item_requirement} {visual_requirement}\n\
         {tail}",
        topic = options.topic_area,
        grade = options.grade_level,
        count = count_emphasis(options.item_count, noun),
        tail = common_tail(options, params),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_core::{Difficulty, Subject};

    fn options(experiments: bool) -> ResourceGenerationOptions {
        #[allow(clippy::unwrap_used)]
        serde_json::from_value(serde_json::json!({
            "subject": "science",
            "gradeLevel": "8",
            "resourceType": "worksheet",
            "topicArea": "photosynthesis",
            "itemCount": 4,
            "includeExperiments": experiments,
        }))
        .unwrap()
    }

    #[test]
    fn test_standard_prompt_uses_problems_key() {
        let params =
            DifficultyParameters::calculate("8", Subject::Science, Difficulty::Medium);
        let prompt = build_prompt(&options(false), &params);
        assert!(prompt.contains("\"problems\""));
        assert!(prompt.contains("EXACTLY 4 problems"));
    }

    #[test]
    fn test_experiment_prompt_uses_experiments_key() {
        let params =
            DifficultyParameters::calculate("8", Subject::Science, Difficulty::Medium);
        let prompt = build_prompt(&options(true), &params);
        assert!(prompt.contains("\"experiments\""));
        assert!(prompt.contains("procedure"));
    }
}
