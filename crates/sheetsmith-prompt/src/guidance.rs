//! Shared prompt fragments.
//!
//! Every builder composes the same blocks: a JSON-only output contract, an
//! exact-count demand, difficulty guidance from the calculator, a
//! grade-band guidance block, and the user's custom instructions appended
//! verbatim.

use sheetsmith_core::{
    is_kindergarten, parse_grade, DifficultyParameters, GradeBand, ResourceGenerationOptions,
    MAX_GRADE,
};

/// The output contract stated at the end of every prompt.
pub const JSON_ONLY_BLOCK: &str = "Return ONLY a single valid JSON object. \
Do not include markdown code fences, commentary, or any text before or \
after the JSON. The response must parse without preprocessing.";

/// The exact-count demand.
///
/// Counts from the LLM drift without heavy emphasis; the validator rejects
/// any response whose item count differs from the request.
#[must_use]
pub fn count_emphasis(count: usize, noun: &str) -> String {
    format!(
        "You MUST generate EXACTLY {count} {noun}, no more, no less. \
         Responses with a different number of {noun} will be rejected."
    )
}

/// Grade-band guidance selected by the same banding logic as the
/// difficulty calculator.
#[must_use]
pub fn band_guidance(grade: &str) -> String {
    if is_kindergarten(grade) {
        return "This is for Kindergarten students who cannot yet read \
                independently. Use only simple words a five-year-old knows. \
                Keep every sentence to 8 words or fewer. Any passage must be \
                5 lines or fewer. Every question must be answerable with Yes \
                or No, with exactly the two options \"Yes\" and \"No\"."
            .to_string();
    }
    if parse_grade(grade) == Some(MAX_GRADE) {
        return "This is for grade 12 students preparing for college-level \
                work. Use precise academic vocabulary, expect sustained \
                argumentation, and require evidence-based reasoning. Where \
                appropriate, ask students to evaluate competing claims or \
                design their own investigation."
            .to_string();
    }
    match GradeBand::parse(grade) {
        GradeBand::EarlyElementary => "Use short sentences and familiar, concrete vocabulary. \
             Favor one-step tasks with picture-friendly framing."
            .to_string(),
        GradeBand::UpperElementary => "Use clear sentences with grade-appropriate vocabulary. \
             Two-step tasks are appropriate; define any new term in context."
            .to_string(),
        GradeBand::MiddleSchool => "Use full paragraphs where helpful and introduce \
             subject-specific terminology with brief definitions. Multi-step \
             reasoning is expected."
            .to_string(),
        GradeBand::HighSchool => "Use academic vocabulary and expect multi-step reasoning, \
             justification, and fluency with abstract representations."
            .to_string(),
    }
}

/// The block of difficulty-calculator guidance plus band guidance plus any
/// custom instructions, in the order every builder uses.
#[must_use]
pub fn common_tail(options: &ResourceGenerationOptions, params: &DifficultyParameters) -> String {
    let mut tail = String::new();
    tail.push_str("\n## DIFFICULTY GUIDANCE\n\n");
    tail.push_str(&params.guidance_text());
    tail.push_str("\n\n## GRADE GUIDANCE\n\n");
    tail.push_str(&band_guidance(&options.grade_level));
    if let Some(custom) = &options.custom_instructions {
        tail.push_str("\n\n## ADDITIONAL INSTRUCTIONS FROM THE TEACHER\n\n");
        tail.push_str(custom);
    }
    tail.push_str("\n\n## OUTPUT\n\n");
    tail.push_str(JSON_ONLY_BLOCK);
    tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_core::{Difficulty, Subject};

    fn options(grade: &str) -> ResourceGenerationOptions {
        #[allow(clippy::unwrap_used)]
        serde_json::from_value(serde_json::json!({
            "subject": "math",
            "gradeLevel": grade,
            "resourceType": "worksheet",
            "topicArea": "arithmetic",
            "customInstructions": "Use soccer examples."
        }))
        .unwrap()
    }

    #[test]
    fn test_count_emphasis_states_exact_count() {
        let text = count_emphasis(5, "problems");
        assert!(text.contains("EXACTLY 5 problems"));
        assert!(text.contains("no more, no less"));
    }

    #[test]
    fn test_kindergarten_guidance_is_binary() {
        let text = band_guidance("K");
        assert!(text.contains("Yes"));
        assert!(text.contains("5 lines or fewer"));
    }

    #[test]
    fn test_grade_twelve_guidance_is_rhetorical() {
        let text = band_guidance("12");
        assert!(text.contains("argumentation"));
    }

    #[test]
    fn test_custom_instructions_appended_verbatim() {
        let options = options("5");
        let params =
            DifficultyParameters::calculate("5", Subject::Math, Difficulty::Medium);
        let tail = common_tail(&options, &params);
        assert!(tail.contains("Use soccer examples."));
        assert!(tail.contains(JSON_ONLY_BLOCK));
    }
}
