//! Shape validation of raw LLM payloads.
//!
//! Runs before any transformation, on the raw JSON value, so a bad
//! response can be retried cheaply. Kindergarten reading applies its own
//! lenient rules: a short passage and binary Yes/No questions instead of
//! the stricter non-empty-options checks.

use serde_json::Value;
use sheetsmith_core::{
    is_kindergarten, ResourceGenerationOptions, ResourceType, Result, SheetsmithError, Subject,
};

/// Maximum passage line count accepted for Kindergarten reading.
const KINDERGARTEN_PASSAGE_LINES: usize = 5;

/// Validates a parsed payload against the request.
///
/// # Errors
///
/// Returns [`SheetsmithError::ItemCountMismatch`] when the item count is
/// wrong and [`SheetsmithError::ResponseValidation`] for every other shape
/// violation.
pub fn validate_payload(value: &Value, options: &ResourceGenerationOptions) -> Result<()> {
    match options.resource_type {
        ResourceType::Worksheet | ResourceType::Quiz => validate_items(value, options),
        ResourceType::ExitSlip => validate_exit_slip(value, options),
        ResourceType::Rubric => validate_rubric(value, options),
        ResourceType::LessonPlan => validate_lesson_plan(value, options),
    }
}

fn items_of(value: &Value) -> Option<&Vec<Value>> {
    ["problems", "questions", "experiments"]
        .iter()
        .find_map(|key| value[*key].as_array())
}

fn validate_items(value: &Value, options: &ResourceGenerationOptions) -> Result<()> {
    let subject = options.subject.to_string();
    let items = items_of(value).ok_or_else(|| {
        SheetsmithError::response_validation(&subject, "no problems/questions/experiments array")
    })?;

    if items.len() != options.item_count {
        return Err(SheetsmithError::ItemCountMismatch {
            expected: options.item_count,
            actual: items.len(),
        });
    }

    let kindergarten = is_kindergarten(&options.grade_level);
    for (index, item) in items.iter().enumerate() {
        let question = item["question"]
            .as_str()
            .or_else(|| item["prompt"].as_str())
            .unwrap_or_default();
        if question.trim().is_empty() {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!("item {index} has no question text"),
            ));
        }

        if kindergarten && options.subject == Subject::Reading {
            validate_binary_question(item, index, &subject)?;
        } else if item["type"].as_str() == Some("multiple_choice")
            && item["options"].as_array().is_none_or_empty()
        {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!("multiple-choice item {index} has no options"),
            ));
        }
    }

    if options.subject == Subject::Reading {
        validate_passage(value, options, kindergarten)?;
    }

    Ok(())
}

/// Kindergarten reading questions must be answerable with Yes or No.
fn validate_binary_question(item: &Value, index: usize, subject: &str) -> Result<()> {
    let options_ok = item["options"].as_array().is_some_and(|opts| {
        opts.len() == 2
            && opts[0].as_str() == Some("Yes")
            && opts[1].as_str() == Some("No")
    });
    if options_ok {
        Ok(())
    } else {
        Err(SheetsmithError::response_validation(
            subject,
            format!("Kindergarten question {index} must have exactly the options Yes and No"),
        ))
    }
}

fn validate_passage(
    value: &Value,
    options: &ResourceGenerationOptions,
    kindergarten: bool,
) -> Result<()> {
    let subject = options.subject.to_string();
    let passage = value["passage"].as_str().unwrap_or_default();
    if passage.trim().is_empty() {
        return Err(SheetsmithError::response_validation(
            &subject,
            "reading content requires a non-empty passage",
        ));
    }
    if kindergarten {
        let lines = passage.lines().filter(|l| !l.trim().is_empty()).count();
        if lines > KINDERGARTEN_PASSAGE_LINES {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!(
                    "Kindergarten passage has {lines} lines, maximum is {KINDERGARTEN_PASSAGE_LINES}"
                ),
            ));
        }
    }
    Ok(())
}

fn validate_exit_slip(value: &Value, options: &ResourceGenerationOptions) -> Result<()> {
    let subject = options.subject.to_string();
    let questions = value["questions"].as_array().ok_or_else(|| {
        SheetsmithError::response_validation(&subject, "exit slip has no questions array")
    })?;
    if questions.len() != options.item_count {
        return Err(SheetsmithError::ItemCountMismatch {
            expected: options.item_count,
            actual: questions.len(),
        });
    }
    for (index, question) in questions.iter().enumerate() {
        let prompt = question["prompt"]
            .as_str()
            .or_else(|| question["question"].as_str())
            .unwrap_or_default();
        if prompt.trim().is_empty() {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!("exit slip question {index} has no prompt"),
            ));
        }
    }
    Ok(())
}

fn validate_rubric(value: &Value, options: &ResourceGenerationOptions) -> Result<()> {
    let subject = options.subject.to_string();
    let criteria = value["criteria"].as_array().ok_or_else(|| {
        SheetsmithError::response_validation(&subject, "rubric has no criteria array")
    })?;
    if criteria.len() != options.item_count {
        return Err(SheetsmithError::ItemCountMismatch {
            expected: options.item_count,
            actual: criteria.len(),
        });
    }
    for (index, criterion) in criteria.iter().enumerate() {
        if criterion["name"].as_str().unwrap_or_default().trim().is_empty() {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!("rubric criterion {index} has no name"),
            ));
        }
        if criterion["levels"].as_array().is_none_or_empty() {
            return Err(SheetsmithError::response_validation(
                &subject,
                format!("rubric criterion {index} has no levels"),
            ));
        }
    }
    Ok(())
}

fn validate_lesson_plan(value: &Value, options: &ResourceGenerationOptions) -> Result<()> {
    let subject = options.subject.to_string();
    if value["objectives"].as_array().is_none_or_empty() {
        return Err(SheetsmithError::response_validation(
            &subject,
            "lesson plan has no objectives",
        ));
    }
    if value["activities"].as_array().is_none_or_empty() {
        return Err(SheetsmithError::response_validation(
            &subject,
            "lesson plan has no activities",
        ));
    }
    Ok(())
}

/// Emptiness check over `Option<&Vec<Value>>` lookups.
trait IsNoneOrEmpty {
    fn is_none_or_empty(&self) -> bool;
}

impl IsNoneOrEmpty for Option<&Vec<Value>> {
    fn is_none_or_empty(&self) -> bool {
        self.map_or(true, Vec::is_empty)
    }
}
