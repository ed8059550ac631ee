//! Quiz shaping.
//!
//! Quizzes bypass the format-handler registry: there is a single quiz
//! shape regardless of subject, so [`shape_quiz`] normalizes the raw LLM
//! payload directly. The item kind is taken from the stated `type` label
//! when present and inferred from the presence of options otherwise.

use serde::Deserialize;
use serde_json::Value;
use sheetsmith_core::{
    QuizQuestion, QuizQuestionKind, QuizResource, Result, ResourceGenerationOptions, ResourceType,
};

use crate::html::escape;

/// Estimated minutes per quiz question.
const MINUTES_PER_QUESTION: u32 = 2;

#[derive(Debug, Deserialize)]
struct RawQuiz {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "problems")]
    questions: Vec<RawQuizQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuizQuestion {
    #[serde(alias = "prompt")]
    question: String,
    #[serde(default, rename = "type", alias = "questionType")]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    points: Option<u32>,
}

/// Normalizes a raw quiz payload into the canonical quiz shape.
///
/// # Errors
///
/// Returns a JSON error if the payload cannot be parsed into the quiz
/// result shape.
pub fn shape_quiz(raw: &Value, options: &ResourceGenerationOptions) -> Result<QuizResource> {
    let parsed: RawQuiz = serde_json::from_value(raw.clone())?;

    let title = if parsed.title.trim().is_empty() {
        format!("{} Quiz", options.topic_area)
    } else {
        parsed.title
    };

    let questions = parsed.questions.into_iter().map(shape_question).collect();

    Ok(QuizResource {
        resource_type: ResourceType::Quiz,
        title,
        subject: options.subject,
        grade_level: options.grade_level.clone(),
        estimated_time_minutes: estimated_minutes(options.item_count),
        questions,
    })
}

fn shape_question(item: RawQuizQuestion) -> QuizQuestion {
    let kind = match item.kind.as_deref() {
        Some("multiple_choice") => QuizQuestionKind::MultipleChoice,
        Some("short_answer") => QuizQuestionKind::ShortAnswer,
        // Unknown or missing label: infer from the presence of options.
        _ if !item.options.is_empty() => QuizQuestionKind::MultipleChoice,
        _ => QuizQuestionKind::ShortAnswer,
    };

    let answer = item
        .answer
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "(answer not provided)".to_string());
    let explanation = item
        .explanation
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("The correct answer is {answer}."));

    QuizQuestion {
        question: item.question,
        kind,
        options: item.options,
        answer,
        explanation,
        points: item.points.unwrap_or(1),
    }
}

/// Derives the estimated completion time from the question count.
#[must_use]
pub fn estimated_minutes(question_count: usize) -> u32 {
    u32::try_from(question_count).unwrap_or(u32::MAX) * MINUTES_PER_QUESTION
}

/// Renders a quiz as an HTML fragment (shared by preview and print).
#[must_use]
pub fn quiz_fragment(quiz: &QuizResource) -> String {
    let total_points: u32 = quiz.questions.iter().map(|q| q.points).sum();
    let mut html = format!(
        "<h2>{}</h2>\n<p class=\"quiz-meta\">Estimated time: {} minutes. Total points: {}.</p>\n",
        escape(&quiz.title),
        quiz.estimated_time_minutes,
        total_points
    );
    for (index, question) in quiz.questions.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"question\"><span class=\"number\">{}.</span> {} \
             <span class=\"points\">({} pt)</span>",
            index + 1,
            escape(&question.question),
            question.points
        ));
        match question.kind {
            QuizQuestionKind::MultipleChoice => {
                html.push_str("<ol type=\"A\" class=\"options\">");
                for option in &question.options {
                    html.push_str(&format!("<li>{}</li>", escape(option)));
                }
                html.push_str("</ol>");
            }
            QuizQuestionKind::ShortAnswer => {
                html.push_str("<div class=\"answer-line\"></div>");
            }
        }
        html.push_str("</div>\n");
    }
    html
}
