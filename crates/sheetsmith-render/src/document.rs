//! Printable document assembly.
//!
//! [`render_document`] wraps a canonical resource in a complete printable
//! HTML page: page chrome, the body fragment for the resource's shape, and
//! an answer key appendix for resource types that carry answers. Teachers
//! print this page directly, so the styles are embedded and print-safe.

use sheetsmith_core::{
    ExitSlipResource, LessonPlanResource, Resource, Result, RubricResource, WorksheetResource,
};

use crate::html::escape;
use crate::quiz::quiz_fragment;
use crate::registry::FormatHandlerRegistry;

/// Embedded print stylesheet.
const PAGE_STYLES: &str = "\
body { font-family: Georgia, serif; max-width: 7.5in; margin: 0 auto; padding: 0.5in; }\n\
h2 { border-bottom: 2px solid #333; padding-bottom: 0.25em; }\n\
.instructions { font-style: italic; }\n\
.problem, .question, .experiment { margin: 1em 0; page-break-inside: avoid; }\n\
.work-space { min-height: 1.25in; border-bottom: 1px dotted #999; }\n\
.answer-line { min-height: 0.5in; border-bottom: 1px solid #333; }\n\
.passage { background: #f6f6f6; padding: 0.75em; }\n\
.hints li { color: #555; font-size: 0.9em; }\n\
table.rubric { border-collapse: collapse; width: 100%; }\n\
table.rubric th, table.rubric td { border: 1px solid #333; padding: 0.4em; vertical-align: top; }\n\
.answer-key { page-break-before: always; }\n\
.answer-key h2 { border-bottom-style: dashed; }\n";

/// Renders a resource as a complete printable HTML page, with an answer
/// key appended for worksheets and quizzes.
///
/// # Errors
///
/// Returns [`sheetsmith_core::SheetsmithError::NoHandler`] if a worksheet
/// carries an unregistered subject/format pair.
pub fn render_document(resource: &Resource, registry: &FormatHandlerRegistry) -> Result<String> {
    let body = match resource {
        Resource::Worksheet(worksheet) => registry.generate_pdf(worksheet)?,
        Resource::Quiz(quiz) => quiz_fragment(quiz),
        Resource::Rubric(rubric) => rubric_fragment(rubric),
        Resource::ExitSlip(slip) => exit_slip_fragment(slip),
        Resource::LessonPlan(plan) => lesson_plan_fragment(plan),
    };

    let answer_key = match resource {
        Resource::Worksheet(worksheet) => worksheet_answer_key(worksheet),
        Resource::Quiz(quiz) => quiz_answer_key(quiz),
        Resource::Rubric(_) | Resource::ExitSlip(_) | Resource::LessonPlan(_) => String::new(),
    };

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_STYLES}</style>\n</head>\n<body>\n\
         {body}{answer_key}</body>\n</html>\n",
        title = escape(resource.title()),
    ))
}

fn rubric_fragment(rubric: &RubricResource) -> String {
    let mut html = format!("<h2>{}</h2>\n", escape(&rubric.title));
    html.push_str("<table class=\"rubric\"><thead><tr><th>Criterion</th>");
    let level_count = rubric
        .criteria
        .first()
        .map_or(0, |criterion| criterion.levels.len());
    if let Some(first) = rubric.criteria.first() {
        for level in &first.levels {
            html.push_str(&format!("<th>{}</th>", escape(&level.score)));
        }
    }
    html.push_str("</tr></thead><tbody>");
    for criterion in &rubric.criteria {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong><br>{}</td>",
            escape(&criterion.name),
            escape(&criterion.description)
        ));
        for level in &criterion.levels {
            html.push_str(&format!("<td>{}</td>", escape(&level.description)));
        }
        // Pad rows whose level count differs from the header.
        for _ in criterion.levels.len()..level_count {
            html.push_str("<td></td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>\n");
    html
}

fn exit_slip_fragment(slip: &ExitSlipResource) -> String {
    let mut html = format!(
        "<h2>{}</h2>\n<p class=\"instructions\">Name: ______________________ \
         Date: ____________</p>\n",
        escape(&slip.title)
    );
    for (index, question) in slip.questions.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"question\"><span class=\"number\">{}.</span> {}",
            index + 1,
            escape(&question.prompt)
        ));
        if question.options.is_empty() {
            html.push_str("<div class=\"answer-line\"></div>");
        } else {
            html.push_str("<ul class=\"options\">");
            for option in &question.options {
                html.push_str(&format!("<li>\u{25cb} {}</li>", escape(option)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>\n");
    }
    html
}

fn lesson_plan_fragment(plan: &LessonPlanResource) -> String {
    let mut html = format!("<h2>{}</h2>\n", escape(&plan.title));

    html.push_str("<h3>Objectives</h3><ul>");
    for objective in &plan.objectives {
        html.push_str(&format!("<li>{}</li>", escape(objective)));
    }
    html.push_str("</ul>\n");

    html.push_str("<h3>Materials</h3><ul>");
    for material in &plan.materials {
        html.push_str(&format!("<li>{}</li>", escape(material)));
    }
    html.push_str("</ul>\n");

    html.push_str("<h3>Activities</h3>");
    for activity in &plan.activities {
        html.push_str(&format!(
            "<div class=\"activity\"><h4>{} ({} min)</h4><p>{}</p></div>",
            escape(&activity.name),
            activity.duration_minutes,
            escape(&activity.description)
        ));
    }

    html.push_str(&format!(
        "<h3>Assessment</h3><p>{}</p>\n",
        escape(&plan.assessment)
    ));
    html
}

fn worksheet_answer_key(worksheet: &WorksheetResource) -> String {
    let mut html = String::from("<section class=\"answer-key\"><h2>Answer Key</h2><ol>");
    for problem in &worksheet.problems {
        html.push_str(&format!(
            "<li><strong>{}</strong> \u{2014} {}</li>",
            escape(&problem.answer),
            escape(&problem.explanation)
        ));
    }
    html.push_str("</ol></section>\n");
    html
}

fn quiz_answer_key(quiz: &sheetsmith_core::QuizResource) -> String {
    let mut html = String::from("<section class=\"answer-key\"><h2>Answer Key</h2><ol>");
    for question in &quiz.questions {
        html.push_str(&format!(
            "<li><strong>{}</strong> \u{2014} {}</li>",
            escape(&question.answer),
            escape(&question.explanation)
        ));
    }
    html.push_str("</ol></section>\n");
    html
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sheetsmith_core::{
        Format, Problem, QuizQuestion, QuizQuestionKind, QuizResource, ResourceType, RubricCriterion,
        RubricLevel, RubricStyle, Subject,
    };

    fn worksheet() -> WorksheetResource {
        WorksheetResource {
            resource_type: ResourceType::Worksheet,
            title: "Fractions".to_string(),
            subject: Subject::Math,
            grade_level: "5".to_string(),
            format: Format::Standard,
            instructions: "Solve each problem.".to_string(),
            problems: vec![Problem {
                question: "1/2 + 1/4?".to_string(),
                answer: "3/4".to_string(),
                explanation: "Common denominator is 4.".to_string(),
                options: Vec::new(),
                steps: Vec::new(),
                hints: Vec::new(),
                visual: None,
            }],
            passage: None,
            vocabulary: Vec::new(),
        }
    }

    #[test]
    fn test_worksheet_document_has_answer_key_after_body() {
        let registry = FormatHandlerRegistry::new();
        let html = render_document(&Resource::Worksheet(worksheet()), &registry).unwrap();
        let question_at = html.find("1/2 + 1/4?").unwrap();
        let key_at = html.find("Answer Key").unwrap();
        assert!(question_at < key_at);
        assert!(html.contains("Common denominator is 4."));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_quiz_document_includes_answers() {
        let registry = FormatHandlerRegistry::new();
        let quiz = QuizResource {
            resource_type: ResourceType::Quiz,
            title: "Cells".to_string(),
            subject: Subject::Science,
            grade_level: "7".to_string(),
            questions: vec![QuizQuestion {
                question: "Powerhouse of the cell?".to_string(),
                kind: QuizQuestionKind::ShortAnswer,
                options: Vec::new(),
                answer: "Mitochondria".to_string(),
                explanation: "It produces ATP.".to_string(),
                points: 2,
            }],
            estimated_time_minutes: 2,
        };
        let html = render_document(&Resource::Quiz(quiz), &registry).unwrap();
        assert!(html.contains("Answer Key"));
        assert!(html.contains("Mitochondria"));
    }

    #[test]
    fn test_rubric_document_has_no_answer_key() {
        let registry = FormatHandlerRegistry::new();
        let rubric = RubricResource {
            resource_type: ResourceType::Rubric,
            title: "Essay Rubric".to_string(),
            subject: Subject::General,
            grade_level: "8".to_string(),
            style: RubricStyle::Checklist,
            criteria: vec![RubricCriterion {
                name: "Thesis".to_string(),
                description: "States a clear claim".to_string(),
                levels: vec![
                    RubricLevel {
                        score: "\u{2713}".to_string(),
                        description: "Clear claim present".to_string(),
                    },
                    RubricLevel {
                        score: "\u{d7}".to_string(),
                        description: "No clear claim".to_string(),
                    },
                ],
            }],
        };
        let html = render_document(&Resource::Rubric(rubric), &registry).unwrap();
        assert!(!html.contains("Answer Key"));
        assert!(html.contains("\u{2713}"));
        assert!(html.contains("table class=\"rubric\""));
    }
}
