//! Resource normalization.
//!
//! [`ResourceGenerator`] runs the whole pipeline for one request: compute
//! difficulty parameters, obtain a validated (or defaulted) payload from
//! the generation client, shape it into a canonical [`Resource`], and wrap
//! it in the wire envelope. Dispatch is on resource type first, then on
//! subject; `generated_at` is stamped only here so shaping stays
//! idempotent.

use serde::Deserialize;
use serde_json::{json, Value};
use sheetsmith_core::{
    default_decorations, DifficultyParameters, ExitSlipQuestion, ExitSlipResource,
    GeneratedResource, LessonPlanResource, Problem, QuizQuestion, Resource, ResourceGenerationOptions,
    ResourceMetadata, ResourceType, Result, RubricCriterion, RubricLevel, RubricResource,
    RubricStyle, Section, SectionKind, Subject,
};
use sheetsmith_render::{base_transform, shape_quiz, FormatHandlerRegistry};
use tracing::info;

use crate::retry::GenerationClient;

/// The result of one generation: the typed resource for rendering, the
/// wire envelope for the API, and whether the default payload was used.
#[derive(Debug)]
pub struct GeneratedOutput {
    /// The canonical typed resource.
    pub resource: Resource,
    /// The render-ready wire envelope.
    pub envelope: GeneratedResource,
    /// Whether validation retries exhausted into the default payload.
    pub defaulted: bool,
}

/// End-to-end generator for one configured backend.
pub struct ResourceGenerator {
    client: GenerationClient,
    registry: FormatHandlerRegistry,
}

impl ResourceGenerator {
    /// Creates a generator over the given client with the standard
    /// handler registry.
    #[must_use]
    pub fn new(client: GenerationClient) -> Self {
        Self {
            client,
            registry: FormatHandlerRegistry::new(),
        }
    }

    /// The handler registry, for callers that render directly.
    #[must_use]
    pub const fn registry(&self) -> &FormatHandlerRegistry {
        &self.registry
    }

    /// Generates one resource end to end.
    ///
    /// # Errors
    ///
    /// Returns LLM transport errors, dispatch errors for unregistered
    /// subject/format pairs, and shaping errors for unparseable payloads.
    /// Validation failures never surface; they are absorbed by the
    /// fallback in the retry layer.
    pub async fn generate_resource(
        &self,
        options: &ResourceGenerationOptions,
    ) -> Result<GeneratedOutput> {
        let params = DifficultyParameters::calculate(
            &options.grade_level,
            options.subject,
            options.difficulty,
        );
        let outcome = self.client.generate_payload(options, &params).await?;
        let defaulted = outcome.was_defaulted();
        let raw = outcome.into_inner();

        let resource = shape_resource(&raw, options, &self.registry)?;
        let envelope = build_envelope(&resource, options, resolve_decorations(&raw, options))?;

        info!(
            subject = %options.subject,
            resource_type = %options.resource_type,
            title = %envelope.title,
            defaulted,
            "resource generated"
        );

        Ok(GeneratedOutput {
            resource,
            envelope,
            defaulted,
        })
    }
}

/// Shapes a validated raw payload into the canonical resource, dispatching
/// on resource type first, then subject.
///
/// # Errors
///
/// Parse errors propagate; at this layer the payload has already passed
/// validation (or is the hand-authored default), so failure indicates a
/// shaping bug rather than a bad LLM response.
pub fn shape_resource(
    raw: &Value,
    options: &ResourceGenerationOptions,
    registry: &FormatHandlerRegistry,
) -> Result<Resource> {
    match options.resource_type {
        ResourceType::Quiz => Ok(Resource::Quiz(shape_quiz(raw, options)?)),
        ResourceType::Rubric => Ok(Resource::Rubric(shape_rubric(raw, options)?)),
        ResourceType::ExitSlip => Ok(Resource::ExitSlip(shape_exit_slip(raw, options)?)),
        ResourceType::LessonPlan => Ok(Resource::LessonPlan(shape_lesson_plan(raw, options)?)),
        ResourceType::Worksheet => {
            let worksheet = if options.subject == Subject::General {
                base_transform(raw, options)?
            } else {
                registry.transform_resource(raw, options)?
            };
            Ok(Resource::Worksheet(worksheet))
        }
    }
}

// ============================================================================
// Shaping for the non-worksheet resource types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawRubric {
    #[serde(default)]
    title: String,
    #[serde(default)]
    criteria: Vec<RawCriterion>,
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    levels: Vec<RawLevel>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    // Providers sometimes emit numeric scores; accept both.
    score: Value,
    #[serde(default)]
    description: String,
}

/// Shapes a rubric, enforcing the scoring style on the levels.
///
/// Checklist rubrics always come out with exactly two levels scored
/// "\u{2713}" and "\u{d7}", whatever the LLM produced.
fn shape_rubric(raw: &Value, options: &ResourceGenerationOptions) -> Result<RubricResource> {
    let parsed: RawRubric = serde_json::from_value(raw.clone())?;

    let title = if parsed.title.trim().is_empty() {
        format!("{} Rubric", options.topic_area)
    } else {
        parsed.title
    };

    let criteria = parsed
        .criteria
        .into_iter()
        .map(|criterion| {
            let levels = match options.rubric_style {
                RubricStyle::Checklist => checklist_levels(&criterion.levels),
                RubricStyle::Numeric => criterion
                    .levels
                    .iter()
                    .map(|level| RubricLevel {
                        score: score_label(&level.score),
                        description: level.description.clone(),
                    })
                    .collect(),
            };
            RubricCriterion {
                name: criterion.name,
                description: criterion.description,
                levels,
            }
        })
        .collect();

    Ok(RubricResource {
        resource_type: ResourceType::Rubric,
        title,
        subject: options.subject,
        grade_level: options.grade_level.clone(),
        style: options.rubric_style,
        criteria,
    })
}

/// Collapses whatever levels the LLM produced into the met/not-met pair.
fn checklist_levels(levels: &[RawLevel]) -> Vec<RubricLevel> {
    let met = levels
        .first()
        .map_or_else(|| "Expectation was met.".to_string(), |l| l.description.clone());
    let not_met = levels
        .last()
        .filter(|_| levels.len() > 1)
        .map_or_else(|| "Expectation was not met.".to_string(), |l| l.description.clone());
    vec![
        RubricLevel {
            score: "\u{2713}".to_string(),
            description: met,
        },
        RubricLevel {
            score: "\u{d7}".to_string(),
            description: not_met,
        },
    ]
}

/// Stringifies a score that may have arrived as a number.
fn score_label(score: &Value) -> String {
    match score {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct RawExitSlip {
    #[serde(default)]
    title: String,
    #[serde(default)]
    questions: Vec<RawExitSlipQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawExitSlipQuestion {
    #[serde(alias = "question")]
    prompt: String,
    #[serde(default, alias = "type")]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<String>,
}

fn shape_exit_slip(
    raw: &Value,
    options: &ResourceGenerationOptions,
) -> Result<ExitSlipResource> {
    let parsed: RawExitSlip = serde_json::from_value(raw.clone())?;

    let title = if parsed.title.trim().is_empty() {
        format!("Exit Slip: {}", options.topic_area)
    } else {
        parsed.title
    };

    let questions = parsed
        .questions
        .into_iter()
        .map(|question| {
            let kind = question.kind.unwrap_or_else(|| {
                if question.options.is_empty() {
                    "short_answer".to_string()
                } else {
                    "multiple_choice".to_string()
                }
            });
            ExitSlipQuestion {
                prompt: question.prompt,
                kind,
                options: question.options,
            }
        })
        .collect();

    Ok(ExitSlipResource {
        resource_type: ResourceType::ExitSlip,
        title,
        subject: options.subject,
        grade_level: options.grade_level.clone(),
        questions,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLessonPlan {
    #[serde(default)]
    title: String,
    #[serde(default)]
    objectives: Vec<String>,
    #[serde(default)]
    materials: Vec<String>,
    #[serde(default)]
    activities: Vec<sheetsmith_core::LessonActivity>,
    #[serde(default)]
    assessment: String,
}

fn shape_lesson_plan(
    raw: &Value,
    options: &ResourceGenerationOptions,
) -> Result<LessonPlanResource> {
    let parsed: RawLessonPlan = serde_json::from_value(raw.clone())?;

    let title = if parsed.title.trim().is_empty() {
        format!("Lesson Plan: {}", options.topic_area)
    } else {
        parsed.title
    };

    Ok(LessonPlanResource {
        resource_type: ResourceType::LessonPlan,
        title,
        subject: options.subject,
        grade_level: options.grade_level.clone(),
        objectives: parsed.objectives,
        materials: parsed.materials,
        activities: parsed.activities,
        assessment: parsed.assessment,
    })
}

// ============================================================================
// Envelope assembly
// ============================================================================

/// Wraps a canonical resource in the wire envelope, stamping the
/// generation timestamp. `decorations` carries the caller's or the LLM's
/// decoration set; when it is `None` the subject default applies.
///
/// # Errors
///
/// Returns a JSON error if a section payload cannot be encoded.
pub fn build_envelope(
    resource: &Resource,
    options: &ResourceGenerationOptions,
    decorations: Option<Vec<String>>,
) -> Result<GeneratedResource> {
    let sections = sections_for(resource)?;
    let content = summary_for(resource);

    Ok(GeneratedResource {
        title: resource.title().to_string(),
        content,
        metadata: ResourceMetadata {
            grade_level: options.grade_level.clone(),
            subject: options.subject,
            resource_type: options.resource_type,
            generated_at: chrono::Utc::now(),
            theme: options.theme.clone(),
            difficulty: Some(options.difficulty),
        },
        sections,
        decorations: decorations.unwrap_or_else(|| default_decorations(options.subject)),
    })
}

/// Picks the decoration set for a request: the caller's, else the LLM's,
/// else none (the envelope then falls back to the subject default).
fn resolve_decorations(
    raw: &Value,
    options: &ResourceGenerationOptions,
) -> Option<Vec<String>> {
    if let Some(supplied) = &options.decorations {
        if !supplied.is_empty() {
            return Some(supplied.clone());
        }
    }
    let from_payload: Vec<String> = raw["decorations"]
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(ToString::to_string))
        .collect();
    if from_payload.is_empty() {
        None
    } else {
        Some(from_payload)
    }
}

fn sections_for(resource: &Resource) -> Result<Vec<Section>> {
    match resource {
        Resource::Worksheet(worksheet) if worksheet.subject == Subject::Reading => {
            let mut sections = Vec::new();
            if let Some(passage) = &worksheet.passage {
                sections
                    .push(Section::text(SectionKind::Passage, passage).with_title("Reading Passage"));
            }
            if !worksheet.vocabulary.is_empty() {
                sections.push(Section::data(
                    SectionKind::Vocabulary,
                    Some("Key Words"),
                    &worksheet.vocabulary,
                )?);
            }
            sections.push(Section::data(
                SectionKind::Questions,
                Some("Questions"),
                &convert_to_problems(&worksheet.problems),
            )?);
            Ok(sections)
        }
        Resource::Worksheet(worksheet) => Ok(vec![Section::data(
            SectionKind::Problems,
            None,
            &convert_to_problems(&worksheet.problems),
        )?]),
        Resource::Quiz(quiz) => Ok(vec![Section::data(
            SectionKind::Questions,
            None,
            &quiz.questions.iter().map(student_facing_question).collect::<Vec<_>>(),
        )?]),
        Resource::Rubric(rubric) => Ok(vec![Section::data(
            SectionKind::Rubric,
            Some(&rubric.title),
            &rubric.criteria,
        )?]),
        Resource::ExitSlip(slip) => Ok(vec![Section::data(
            SectionKind::Questions,
            None,
            &slip.questions,
        )?]),
        Resource::LessonPlan(plan) => {
            Ok(vec![Section::text(SectionKind::Text, lesson_plan_text(plan))])
        }
    }
}

fn summary_for(resource: &Resource) -> String {
    match resource {
        Resource::Worksheet(worksheet) => worksheet.instructions.clone(),
        Resource::Quiz(quiz) => format!(
            "Answer every question. Estimated time: {} minutes.",
            quiz.estimated_time_minutes
        ),
        Resource::ExitSlip(_) => "Answer each question before you leave.".to_string(),
        Resource::Rubric(_) | Resource::LessonPlan(_) => String::new(),
    }
}

/// Maps problems to their student-facing shape, with answers and
/// explanations stripped; the envelope is the sheet the student sees.
fn convert_to_problems(problems: &[Problem]) -> Vec<Value> {
    problems
        .iter()
        .map(|problem| {
            let mut item = json!({"question": problem.question});
            if !problem.options.is_empty() {
                item["options"] = json!(problem.options);
            }
            if !problem.steps.is_empty() {
                item["steps"] = json!(problem.steps);
            }
            if !problem.hints.is_empty() {
                item["hints"] = json!(problem.hints);
            }
            if let Some(visual) = &problem.visual {
                item["visual"] = json!(visual);
            }
            item
        })
        .collect()
}

/// Strips grading fields from a quiz question for the wire.
fn student_facing_question(question: &QuizQuestion) -> Value {
    let mut item = json!({
        "question": question.question,
        "type": question.kind,
        "points": question.points,
    });
    if !question.options.is_empty() {
        item["options"] = json!(question.options);
    }
    item
}

/// Plain-text rendering of a lesson plan for its single text section.
fn lesson_plan_text(plan: &LessonPlanResource) -> String {
    let mut text = String::from("Objectives:\n");
    for objective in &plan.objectives {
        text.push_str(&format!("- {objective}\n"));
    }
    text.push_str("\nMaterials:\n");
    for material in &plan.materials {
        text.push_str(&format!("- {material}\n"));
    }
    text.push_str("\nActivities:\n");
    for activity in &plan.activities {
        text.push_str(&format!(
            "- {} ({} min): {}\n",
            activity.name, activity.duration_minutes, activity.description
        ));
    }
    text.push_str(&format!("\nAssessment: {}", plan.assessment));
    text
}
