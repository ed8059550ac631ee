//! End-to-end pipeline tests with a scripted LLM backend.
//!
//! These tests drive `ResourceGenerator` through the full path: prompt
//! construction, retry/validation, shaping, and envelope assembly, with
//! the completion backend replaced by a scripted mock.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use sheetsmith_core::{
    Resource, ResourceGenerationOptions, Result, SectionKind, SheetsmithError,
};
use sheetsmith_generate::{
    CompletionBackend, CompletionRequest, GenerationClient, ResourceGenerator,
};
use sheetsmith_render::FormatHandlerRegistry;

/// Backend that replays a scripted sequence of responses, then repeats
/// the last one.
struct ScriptedBackend {
    responses: Mutex<Vec<String>>,
    calls: Mutex<u32>,
}

impl ScriptedBackend {
    fn new(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(|v| v.to_string()).collect()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            Ok(responses.remove(0))
        } else {
            Ok(responses[0].clone())
        }
    }
}

fn generator(responses: Vec<Value>) -> (ResourceGenerator, Arc<ScriptedBackend>) {
    let backend = ScriptedBackend::new(responses);
    let client = GenerationClient::new(backend.clone());
    (ResourceGenerator::new(client), backend)
}

fn options(body: Value) -> ResourceGenerationOptions {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_grade_five_math_worksheet() {
    let response = json!({
        "title": "Fraction Practice",
        "instructions": "Solve each problem and simplify.",
        "problems": [
            {"question": "1/2 + 1/4 = ?", "answer": "3/4"},
            {"question": "2/3 - 1/3 = ?", "answer": "1/3"},
            {"question": "1/5 + 2/5 = ?", "answer": "3/5"},
            {"question": "3/4 - 1/2 = ?", "answer": "1/4"},
            {"question": "1/6 + 1/6 = ?", "answer": "1/3"}
        ]
    });
    let (generator, backend) = generator(vec![response]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "math",
            "gradeLevel": "5",
            "resourceType": "worksheet",
            "topicArea": "fractions",
            "itemCount": 5,
        })))
        .await
        .unwrap();

    assert_eq!(backend.calls(), 1);
    assert!(!output.defaulted);

    // The typed resource carries five fully-defaulted problems.
    let Resource::Worksheet(worksheet) = &output.resource else {
        panic!("expected a worksheet");
    };
    assert_eq!(worksheet.problems.len(), 5);
    for problem in &worksheet.problems {
        assert!(!problem.question.is_empty());
        assert!(!problem.answer.is_empty());
    }
    assert_eq!(worksheet.format.to_string(), "standard");

    // The envelope strips answers and double-encodes the problem list.
    let wire = serde_json::to_value(&output.envelope).unwrap();
    assert_eq!(wire["title"], "Fraction Practice");
    assert_eq!(wire["metadata"]["gradeLevel"], "5");
    assert!(wire["metadata"]["generatedAt"].is_string());

    let content = wire["sections"][0]["content"].as_str().unwrap();
    let problems: Value = serde_json::from_str(content).unwrap();
    assert_eq!(problems.as_array().unwrap().len(), 5);
    assert!(problems[0].get("answer").is_none());
}

#[tokio::test]
async fn test_fallback_after_three_bad_responses() {
    // Every response is missing the questions array, so validation fails
    // three times and the Kindergarten fallback takes over.
    let bad = json!({"title": "Nope"});
    let (generator, backend) = generator(vec![bad.clone(), bad.clone(), bad]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "reading",
            "gradeLevel": "K",
            "resourceType": "worksheet",
            "topicArea": "friendship",
            "itemCount": 3,
        })))
        .await
        .unwrap();

    assert_eq!(backend.calls(), 3);
    assert!(output.defaulted);

    let Resource::Worksheet(worksheet) = &output.resource else {
        panic!("expected a worksheet");
    };
    assert_eq!(worksheet.title, "My Friend");
    let passage = worksheet.passage.as_deref().unwrap();
    assert!(passage.lines().count() <= 5);
    for problem in &worksheet.problems {
        assert_eq!(problem.options, vec!["Yes", "No"]);
    }
}

#[tokio::test]
async fn test_kindergarten_reading_scenario() {
    let response = json!({
        "title": "The Red Ball",
        "passage": "I see a ball.\nThe ball is red.\nI kick the ball.",
        "questions": [
            {"question": "Is the ball red?", "options": ["Yes", "No"], "answer": "Yes"},
            {"question": "Is the ball blue?", "options": ["Yes", "No"], "answer": "No"},
            {"question": "Do I kick the ball?", "options": ["Yes", "No"], "answer": "Yes"}
        ]
    });
    let (generator, _) = generator(vec![response]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "reading",
            "gradeLevel": "K",
            "resourceType": "worksheet",
            "topicArea": "play",
            "itemCount": 3,
        })))
        .await
        .unwrap();

    assert!(!output.defaulted);

    // Reading envelopes order passage before questions.
    let kinds: Vec<_> = output.envelope.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds[0], SectionKind::Passage);
    assert_eq!(*kinds.last().unwrap(), SectionKind::Questions);

    // Binary options survive into the student-facing section.
    let wire = serde_json::to_value(&output.envelope).unwrap();
    let questions_section = wire["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["type"] == "questions")
        .unwrap();
    let questions: Value =
        serde_json::from_str(questions_section["content"].as_str().unwrap()).unwrap();
    assert_eq!(questions[0]["options"], json!(["Yes", "No"]));
}

#[tokio::test]
async fn test_checklist_rubric_scores() {
    let response = json!({
        "title": "Presentation Rubric",
        "criteria": [
            {
                "name": "Eye contact",
                "description": "Looks at the audience",
                "levels": [
                    {"score": "4", "description": "Consistent eye contact"},
                    {"score": "1", "description": "Reads from notes"}
                ]
            },
            {
                "name": "Volume",
                "description": "Speaks clearly",
                "levels": [
                    {"score": "4", "description": "Everyone can hear"},
                    {"score": "1", "description": "Too quiet"}
                ]
            }
        ]
    });
    let (generator, _) = generator(vec![response]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "general",
            "gradeLevel": "6",
            "resourceType": "rubric",
            "topicArea": "presentations",
            "itemCount": 2,
            "rubricStyle": "checklist",
        })))
        .await
        .unwrap();

    let Resource::Rubric(rubric) = &output.resource else {
        panic!("expected a rubric");
    };
    for criterion in &rubric.criteria {
        assert_eq!(criterion.levels.len(), 2);
        assert_eq!(criterion.levels[0].score, "\u{2713}");
        assert_eq!(criterion.levels[1].score, "\u{d7}");
    }

    // The envelope carries one rubric section.
    assert_eq!(output.envelope.sections.len(), 1);
    assert_eq!(output.envelope.sections[0].kind, SectionKind::Rubric);
}

#[tokio::test]
async fn test_response_decorations_survive_to_the_envelope() {
    let response = json!({
        "title": "Space Math",
        "decorations": ["\u{1f680}", "\u{1fa90}", "\u{2b50}"],
        "problems": [
            {"question": "3 x 3 = ?", "answer": "9"},
            {"question": "4 x 4 = ?", "answer": "16"}
        ]
    });
    let (generator, _) = generator(vec![response]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "math",
            "gradeLevel": "4",
            "resourceType": "worksheet",
            "topicArea": "multiplication",
            "theme": "space",
            "itemCount": 2,
        })))
        .await
        .unwrap();

    assert_eq!(
        output.envelope.decorations,
        vec!["\u{1f680}", "\u{1fa90}", "\u{2b50}"]
    );
    let wire = serde_json::to_value(&output.envelope).unwrap();
    assert_eq!(wire["metadata"]["theme"], "space");
}

#[tokio::test]
async fn test_transform_is_idempotent() {
    let registry = FormatHandlerRegistry::new();
    let opts = options(json!({
        "subject": "science",
        "gradeLevel": "7",
        "resourceType": "worksheet",
        "topicArea": "density",
        "format": "experiment",
    }));
    let raw = json!({
        "title": "Sink or Float",
        "experiments": [
            {"question": "Does a grape sink in water?", "answer": "Yes",
             "steps": ["Fill a cup with water.", "Drop the grape in."]}
        ]
    });

    let first = registry.transform_resource(&raw, &opts).unwrap();
    let second = registry.transform_resource(&raw, &opts).unwrap();
    assert_eq!(first, second);

    // No timestamp sneaks into the transformed resource.
    let as_json = serde_json::to_value(&first).unwrap();
    assert!(as_json.get("generatedAt").is_none());
}

#[tokio::test]
async fn test_unregistered_pair_names_subject_and_format() {
    let registry = FormatHandlerRegistry::new();
    let opts = options(json!({
        "subject": "reading",
        "gradeLevel": "3",
        "resourceType": "worksheet",
        "topicArea": "seasons",
        "format": "experiment",
    }));
    let raw = json!({"title": "T", "questions": []});

    let err = registry.transform_resource(&raw, &opts).unwrap_err();
    assert!(matches!(err, SheetsmithError::NoHandler { .. }));
    let message = err.to_string();
    assert!(message.contains("reading"));
    assert!(message.contains("experiment"));
}

#[tokio::test]
async fn test_quiz_pipeline_derives_time_and_points() {
    let response = json!({
        "title": "Cell Quiz",
        "questions": [
            {"question": "Powerhouse of the cell?", "type": "multiple_choice",
             "options": ["Nucleus", "Mitochondria", "Ribosome", "Vacuole"],
             "answer": "Mitochondria"},
            {"question": "Name one organelle.", "type": "short_answer",
             "answer": "Answers will vary."}
        ]
    });
    let (generator, _) = generator(vec![response]);

    let output = generator
        .generate_resource(&options(json!({
            "subject": "science",
            "gradeLevel": "7",
            "resourceType": "quiz",
            "topicArea": "cells",
            "itemCount": 2,
        })))
        .await
        .unwrap();

    let Resource::Quiz(quiz) = &output.resource else {
        panic!("expected a quiz");
    };
    assert_eq!(quiz.estimated_time_minutes, 4);
    assert!(quiz.questions.iter().all(|q| q.points == 1));
    assert!(quiz.questions[0]
        .explanation
        .contains("Mitochondria"));
}
