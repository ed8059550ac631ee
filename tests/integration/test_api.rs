//! HTTP API integration tests.
//!
//! Drives the full router with `tower::ServiceExt::oneshot`, backed by a
//! scripted completion backend, and checks the wire-level behavior a
//! frontend would observe.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use sheetsmith_cli::{create_router, AppState, Config, PreviewResponse};
use sheetsmith_core::Result;
use sheetsmith_generate::{
    CompletionBackend, CompletionRequest, GenerationClient, ResourceGenerator,
};
use tower::util::ServiceExt;

/// Backend that replays a scripted sequence, repeating the final entry.
struct ScriptedBackend {
    responses: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(|v| v.to_string()).collect()),
        })
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            Ok(responses.remove(0))
        } else {
            Ok(responses[0].clone())
        }
    }
}

fn router_with(responses: Vec<Value>) -> Router {
    let client = GenerationClient::new(ScriptedBackend::new(responses));
    let state = AppState::new(Config::default(), Arc::new(ResourceGenerator::new(client)));
    create_router(state)
}

async fn post_json(router: Router, uri: &str, body: Value) -> Response {
    router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn math_response() -> Value {
    json!({
        "title": "Fraction Practice",
        "instructions": "Show your work.",
        "problems": [
            {"question": "1/2 + 1/4?", "answer": "3/4"},
            {"question": "1/3 + 1/3?", "answer": "2/3"},
            {"question": "1/5 + 2/5?", "answer": "3/5"},
            {"question": "1/2 + 1/2?", "answer": "1"},
            {"question": "3/4 - 1/4?", "answer": "1/2"}
        ]
    })
}

fn math_options() -> Value {
    json!({
        "subject": "math",
        "gradeLevel": "5",
        "resourceType": "worksheet",
        "topicArea": "fractions",
    })
}

#[tokio::test]
async fn test_generate_stamps_metadata() {
    let router = router_with(vec![math_response()]);

    let response = post_json(router, "/api/generate", math_options()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = body_json(response).await;
    assert_eq!(envelope["title"], "Fraction Practice");
    assert_eq!(envelope["metadata"]["subject"], "math");
    assert_eq!(envelope["metadata"]["gradeLevel"], "5");
    assert_eq!(envelope["metadata"]["resourceType"], "worksheet");
    assert!(envelope["metadata"]["generatedAt"].is_string());
    assert!(!envelope["decorations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_never_leaks_answers() {
    let router = router_with(vec![math_response()]);

    let envelope = body_json(post_json(router, "/api/generate", math_options()).await).await;

    let content = envelope["sections"][0]["content"].as_str().unwrap();
    assert!(!content.contains("answer"));
    let problems: Value = serde_json::from_str(content).unwrap();
    assert_eq!(problems.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generate_serves_fallback_when_model_misbehaves() {
    // All three validation attempts come back without problems, so the
    // deterministic default worksheet is served instead of an error.
    let router = router_with(vec![json!({"title": "garbage"})]);

    let response = post_json(router, "/api/generate", math_options()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = body_json(response).await;
    let content = envelope["sections"][0]["content"].as_str().unwrap();
    let problems: Value = serde_json::from_str(content).unwrap();
    assert_eq!(problems.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_preview_renders_answer_key() {
    let router = router_with(vec![math_response()]);

    let response = post_json(router, "/api/preview", math_options()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let preview: PreviewResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(preview.html.starts_with("<!DOCTYPE html>"));
    assert!(preview.html.contains("Answer Key"));
    assert!(preview.html.contains("3/4"));
    assert!(!preview.defaulted);
}

#[tokio::test]
async fn test_preview_flags_defaulted_output() {
    let router = router_with(vec![json!({"title": "garbage"})]);

    let response = post_json(
        router,
        "/api/preview",
        json!({
            "subject": "reading",
            "gradeLevel": "K",
            "resourceType": "worksheet",
            "topicArea": "friendship",
            "itemCount": 3,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let preview: PreviewResponse = serde_json::from_slice(&bytes).unwrap();
    assert!(preview.defaulted);
    assert!(preview.html.contains("My Friend"));
}

#[tokio::test]
async fn test_exit_slip_end_to_end() {
    let router = router_with(vec![json!({
        "title": "Photosynthesis Check",
        "questions": [
            {"question": "What gas do plants take in?", "answer": "Carbon dioxide"},
            {"question": "Where does photosynthesis happen?", "answer": "Chloroplasts"},
            {"question": "Rate your understanding today.",
             "options": ["Got it", "Almost", "Need help"], "answer": "Got it"}
        ]
    })]);

    let envelope = body_json(
        post_json(
            router,
            "/api/generate",
            json!({
                "subject": "science",
                "gradeLevel": "7",
                "resourceType": "exit_slip",
                "topicArea": "photosynthesis",
                "itemCount": 3,
            }),
        )
        .await,
    )
    .await;

    assert_eq!(envelope["metadata"]["resourceType"], "exit_slip");
    let questions: Value =
        serde_json::from_str(envelope["sections"][0]["content"].as_str().unwrap()).unwrap();
    assert_eq!(questions.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_quiz_envelope_reports_estimated_time() {
    let router = router_with(vec![json!({
        "title": "Cell Quiz",
        "questions": [
            {"question": "Powerhouse of the cell?", "type": "multiple_choice",
             "options": ["Nucleus", "Mitochondria", "Ribosome", "Vacuole"],
             "answer": "Mitochondria"},
            {"question": "Name one organelle.", "type": "short_answer",
             "answer": "Answers will vary."}
        ]
    })]);

    let envelope = body_json(
        post_json(
            router,
            "/api/generate",
            json!({
                "subject": "science",
                "gradeLevel": "7",
                "resourceType": "quiz",
                "topicArea": "cells",
                "itemCount": 2,
            }),
        )
        .await,
    )
    .await;

    let summary = envelope["content"].as_str().unwrap();
    assert!(summary.contains("4 minutes"));
    let questions: Value =
        serde_json::from_str(envelope["sections"][0]["content"].as_str().unwrap()).unwrap();
    assert!(questions[0].get("answer").is_none());
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let router = router_with(vec![math_response()]);

    let response = post_json(
        router,
        "/api/generate",
        json!({"subject": "math", "gradeLevel": "5"}),
    )
    .await;

    // Missing resourceType and topicArea fails deserialization; the
    // rejection comes back as a 400 with the uniform error body.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].is_string());
}
