//! HTTP API endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/generate` - Generate a resource, returning the wire envelope
//! - `POST /api/preview` - Generate and render a printable HTML document
//! - `POST /api/share` - Validate recipients and acknowledge a share
//! - `GET /api/health` - Server and model status

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sheetsmith_core::{GeneratedResource, LlmErrorKind, ResourceGenerationOptions, SheetsmithError};
use sheetsmith_generate::ResourceGenerator;
use sheetsmith_render::render_document;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::Config;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response body for the preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// The complete printable HTML document.
    pub html: String,
    /// Whether the fallback payload was substituted.
    pub defaulted: bool,
}

/// Request body for the share endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareRequest {
    /// Email addresses to share with.
    pub recipients: Vec<String>,
    /// The resource being shared, passed through to the delivery
    /// collaborator.
    pub resource: serde_json::Value,
}

/// Response body for the share endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareResponse {
    /// Whether the share was accepted.
    pub shared: bool,
    /// Number of validated recipients.
    pub recipients: usize,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is reachable.
    pub status: String,
    /// The configured model identifier.
    pub model: String,
    /// Server version.
    pub version: String,
}

/// Error response body returned on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Description of the error.
    pub error: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// The generation pipeline.
    pub generator: Arc<ResourceGenerator>,
}

impl AppState {
    /// Creates state over a configured generator.
    #[must_use]
    pub fn new(config: Config, generator: Arc<ResourceGenerator>) -> Self {
        Self { config, generator }
    }
}

// ============================================================================
// API Error Type
// ============================================================================

/// Internal error type for API handlers.
#[derive(Debug)]
enum ApiError {
    /// The request itself was invalid.
    BadRequest(String),
    /// The LLM provider rate-limited us; the client may retry later.
    RateLimited(String),
    /// The LLM provider failed.
    Upstream(String),
    /// A configuration or dispatch bug.
    Internal(String),
}

impl ApiError {
    /// Maps a body deserialization failure onto a 400 with the uniform
    /// error shape, instead of axum's bare 422.
    fn from_rejection(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }

    /// Maps a pipeline error onto an HTTP-facing one.
    fn from_pipeline(error: SheetsmithError) -> Self {
        match &error {
            SheetsmithError::LlmApiError {
                kind: LlmErrorKind::RateLimit,
                ..
            } => Self::RateLimited(error.to_string()),
            SheetsmithError::LlmApiError { .. } => Self::Upstream(error.to_string()),
            _ => Self::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the HTTP router with all API endpoints, CORS for development,
/// and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/generate", post(handle_generate))
        .route("/preview", post(handle_preview))
        .route("/share", post(handle_share))
        .route("/health", get(handle_health));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for `POST /api/generate`.
async fn handle_generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResourceGenerationOptions>, JsonRejection>,
) -> Result<Json<GeneratedResource>, ApiError> {
    let Json(options) = body.map_err(ApiError::from_rejection)?;
    info!(
        subject = %options.subject,
        resource_type = %options.resource_type,
        grade = %options.grade_level,
        "Generation requested"
    );

    let output = state
        .generator
        .generate_resource(&options)
        .await
        .map_err(ApiError::from_pipeline)?;

    if output.defaulted {
        warn!(title = %output.envelope.title, "Serving default payload");
    }

    Ok(Json(output.envelope))
}

/// Handler for `POST /api/preview`.
///
/// Runs the same pipeline as generation, then renders the printable
/// document instead of returning the envelope.
async fn handle_preview(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResourceGenerationOptions>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(options) = body.map_err(ApiError::from_rejection)?;
    let output = state
        .generator
        .generate_resource(&options)
        .await
        .map_err(ApiError::from_pipeline)?;

    let html = render_document(&output.resource, state.generator.registry())
        .map_err(ApiError::from_pipeline)?;

    Ok(Json(PreviewResponse {
        html,
        defaulted: output.defaulted,
    }))
}

/// Handler for `POST /api/share`.
///
/// Validates the recipient list and acknowledges; delivery itself is an
/// external collaborator.
async fn handle_share(
    body: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<Json<ShareResponse>, ApiError> {
    let Json(request) = body.map_err(ApiError::from_rejection)?;
    if request.recipients.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one recipient is required".to_string(),
        ));
    }
    for recipient in &request.recipients {
        if !recipient.contains('@') {
            return Err(ApiError::BadRequest(format!(
                "'{recipient}' is not a valid email address"
            )));
        }
    }

    info!(
        recipients = request.recipients.len(),
        resource = %request.resource["title"].as_str().unwrap_or("untitled"),
        "Share acknowledged"
    );

    Ok(Json(ShareResponse {
        shared: true,
        recipients: request.recipients.len(),
    }))
}

/// Handler for `GET /api/health`.
async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.config.model.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use sheetsmith_core::Result;
    use sheetsmith_generate::{CompletionBackend, CompletionRequest, GenerationClient};
    use tower::util::ServiceExt;

    use super::*;

    /// Backend that always returns the same canned response.
    struct CannedBackend(String);

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn test_state(response: serde_json::Value) -> AppState {
        let backend = Arc::new(CannedBackend(response.to_string()));
        let client = GenerationClient::new(backend);
        AppState::new(
            Config::default(),
            Arc::new(ResourceGenerator::new(client)),
        )
    }

    fn math_response() -> serde_json::Value {
        serde_json::json!({
            "title": "Fractions",
            "problems": [
                {"question": "1/2 + 1/4?", "answer": "3/4"},
                {"question": "1/3 + 1/3?", "answer": "2/3"},
                {"question": "1/5 + 2/5?", "answer": "3/5"},
                {"question": "1/2 + 1/2?", "answer": "1"},
                {"question": "3/4 - 1/4?", "answer": "1/2"}
            ]
        })
    }

    async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> Response {
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

    #[tokio::test]
    async fn test_health_reports_model() {
        let router = create_router(test_state(math_response()));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_generate_returns_envelope() {
        let router = create_router(test_state(math_response()));

        let response = post_json(
            router,
            "/api/generate",
            serde_json::json!({
                "subject": "math",
                "gradeLevel": "5",
                "resourceType": "worksheet",
                "topicArea": "fractions",
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope["title"], "Fractions");
        assert_eq!(envelope["metadata"]["subject"], "math");
        assert!(envelope["sections"][0]["content"].is_string());
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_subject() {
        let router = create_router(test_state(math_response()));

        let response = post_json(
            router,
            "/api/generate",
            serde_json::json!({
                "subject": "history",
                "gradeLevel": "5",
                "resourceType": "worksheet",
                "topicArea": "rome",
            }),
        )
        .await;

        // The body rejection is mapped to 400 with the uniform error shape.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(!error.error.is_empty());
    }

    #[tokio::test]
    async fn test_share_validates_addresses() {
        let router = create_router(test_state(math_response()));

        let response = post_json(
            router,
            "/api/share",
            serde_json::json!({
                "recipients": ["teacher@school.example", "not-an-address"],
                "resource": {"title": "Fractions"},
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("not-an-address"));
    }

    #[tokio::test]
    async fn test_share_acknowledges_valid_recipients() {
        let router = create_router(test_state(math_response()));

        let response = post_json(
            router,
            "/api/share",
            serde_json::json!({
                "recipients": ["teacher@school.example"],
                "resource": {"title": "Fractions"},
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let share: ShareResponse = serde_json::from_slice(&body).unwrap();
        assert!(share.shared);
        assert_eq!(share.recipients, 1);
    }

    #[tokio::test]
    async fn test_preview_returns_printable_html() {
        let router = create_router(test_state(math_response()));

        let response = post_json(
            router,
            "/api/preview",
            serde_json::json!({
                "subject": "math",
                "gradeLevel": "5",
                "resourceType": "worksheet",
                "topicArea": "fractions",
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let preview: PreviewResponse = serde_json::from_slice(&body).unwrap();
        assert!(preview.html.starts_with("<!DOCTYPE html>"));
        assert!(preview.html.contains("Answer Key"));
        assert!(!preview.defaulted);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = create_router(test_state(math_response()));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
