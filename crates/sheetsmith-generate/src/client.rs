//! LLM completion backend.
//!
//! [`CompletionBackend`] is the seam between the generation pipeline and
//! the LLM provider; tests substitute a scripted implementation.
//! [`HttpCompletionBackend`] talks to a JSON chat-completion endpoint and
//! classifies every failure into a [`LlmErrorKind`] so the retry loop can
//! distinguish transient conditions from deployment bugs.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sheetsmith_core::{LlmErrorKind, ResourceType, Result, SheetsmithError, Subject};

/// One completion request, already rendered to message strings.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The system message.
    pub system: String,
    /// The user message (the full generation prompt).
    pub user: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Response token cap.
    pub max_tokens: u32,
}

/// The LLM seam. Implementations must be safe to call concurrently.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one completion request and returns the raw response text.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::LlmApiError`] with a classified kind on
    /// any transport or provider failure.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Per-request sampling budget, tuned by subject and resource type.
///
/// Math wants low temperature for arithmetic accuracy; reading needs the
/// largest budget because a passage rides along with the questions.
#[derive(Debug, Clone, Copy)]
pub struct SubjectBudget {
    /// Sampling temperature.
    pub temperature: f64,
    /// Response token cap.
    pub max_tokens: u32,
}

impl SubjectBudget {
    /// The budget for a subject/resource-type pair.
    #[must_use]
    pub const fn for_request(subject: Subject, resource_type: ResourceType) -> Self {
        let (temperature, max_tokens) = match subject {
            Subject::Math => (0.3, 2048),
            Subject::Reading => (0.7, 4096),
            Subject::Science => (0.5, 3072),
            Subject::General => (0.6, 2048),
        };
        // Lesson plans are prose-heavy whatever the subject.
        let max_tokens = match resource_type {
            ResourceType::LessonPlan => 4096,
            _ => max_tokens,
        };
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Chat-completion backend over HTTP.
pub struct HttpCompletionBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpCompletionBackend {
    /// Creates a backend against the given provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| SheetsmithError::llm_api_error(LlmErrorKind::Other, e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "response_format": {"type": "json_object"},
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsmithError::llm_api_error(classify_transport(&e), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SheetsmithError::llm_api_error(
                classify_status(status),
                format!("provider returned {status}: {detail}"),
            ));
        }

        let payload: Value = response.json().await.map_err(|e| {
            SheetsmithError::llm_api_error(LlmErrorKind::Other, format!("invalid response body: {e}"))
        })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| {
                SheetsmithError::llm_api_error(
                    LlmErrorKind::Other,
                    "response had no message content",
                )
            })
    }
}

/// Maps an HTTP status to the error kind the retry loop inspects.
fn classify_status(status: StatusCode) -> LlmErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmErrorKind::Authentication,
        StatusCode::TOO_MANY_REQUESTS => LlmErrorKind::RateLimit,
        StatusCode::BAD_REQUEST => LlmErrorKind::MalformedRequest,
        s if s.is_server_error() => LlmErrorKind::Server,
        _ => LlmErrorKind::Other,
    }
}

/// Maps a reqwest transport failure to an error kind.
fn classify_transport(error: &reqwest::Error) -> LlmErrorKind {
    if error.is_timeout() {
        LlmErrorKind::Timeout
    } else if error.is_connect() || error.is_request() {
        LlmErrorKind::Network
    } else {
        LlmErrorKind::Other
    }
}
