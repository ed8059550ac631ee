//! Bounded generation retry.
//!
//! Two retry budgets apply to one generation: transient transport failures
//! are retried with exponential backoff, and parse/validation failures
//! retry the whole completion. Both budgets are explicit attempt counters
//! in a loop; when the validation budget is exhausted the request is
//! answered with a deterministic default payload rather than an error.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use sheetsmith_core::{DifficultyParameters, ResourceGenerationOptions, Result};
use sheetsmith_prompt::{build_prompt, SYSTEM_PROMPT};
use tracing::{info, warn};

use crate::client::{CompletionBackend, CompletionRequest, SubjectBudget};
use crate::fallback::default_payload;
use crate::validate::validate_payload;

/// Default completion attempts for transient transport failures.
const DEFAULT_TRANSPORT_ATTEMPTS: u32 = 3;

/// Default generation attempts before substituting the default payload.
const DEFAULT_VALIDATION_ATTEMPTS: u32 = 3;

/// Base delay for exponential backoff between transport attempts.
const BACKOFF_BASE: Duration = Duration::from_millis(250);

/// How a generation concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome<T> {
    /// The LLM produced a payload that passed validation.
    Succeeded(T),
    /// Validation retries were exhausted and a default payload was
    /// substituted.
    Defaulted(T),
}

impl<T> GenerationOutcome<T> {
    /// Unwraps the payload, discarding how it was obtained.
    pub fn into_inner(self) -> T {
        match self {
            Self::Succeeded(value) | Self::Defaulted(value) => value,
        }
    }

    /// Whether the default payload was substituted.
    pub const fn was_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Drives completions through the backend with both retry budgets applied.
pub struct GenerationClient {
    backend: Arc<dyn CompletionBackend>,
    max_transport_attempts: u32,
    max_validation_attempts: u32,
}

impl GenerationClient {
    /// Creates a client over the given backend with the default budgets.
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            max_transport_attempts: DEFAULT_TRANSPORT_ATTEMPTS,
            max_validation_attempts: DEFAULT_VALIDATION_ATTEMPTS,
        }
    }

    /// Overrides the retry budgets. Zero is treated as one attempt.
    #[must_use]
    pub const fn with_attempt_budgets(mut self, transport: u32, validation: u32) -> Self {
        self.max_transport_attempts = if transport == 0 { 1 } else { transport };
        self.max_validation_attempts = if validation == 0 { 1 } else { validation };
        self
    }

    /// Generates one validated payload for the request.
    ///
    /// # Errors
    ///
    /// Returns the classified LLM error when transport attempts are
    /// exhausted or the failure is not transient. Validation failures never
    /// surface; they exhaust into `Defaulted`.
    pub async fn generate_payload(
        &self,
        options: &ResourceGenerationOptions,
        params: &DifficultyParameters,
    ) -> Result<GenerationOutcome<Value>> {
        let budget = SubjectBudget::for_request(options.subject, options.resource_type);
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(options, params),
            temperature: budget.temperature,
            max_tokens: budget.max_tokens,
        };

        let mut attempt = 1;
        loop {
            let text = self.complete_with_backoff(&request).await?;
            match parse_and_validate(&text, options) {
                Ok(value) => {
                    info!(
                        subject = %options.subject,
                        resource_type = %options.resource_type,
                        attempt,
                        "generation succeeded"
                    );
                    return Ok(GenerationOutcome::Succeeded(value));
                }
                Err(error) if attempt < self.max_validation_attempts => {
                    warn!(attempt, %error, "response failed validation, retrying");
                    attempt += 1;
                }
                Err(error) => {
                    warn!(
                        attempt,
                        %error,
                        "validation attempts exhausted, substituting default payload"
                    );
                    return Ok(GenerationOutcome::Defaulted(default_payload(options)));
                }
            }
        }
    }

    /// Runs one completion, retrying transient failures with backoff.
    async fn complete_with_backoff(&self, request: &CompletionRequest) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.backend.complete(request).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_transient() && attempt < self.max_transport_attempts => {
                    let delay = BACKOFF_BASE * 2u32.pow(attempt - 1);
                    warn!(attempt, ?delay, %error, "transient LLM failure, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

/// Parses the response text as JSON and validates its shape.
fn parse_and_validate(text: &str, options: &ResourceGenerationOptions) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    validate_payload(&value, options)?;
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;
    use sheetsmith_core::{Difficulty, LlmErrorKind, SheetsmithError, Subject};

    use super::*;

    /// Backend that replays a scripted sequence of results.
    struct ScriptedBackend {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
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
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn options() -> ResourceGenerationOptions {
        serde_json::from_value(json!({
            "subject": "math",
            "gradeLevel": "5",
            "resourceType": "worksheet",
            "topicArea": "fractions",
            "itemCount": 2,
        }))
        .unwrap()
    }

    fn params() -> DifficultyParameters {
        DifficultyParameters::calculate("5", Subject::Math, Difficulty::Medium)
    }

    fn good_response() -> String {
        json!({
            "title": "Fractions",
            "problems": [
                {"question": "1/2 + 1/4?", "answer": "3/4"},
                {"question": "1/3 + 1/3?", "answer": "2/3"}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_valid_response_succeeds_first_attempt() {
        let backend = ScriptedBackend::new(vec![Ok(good_response())]);
        let client = GenerationClient::new(backend.clone());

        let outcome = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap();
        assert!(!outcome.was_defaulted());
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_invalid_json_retries_then_defaults() {
        let backend = ScriptedBackend::new(vec![
            Ok("{ not json".to_string()),
            Ok("{ still not json".to_string()),
            Ok("{}".to_string()),
        ]);
        let client = GenerationClient::new(backend.clone());

        let outcome = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap();
        assert!(outcome.was_defaulted());
        assert_eq!(backend.calls(), 3);

        // The substituted payload is the deterministic math fallback.
        let value = outcome.into_inner();
        assert_eq!(value["problems"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_count_retries_until_a_good_response() {
        let one_problem = json!({
            "title": "T",
            "problems": [{"question": "Q", "answer": "A"}]
        })
        .to_string();
        let backend = ScriptedBackend::new(vec![Ok(one_problem), Ok(good_response())]);
        let client = GenerationClient::new(backend.clone());

        let outcome = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap();
        assert!(!outcome.was_defaulted());
        assert_eq!(backend.calls(), 2);
    }

    #[test]
    fn test_transient_failures_are_retried_with_backoff() {
        let backend = ScriptedBackend::new(vec![
            Err(SheetsmithError::llm_api_error(
                LlmErrorKind::RateLimit,
                "slow down",
            )),
            Ok(good_response()),
        ]);
        let client = GenerationClient::new(backend.clone());

        let outcome = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap();
        assert!(!outcome.was_defaulted());
        assert_eq!(backend.calls(), 2);
    }

    #[test]
    fn test_fatal_errors_are_not_retried() {
        let backend = ScriptedBackend::new(vec![Err(SheetsmithError::llm_api_error(
            LlmErrorKind::Authentication,
            "bad key",
        ))]);
        let client = GenerationClient::new(backend.clone());

        let error = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap_err();
        assert!(error.is_fatal());
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_transport_budget_is_bounded() {
        let rate_limited = || {
            Err(SheetsmithError::llm_api_error(
                LlmErrorKind::RateLimit,
                "slow down",
            ))
        };
        let backend =
            ScriptedBackend::new(vec![rate_limited(), rate_limited(), rate_limited()]);
        let client = GenerationClient::new(backend.clone());

        let error = tokio_test::block_on(client.generate_payload(&options(), &params()))
            .unwrap_err();
        assert!(error.is_transient());
        assert_eq!(backend.calls(), 3);
    }
}
