//! Error types for the Sheetsmith generation pipeline.
//!
//! This module defines the error hierarchy for all pipeline operations,
//! including configuration loading, LLM interactions, response validation,
//! format dispatch, and rendering.

/// A specialized `Result` type for Sheetsmith operations.
pub type Result<T> = std::result::Result<T, SheetsmithError>;

/// Errors that can occur during resource generation and rendering.
///
/// Error variants are organized by subsystem and include actionable
/// suggestions where possible to help users resolve issues.
#[derive(Debug, thiserror::Error)]
pub enum SheetsmithError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your sheetsmith.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: std::path::PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    /// The LLM API key is missing at startup.
    ///
    /// This is checked once at process start so that a bad deployment fails
    /// immediately rather than on the first user request.
    #[error("LLM API key is not configured\n\nSuggestion: Set the SHEETSMITH_API_KEY environment variable or the apiKey field in sheetsmith.json")]
    MissingApiKey,

    // ========================================================================
    // LLM Errors
    // ========================================================================
    /// LLM API returned an error (authentication, rate limiting, etc.).
    #[error("LLM API error ({kind}): {message}\n\nSuggestion: {suggestion}")]
    LlmApiError {
        /// The kind of API error (e.g., rate limit, authentication, server).
        kind: LlmErrorKind,
        /// Detailed error message from the API.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    /// The LLM returned syntactically valid JSON with the wrong shape.
    ///
    /// Bounded retry is applied by the generation client; after exhaustion
    /// the client substitutes a deterministic default payload instead of
    /// surfacing this error to the caller.
    #[error("LLM response failed validation for {subject} content: {message}")]
    ResponseValidation {
        /// The subject whose validation rules were applied.
        subject: String,
        /// Description of the shape violation.
        message: String,
    },

    /// The LLM returned a different number of items than requested.
    #[error("LLM returned {actual} items but exactly {expected} were requested")]
    ItemCountMismatch {
        /// The item count stated in the prompt.
        expected: usize,
        /// The item count found in the response.
        actual: usize,
    },

    // ========================================================================
    // Dispatch Errors
    // ========================================================================
    /// No handler is registered for the requested subject/format pair.
    ///
    /// This indicates a programmer or deployment error, not a transient
    /// condition, and is allowed to fail visibly.
    #[error("No format handler registered for subject '{subject}' with format '{format}'")]
    NoHandler {
        /// The subject that was requested.
        subject: String,
        /// The format that was requested.
        format: String,
    },

    // ========================================================================
    // Transform / Render Errors
    // ========================================================================
    /// A format handler failed to transform a raw LLM payload.
    #[error("Failed to transform resource: {message}")]
    Transform {
        /// The underlying handler error message.
        message: String,
    },

    /// Rendering a resource to printable output failed.
    #[error("Failed to render resource: {message}")]
    Render {
        /// The underlying renderer error message.
        message: String,
    },

    // ========================================================================
    // General Errors
    // ========================================================================
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Categories of LLM API errors for structured error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Authentication failure (invalid API key, expired credentials).
    Authentication,
    /// Rate limit exceeded.
    RateLimit,
    /// The request body was rejected as malformed.
    MalformedRequest,
    /// Server error (5xx responses).
    Server,
    /// Request timed out before the provider responded.
    Timeout,
    /// Network connectivity issues.
    Network,
    /// Other unclassified errors.
    Other,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimit => write!(f, "rate_limit"),
            Self::MalformedRequest => write!(f, "malformed_request"),
            Self::Server => write!(f, "server"),
            Self::Timeout => write!(f, "timeout"),
            Self::Network => write!(f, "network"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl LlmErrorKind {
    /// Returns a suggestion message for this error kind.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Authentication => "Check your API key or credentials",
            Self::RateLimit => "Wait and retry shortly, or reduce request frequency",
            Self::MalformedRequest => "This is likely a bug in the prompt construction; file an issue",
            Self::Server => "Retry later; the LLM service may be experiencing issues",
            Self::Timeout => "Retry, or increase requestTimeoutSeconds in sheetsmith.json",
            Self::Network => "Check your network connection",
            Self::Other => "Check the LLM provider's status page",
        }
    }
}

impl SheetsmithError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(
        path: impl Into<std::path::PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `LlmApiError` with automatic suggestion based on error kind.
    #[must_use]
    pub fn llm_api_error(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        let suggestion = kind.suggestion().to_string();
        Self::LlmApiError {
            kind,
            message: message.into(),
            suggestion,
        }
    }

    /// Creates a new `ResponseValidation` error.
    #[must_use]
    pub fn response_validation(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseValidation {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Creates a new `NoHandler` error naming the offending pair.
    #[must_use]
    pub fn no_handler(subject: impl Into<String>, format: impl Into<String>) -> Self {
        Self::NoHandler {
            subject: subject.into(),
            format: format.into(),
        }
    }

    /// Creates a new `Transform` error wrapping a handler failure.
    #[must_use]
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Creates a new `Render` error preserving the original message.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is transient and may be retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::LlmApiError {
                kind: LlmErrorKind::RateLimit
                    | LlmErrorKind::Server
                    | LlmErrorKind::Timeout
                    | LlmErrorKind::Network,
                ..
            }
        )
    }

    /// Returns `true` if this error indicates a deployment or logic bug
    /// rather than a transient condition.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::MissingApiKey
                | Self::NoHandler { .. }
                | Self::LlmApiError {
                    kind: LlmErrorKind::Authentication,
                    ..
                }
        )
    }
}
