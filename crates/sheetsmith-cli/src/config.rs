//! Server configuration.
//!
//! Loaded from `sheetsmith.json` (missing file means defaults), with the
//! LLM API key resolved from the `SHEETSMITH_API_KEY` environment variable
//! or the config file. Key resolution happens once at startup so a bad
//! deployment fails immediately, never on the first user request.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sheetsmith_core::{Result, SheetsmithError};

/// The default config file name.
const CONFIG_FILE_NAME: &str = "sheetsmith.json";

/// Environment variable holding the LLM API key.
pub const API_KEY_ENV: &str = "SHEETSMITH_API_KEY";

/// Default model identifier sent to the provider.
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Default chat-completion API base URL.
fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Default per-request timeout in seconds.
const fn default_request_timeout() -> u64 {
    60
}

/// Default generation attempts before the fallback payload.
const fn default_max_validation_retries() -> u32 {
    3
}

/// Default completion attempts for transient transport failures.
const fn default_max_transport_retries() -> u32 {
    3
}

/// Default HTTP server port.
const fn default_port() -> u16 {
    3000
}

/// Main configuration for the Sheetsmith server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// LLM API key; the `SHEETSMITH_API_KEY` environment variable takes
    /// precedence over this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completion API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Generation attempts before substituting the fallback payload.
    #[serde(default = "default_max_validation_retries")]
    pub max_validation_retries: u32,

    /// Completion attempts for transient transport failures.
    #[serde(default = "default_max_transport_retries")]
    pub max_transport_retries: u32,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout(),
            max_validation_retries: default_max_validation_retries(),
            max_transport_retries: default_max_transport_retries(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `sheetsmith.json` exists but contains invalid
    /// JSON or fails validation.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            SheetsmithError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_file(&current_dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file; a missing file yields
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON or
    /// fails validation.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| SheetsmithError::config_parse(path, e.to_string()))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| SheetsmithError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error with a suggestion for each invalid
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SheetsmithError::config_validation(
                "model is empty",
                "Set the model field to a provider model identifier",
            ));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(SheetsmithError::config_validation(
                format!("apiBaseUrl '{}' is not an HTTP URL", self.api_base_url),
                "Use a full URL such as https://api.openai.com/v1",
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(SheetsmithError::config_validation(
                "requestTimeoutSeconds is 0",
                "Use a positive timeout; 60 seconds is a reasonable default",
            ));
        }
        Ok(())
    }

    /// Resolves the API key from the environment or the config file.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsmithError::MissingApiKey`] when neither source has
    /// a non-empty key.
    pub fn resolve_api_key(&self) -> Result<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or(SheetsmithError::MissingApiKey)
    }
}
