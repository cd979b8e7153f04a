pub mod error;
pub mod gemini;
pub mod provider;

pub use error::{GenAiError, GenAiResult};
pub use gemini::GeminiClient;
pub use provider::{GenerationOptions, TextGenerator};

use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the generation service
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// `None` means demo mode: no upstream calls are made at all
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// HTTP-level request timeout
    pub timeout: Duration,
}

impl GenAiConfig {
    /// Reads `API_KEY` (or `GEMINI_API_KEY`), `GENAI_MODEL`, `GENAI_BASE_URL`
    /// and `GENAI_TIMEOUT_SECS`. Blank keys count as absent; a malformed
    /// timeout is an [`GenAiError::InvalidConfig`].
    pub fn from_env() -> GenAiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> GenAiResult<Self> {
        let defaults = Self::default();

        let api_key = ["API_KEY", "GEMINI_API_KEY"]
            .iter()
            .filter_map(|name| var(*name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());

        let timeout = match var("GENAI_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.trim().parse().map_err(|_| {
                GenAiError::InvalidConfig(format!("GENAI_TIMEOUT_SECS must be an integer, got {:?}", v))
            })?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key,
            model: var("GENAI_MODEL").unwrap_or(defaults.model),
            base_url: var("GENAI_BASE_URL").unwrap_or(defaults.base_url),
            timeout,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the live generator, or `None` when no credential is configured.
    pub fn generator(&self) -> GenAiResult<Option<Arc<dyn TextGenerator>>> {
        match GeminiClient::new(self) {
            Ok(client) => Ok(Some(Arc::new(client))),
            Err(GenAiError::MissingCredential) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(90),
        }
    }
}
