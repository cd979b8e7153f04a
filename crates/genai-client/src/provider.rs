use async_trait::async_trait;

use crate::error::GenAiResult;

/// Sampling and grounding knobs for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationOptions {
    /// `None` leaves the service default in place. Factual queries want a low value.
    pub temperature: Option<f32>,
    /// Ground the answer in live web search instead of model memory
    pub enable_web_search: bool,
}

impl GenerationOptions {
    /// Low temperature plus web search, for price-sensitive prompts
    pub fn factual(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            enable_web_search: true,
        }
    }

    /// Service default temperature plus web search
    pub fn web_search() -> Self {
        Self {
            temperature: None,
            enable_web_search: true,
        }
    }
}

/// Backend-agnostic text generation boundary.
///
/// Implementations return the raw response text and never interpret it.
/// An empty payload is an error, not an empty string. No retries happen here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenAiResult<String>;

    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_presets() {
        let factual = GenerationOptions::factual(0.1);
        assert_eq!(factual.temperature, Some(0.1));
        assert!(factual.enable_web_search);

        let search = GenerationOptions::web_search();
        assert_eq!(search.temperature, None);
        assert!(search.enable_web_search);

        assert!(!GenerationOptions::default().enable_web_search);
    }
}
