pub mod coerce;
pub mod extract;
pub mod fallback;
pub mod orchestrator;
pub mod pipeline;
pub mod prompts;
pub mod session;

#[cfg(test)]
mod test_support;

pub use coerce::{coerce_news, coerce_report, parse_payload, Coerced, ParsedPayload, PayloadKind};
pub use extract::extract_json;
pub use fallback::FallbackProvider;
pub use orchestrator::InsightOrchestrator;
pub use pipeline::PipelineOutcome;
pub use session::{DashboardSession, QueryStatus, DEFAULT_TICKER};

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Retry, timeout and sampling policy for generation calls
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bounded wait per generation attempt; expiry counts as a service error
    pub call_timeout: Duration,
    /// Extra attempts after a transient service error (total = max_retries + 1)
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub report_temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(60),
            max_retries: 1,
            retry_backoff: Duration::from_millis(500),
            report_temperature: 0.1,
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let call_timeout_secs: u64 = match var("INSIGHT_CALL_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().context("INSIGHT_CALL_TIMEOUT_SECS must be an integer")?,
            None => defaults.call_timeout.as_secs(),
        };
        let max_retries: u32 = match var("INSIGHT_MAX_RETRIES") {
            Some(v) => v.trim().parse().context("INSIGHT_MAX_RETRIES must be an integer")?,
            None => defaults.max_retries,
        };
        let retry_backoff_ms: u64 = match var("INSIGHT_RETRY_BACKOFF_MS") {
            Some(v) => v.trim().parse().context("INSIGHT_RETRY_BACKOFF_MS must be an integer")?,
            None => defaults.retry_backoff.as_millis() as u64,
        };
        let report_temperature: f32 = match var("INSIGHT_REPORT_TEMPERATURE") {
            Some(v) => v.trim().parse().context("INSIGHT_REPORT_TEMPERATURE must be a number")?,
            None => defaults.report_temperature,
        };

        let config = Self {
            call_timeout: Duration::from_secs(call_timeout_secs),
            max_retries,
            retry_backoff: Duration::from_millis(retry_backoff_ms),
            report_temperature,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.call_timeout.is_zero() {
            anyhow::bail!("call timeout must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.report_temperature) {
            anyhow::bail!(
                "report temperature must be within 0.0..=2.0, got {}",
                self.report_temperature
            );
        }
        Ok(())
    }
}
