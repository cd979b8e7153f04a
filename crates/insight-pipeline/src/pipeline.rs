use genai_client::{GenAiError, GenerationOptions, TextGenerator};
use insight_core::{DataSource, InsightError, NewsItem, Report, Ticker};

use crate::coerce::{parse_payload, ParsedPayload, PayloadKind};
use crate::fallback::FallbackProvider;
use crate::prompts::{news_prompt, report_prompt};
use crate::PipelineConfig;

/// Typed result of one request kind plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> PipelineOutcome<T> {
    fn live(value: T) -> Self {
        Self { value, source: DataSource::Live }
    }

    fn demo(value: T) -> Self {
        Self { value, source: DataSource::Demo }
    }

    fn fallback(value: T) -> Self {
        Self { value, source: DataSource::Fallback }
    }
}

/// One generation call under the configured timeout, with bounded retries
/// for transient failures.
async fn generate_with_policy(
    generator: &dyn TextGenerator,
    prompt: &str,
    options: &GenerationOptions,
    config: &PipelineConfig,
) -> Result<String, GenAiError> {
    let mut attempt = 0u32;
    loop {
        let result = match tokio::time::timeout(config.call_timeout, generator.generate(prompt, options)).await {
            Ok(result) => result,
            Err(_) => Err(GenAiError::Timeout),
        };

        match result {
            Ok(text) => return Ok(text),
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                attempt += 1;
                tracing::warn!(
                    "{} call failed ({}), retry {}/{} in {:?}",
                    generator.backend_name(),
                    e,
                    attempt,
                    config.max_retries,
                    config.retry_backoff
                );
                tokio::time::sleep(config.retry_backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Fetch, extract and coerce one payload. Every failure is converted to an
/// [`InsightError`] here so callers only decide on the fallback.
async fn fetch_payload(
    generator: &dyn TextGenerator,
    kind: PayloadKind,
    ticker: &Ticker,
    prompt: &str,
    options: &GenerationOptions,
    config: &PipelineConfig,
) -> Result<ParsedPayload, InsightError> {
    let text = generate_with_policy(generator, prompt, options, config)
        .await
        .map_err(|e| InsightError::Service(e.to_string()))?;

    tracing::debug!("Received {} chars of {} text for {}", text.chars().count(), kind, ticker);
    Ok(parse_payload(kind, &text))
}

fn log_absorbed(kind: PayloadKind, ticker: &Ticker, error: &InsightError) {
    match error.raw_text() {
        Some(raw) => tracing::error!(
            "Failed to parse {} response for {}: {}. Raw text: {}",
            kind,
            ticker,
            error,
            raw
        ),
        None => tracing::warn!("{} pipeline for {} fell back: {}", kind, ticker, error),
    }
}

/// Report path: demo data without a generator, error-state report on any failure.
pub async fn fetch_report(
    generator: Option<&dyn TextGenerator>,
    ticker: &Ticker,
    fallback: &FallbackProvider,
    config: &PipelineConfig,
) -> PipelineOutcome<Report> {
    let Some(generator) = generator else {
        return PipelineOutcome::demo(fallback.demo_report(ticker).await);
    };

    let prompt = report_prompt(ticker);
    let options = GenerationOptions::factual(config.report_temperature);

    let report = fetch_payload(generator, PayloadKind::Report, ticker, &prompt, &options, config)
        .await
        .and_then(|payload| payload.into_report());

    match report {
        Ok(report) => PipelineOutcome::live(report),
        Err(e) => {
            log_absorbed(PayloadKind::Report, ticker, &e);
            PipelineOutcome::fallback(fallback.error_report())
        }
    }
}

/// News path: demo headlines without a generator, an empty list on any failure.
pub async fn fetch_news(
    generator: Option<&dyn TextGenerator>,
    ticker: &Ticker,
    fallback: &FallbackProvider,
    config: &PipelineConfig,
) -> PipelineOutcome<Vec<NewsItem>> {
    let Some(generator) = generator else {
        return PipelineOutcome::demo(fallback.demo_news(ticker).await);
    };

    let prompt = news_prompt(ticker);
    let options = GenerationOptions::web_search();

    let news = fetch_payload(generator, PayloadKind::News, ticker, &prompt, &options, config)
        .await
        .and_then(|payload| payload.into_news());

    match news {
        Ok(items) => PipelineOutcome::live(items),
        Err(e) => {
            log_absorbed(PayloadKind::News, ticker, &e);
            PipelineOutcome::fallback(fallback.error_news())
        }
    }
}
