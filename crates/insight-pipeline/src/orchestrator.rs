use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use genai_client::TextGenerator;
use insight_core::{NewsItem, QueryResult, Report, Ticker};

use crate::fallback::FallbackProvider;
use crate::pipeline::{fetch_news, fetch_report, PipelineOutcome};
use crate::PipelineConfig;

/// Fans one ticker out to the report and news pipelines and fans the results
/// back in as a single [`QueryResult`].
///
/// Holds no per-query state. Discarding results for a superseded ticker is
/// the caller's job (see [`crate::DashboardSession::accept`]).
#[derive(Clone)]
pub struct InsightOrchestrator {
    generator: Option<Arc<dyn TextGenerator>>,
    fallback: FallbackProvider,
    config: PipelineConfig,
}

impl InsightOrchestrator {
    /// `generator == None` runs in demo mode
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, config: PipelineConfig) -> Self {
        Self {
            generator,
            fallback: FallbackProvider::default(),
            config,
        }
    }

    pub fn demo() -> Self {
        Self::new(None, PipelineConfig::default())
    }

    pub fn with_fallback(mut self, fallback: FallbackProvider) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn is_demo(&self) -> bool {
        self.generator.is_none()
    }

    pub fn backend_name(&self) -> &'static str {
        self.generator
            .as_ref()
            .map(|g| g.backend_name())
            .unwrap_or("demo")
    }

    pub async fn report(&self, ticker: &Ticker) -> PipelineOutcome<Report> {
        fetch_report(self.generator.as_deref(), ticker, &self.fallback, &self.config).await
    }

    pub async fn news(&self, ticker: &Ticker) -> PipelineOutcome<Vec<NewsItem>> {
        fetch_news(self.generator.as_deref(), ticker, &self.fallback, &self.config).await
    }

    /// Run both pipelines concurrently. Always resolves; failures inside
    /// either pipeline surface as fallback data, never as an error.
    pub async fn run(&self, ticker: &Ticker) -> QueryResult {
        tracing::info!("Starting insight query for {} (backend: {})", ticker, self.backend_name());
        let started = Instant::now();

        let (report, news) = tokio::join!(self.report(ticker), self.news(ticker));

        tracing::info!(
            "Insight query for {} finished in {:.1}s (report: {:?}, news: {:?} x{})",
            ticker,
            started.elapsed().as_secs_f64(),
            report.source,
            news.source,
            news.value.len()
        );

        QueryResult {
            ticker: ticker.clone(),
            report: report.value,
            news: news.value,
            report_source: report.source,
            news_source: news.source,
            generated_at: Utc::now(),
        }
    }
}
