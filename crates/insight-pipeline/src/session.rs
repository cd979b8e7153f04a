use insight_core::{InsightResult, QueryResult, Ticker};
use serde::Serialize;

pub use insight_core::DEFAULT_TICKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Loading,
}

/// Caller-owned dashboard state: the displayed input, the active ticker,
/// the loading flag and the latest accepted result.
///
/// Results are matched to the active ticker on arrival, so a slow response
/// for a superseded query completes harmlessly and is dropped.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    input: String,
    active: Ticker,
    status: QueryStatus,
    result: Option<QueryResult>,
}

impl DashboardSession {
    pub fn new(initial: Ticker) -> Self {
        Self {
            input: initial.to_string(),
            active: initial,
            status: QueryStatus::Idle,
            result: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the displayed input text (user typing)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn active_ticker(&self) -> &Ticker {
        &self.active
    }

    pub fn status(&self) -> QueryStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// Start a query for `raw`.
    ///
    /// On success the canonical code replaces the displayed input, becomes
    /// the active ticker and the previous result is cleared. On a validation
    /// error nothing changes.
    pub fn submit(&mut self, raw: &str) -> InsightResult<Ticker> {
        let ticker = Ticker::parse(raw)?;

        self.input = ticker.to_string();
        self.active = ticker.clone();
        self.status = QueryStatus::Loading;
        self.result = None;

        Ok(ticker)
    }

    /// Submit whatever is currently in the input box
    pub fn submit_input(&mut self) -> InsightResult<Ticker> {
        let raw = self.input.clone();
        self.submit(&raw)
    }

    /// Store `result` if it belongs to the active ticker. Returns `false`
    /// (and changes nothing) for a stale result.
    pub fn accept(&mut self, result: QueryResult) -> bool {
        if result.ticker != self.active {
            tracing::debug!(
                "Discarding stale result for {} (active: {})",
                result.ticker,
                self.active
            );
            return false;
        }

        self.result = Some(result);
        self.status = QueryStatus::Idle;
        true
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(Ticker::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{news_json, report_json, Reply, ScriptedGenerator};
    use crate::{FallbackProvider, InsightOrchestrator, PipelineConfig};
    use insight_core::InsightError;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[test]
    fn test_default_session() {
        let session = DashboardSession::default();
        assert_eq!(session.input(), "00700");
        assert_eq!(session.active_ticker().as_str(), "00700");
        assert_eq!(session.status(), QueryStatus::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_submit_normalizes_visible_input() {
        let mut session = DashboardSession::default();
        session.set_input(" 1810.hk ");
        let ticker = session.submit_input().unwrap();
        assert_eq!(ticker.as_str(), "01810");
        assert_eq!(session.input(), "01810");
        assert_eq!(session.active_ticker(), &ticker);
        assert!(session.is_loading());
    }

    #[test]
    fn test_rejected_input_changes_nothing() {
        let mut session = DashboardSession::default();
        session.set_input("abc");
        let err = session.submit_input().unwrap_err();
        assert!(matches!(err, InsightError::Validation(_)));
        assert_eq!(session.input(), "abc");
        assert_eq!(session.active_ticker().as_str(), "00700");
        assert_eq!(session.status(), QueryStatus::Idle);
    }

    fn orchestrator(generator: ScriptedGenerator) -> InsightOrchestrator {
        let config = PipelineConfig {
            call_timeout: Duration::from_secs(2),
            max_retries: 0,
            retry_backoff: Duration::from_millis(1),
            report_temperature: 0.1,
        };
        InsightOrchestrator::new(Some(Arc::new(generator)), config)
            .with_fallback(FallbackProvider::with_latency(Duration::from_millis(1)))
    }

    /// Submit both tickers back to back, run both queries in the background
    /// and feed results to the session in completion order.
    async fn race(slow: &str, fast: &str, first: &str, second: &str) -> (DashboardSession, Vec<String>) {
        let orch = orchestrator(
            ScriptedGenerator::new()
                .report(Reply::Text(report_json("BUY")))
                .news(Reply::Text(news_json(&["n"])))
                .delay_for(slow, Duration::from_millis(120))
                .delay_for(fast, Duration::from_millis(10)),
        );

        let mut session = DashboardSession::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        for raw in [first, second] {
            let ticker = session.submit(raw).unwrap();
            let orch = orch.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(orch.run(&ticker).await);
            });
        }
        drop(tx);

        let mut arrival = Vec::new();
        while let Some(result) = rx.recv().await {
            arrival.push(result.ticker.to_string());
            session.accept(result);
        }
        (session, arrival)
    }

    #[tokio::test]
    async fn test_stale_result_arriving_last_is_discarded() {
        // 00700 is slow, so it settles after 01810
        let (session, arrival) = race("00700", "01810", "700", "1810").await;
        assert_eq!(arrival, vec!["01810", "00700"]);
        assert_eq!(session.result().unwrap().ticker.as_str(), "01810");
        assert_eq!(session.status(), QueryStatus::Idle);
    }

    #[tokio::test]
    async fn test_stale_result_arriving_first_is_discarded() {
        // 00700 is fast, so it settles first while 01810 is active
        let (session, arrival) = race("01810", "00700", "700", "1810").await;
        assert_eq!(arrival, vec!["00700", "01810"]);
        assert_eq!(session.result().unwrap().ticker.as_str(), "01810");
        assert_eq!(session.input(), "01810");
    }

    #[tokio::test]
    async fn test_stale_arrival_keeps_loading_state() {
        let orch = InsightOrchestrator::demo().with_fallback(FallbackProvider::with_latency(Duration::from_millis(1)));
        let mut session = DashboardSession::default();

        let stale_ticker = session.submit("700").unwrap();
        let stale = orch.run(&stale_ticker).await;
        session.submit("1810").unwrap();

        assert!(!session.accept(stale));
        assert!(session.is_loading());
        assert!(session.result().is_none());
    }
}
