use std::time::Duration;

use insight_core::{Action, MarketStatus, NewsItem, Report, Sentiment, Ticker};

/// Trend marker carried by the error-state report
pub const DATA_ERR: &str = "DATA_ERR";

const PLACEHOLDER: &str = "---";

/// Deterministic substitute data.
///
/// Demo data stands in when no credential is configured and is delayed to
/// mimic a real round trip. Error data stands in after an upstream failure
/// and is returned immediately.
#[derive(Debug, Clone)]
pub struct FallbackProvider {
    report_latency: Duration,
    news_latency: Duration,
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self {
            report_latency: Duration::from_millis(1500),
            news_latency: Duration::from_millis(1000),
        }
    }
}

impl FallbackProvider {
    pub fn new(report_latency: Duration, news_latency: Duration) -> Self {
        Self {
            report_latency,
            news_latency,
        }
    }

    /// Same latency for both kinds
    pub fn with_latency(latency: Duration) -> Self {
        Self::new(latency, latency)
    }

    pub async fn demo_report(&self, ticker: &Ticker) -> Report {
        tracing::debug!("Serving demo report for {} after {:?}", ticker, self.report_latency);
        tokio::time::sleep(self.report_latency).await;
        demo_report()
    }

    pub async fn demo_news(&self, ticker: &Ticker) -> Vec<NewsItem> {
        tracing::debug!("Serving demo news for {} after {:?}", ticker, self.news_latency);
        tokio::time::sleep(self.news_latency).await;
        demo_news(ticker)
    }

    pub fn error_report(&self) -> Report {
        error_report()
    }

    /// Empty on purpose: mock headlines must never pass for real results.
    pub fn error_news(&self) -> Vec<NewsItem> {
        Vec::new()
    }

    /// True for the sentinel produced by [`error_report`]
    pub fn is_error_report(report: &Report) -> bool {
        report.trend == DATA_ERR
    }
}

/// Rich, internally consistent report used in demo mode
pub fn demo_report() -> Report {
    Report {
        price: "113.80".to_string(),
        change: "+1.10".to_string(),
        change_percent: "+0.98%".to_string(),
        market_status: Some(MarketStatus::Open),
        trend: "震荡上行 (Bullish)".to_string(),
        support: "HK$110.50".to_string(),
        resistance: "HK$118.20".to_string(),
        action: Some(Action::Buy),
        confidence: "82%".to_string(),
        entry_point: "HK$112.00".to_string(),
        stop_loss: "HK$108.00".to_string(),
        take_profit: "HK$125.00".to_string(),
        analysis: "技术面显示均线系统呈多头排列，MACD 于零轴上方金叉，显示短期动能强劲。\
                   昨日股价突破 20 天移动平均线，成交量配合放大。基本面上，市场预期季度业绩将超出指引，\
                   主要受惠于 AI 业务扩张。建议投资者分批吸纳。"
            .to_string(),
        fundamentals: "市盈率 (PE) 约 15.2倍，低于行业平均。季度盈利同比增长 12.5%。".to_string(),
        capital_flow: "今日南向资金净流入约 2.3亿港元，大单买入占比 58%。".to_string(),
    }
}

/// Demo headlines; the first one names the ticker
pub fn demo_news(ticker: &Ticker) -> Vec<NewsItem> {
    vec![
        NewsItem {
            title: format!("[财报] {} 季度营收超预期，AI 业务成新增长引擎", ticker),
            url: "#".to_string(),
            source: "AASTOCKS".to_string(),
            published_time: Some("30分钟前".to_string()),
            sentiment: Some(Sentiment::Positive),
            summary: Some("营收同比增长20%，净利润超出市场预期5%。".to_string()),
        },
        NewsItem {
            title: "南向资金连续3日大幅增持，累计吸纳超5亿元".to_string(),
            url: "#".to_string(),
            source: "ETNet".to_string(),
            published_time: Some("2小时前".to_string()),
            sentiment: Some(Sentiment::Positive),
            summary: Some("内地资金持续流入，显示看好后市。".to_string()),
        },
        NewsItem {
            title: "大市回调，科技股普遍受压".to_string(),
            url: "#".to_string(),
            source: "HKEJ".to_string(),
            published_time: Some("4小时前".to_string()),
            sentiment: Some(Sentiment::Negative),
            summary: Some("恒生科技指数今日下跌，气氛偏弱。".to_string()),
        },
    ]
}

/// Sentinel report signalling that the upstream service failed
pub fn error_report() -> Report {
    Report {
        price: PLACEHOLDER.to_string(),
        change: "0.00".to_string(),
        change_percent: "0.00%".to_string(),
        market_status: Some(MarketStatus::Closed),
        trend: DATA_ERR.to_string(),
        support: PLACEHOLDER.to_string(),
        resistance: PLACEHOLDER.to_string(),
        action: Some(Action::Hold),
        confidence: "0%".to_string(),
        entry_point: PLACEHOLDER.to_string(),
        stop_loss: PLACEHOLDER.to_string(),
        take_profit: PLACEHOLDER.to_string(),
        analysis: "无法获取最新数据，请检查 API 设置或稍后重试。".to_string(),
        fundamentals: "N/A".to_string(),
        capital_flow: "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::PriceDirection;
    use std::time::Instant;

    #[test]
    fn test_error_report_sentinels() {
        let report = error_report();
        assert_eq!(report.action, Some(Action::Hold));
        assert_eq!(report.confidence, "0%");
        assert_eq!(report.trend, DATA_ERR);
        assert_eq!(report.price, "---");
        assert_eq!(report.direction(), PriceDirection::Flat);
        assert!(FallbackProvider::is_error_report(&report));
        assert!(!FallbackProvider::is_error_report(&demo_report()));
    }

    #[test]
    fn test_demo_report_is_consistent() {
        let report = demo_report();
        assert_eq!(report.action, Some(Action::Buy));
        assert_eq!(report.direction(), PriceDirection::Up);
        assert!(report.change_percent.starts_with('+'));
        assert_eq!(report.confidence_value(), Some(82));
    }

    #[test]
    fn test_demo_news_names_ticker() {
        let ticker = Ticker::parse("1810").unwrap();
        let news = demo_news(&ticker);
        assert_eq!(news.len(), 3);
        assert!(news[0].title.contains("01810"));
        assert!(news.iter().all(|n| n.sentiment.is_some()));
    }

    #[tokio::test]
    async fn test_demo_data_waits_for_latency() {
        let provider = FallbackProvider::with_latency(Duration::from_millis(40));
        let ticker = Ticker::parse("700").unwrap();

        let started = Instant::now();
        let report = provider.demo_report(&ticker).await;
        assert!(started.elapsed() >= Duration::from_millis(40));
        assert_eq!(report, demo_report());

        let started = Instant::now();
        let news = provider.demo_news(&ticker).await;
        assert!(started.elapsed() >= Duration::from_millis(40));
        assert_eq!(news.len(), 3);
    }

    #[test]
    fn test_error_news_is_empty() {
        assert!(FallbackProvider::default().error_news().is_empty());
    }
}
