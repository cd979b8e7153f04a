use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticker::Ticker;

/// Recommended trade action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Wire token used by the generation service
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Strict parse of the wire token. An unrecognized token is a schema violation.
    pub fn from_wire(token: &str) -> Option<Self> {
        match token {
            "BUY" => Some(Action::Buy),
            "SELL" => Some(Action::Sell),
            "HOLD" => Some(Action::Hold),
            _ => None,
        }
    }
}

/// Exchange session state at report time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::Open => "OPEN",
            MarketStatus::Closed => "CLOSED",
        }
    }

    pub fn from_wire(token: &str) -> Option<Self> {
        match token {
            "OPEN" => Some(MarketStatus::Open),
            "CLOSED" => Some(MarketStatus::Closed),
            _ => None,
        }
    }
}

/// News sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn from_wire(token: &str) -> Option<Self> {
        match token {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

/// Structured analysis snapshot for one ticker.
///
/// Every value is a display string exactly as the upstream service wrote it
/// (currency symbols, signs and percent marks included). Nothing here is meant
/// to be parsed back into a number except by the display helpers in
/// [`crate::signals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub price: String,
    /// Signed, e.g. "+1.10"
    pub change: String,
    /// Signed, e.g. "+0.98%"
    pub change_percent: String,
    /// `None` when the upstream payload left the key out
    #[serde(default)]
    pub market_status: Option<MarketStatus>,
    pub trend: String,
    pub support: String,
    pub resistance: String,
    #[serde(default)]
    pub action: Option<Action>,
    /// Percentage string, e.g. "82%"
    pub confidence: String,
    pub entry_point: String,
    pub stop_loss: String,
    pub take_profit: String,
    pub analysis: String,
    pub fundamentals: String,
    pub capital_flow: String,
}

/// One news headline with sentiment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    /// Relative time text, e.g. "30分钟前"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Where a piece of a query result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Parsed from a live generation-service response
    Live,
    /// No credential configured; deterministic demo data
    Demo,
    /// Upstream failed; error-state data
    Fallback,
}

/// Report and news for one ticker, delivered as a single unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub ticker: Ticker,
    pub report: Report,
    pub news: Vec<NewsItem>,
    pub report_source: DataSource,
    pub news_source: DataSource,
    pub generated_at: DateTime<Utc>,
}

impl QueryResult {
    /// True when both halves came from the live service
    pub fn is_live(&self) -> bool {
        self.report_source == DataSource::Live && self.news_source == DataSource::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_report() -> Report {
        Report {
            price: "113.80".to_string(),
            change: "+1.10".to_string(),
            change_percent: "+0.98%".to_string(),
            market_status: Some(MarketStatus::Open),
            trend: "震荡上行".to_string(),
            support: "HK$110.50".to_string(),
            resistance: "HK$118.20".to_string(),
            action: Some(Action::Buy),
            confidence: "82%".to_string(),
            entry_point: "HK$112.00".to_string(),
            stop_loss: "HK$108.00".to_string(),
            take_profit: "HK$125.00".to_string(),
            analysis: "分析".to_string(),
            fundamentals: "基本面".to_string(),
            capital_flow: "资金流".to_string(),
        }
    }

    #[test]
    fn test_report_uses_camel_case_wire_keys() {
        let value = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(value["changePercent"], "+0.98%");
        assert_eq!(value["marketStatus"], "OPEN");
        assert_eq!(value["action"], "BUY");
        assert_eq!(value["capitalFlow"], "资金流");
        assert!(value.get("change_percent").is_none());
    }

    #[test]
    fn test_report_without_enum_keys_deserializes() {
        let mut value = serde_json::to_value(sample_report()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("action");
        obj.remove("marketStatus");

        let report: Report = serde_json::from_value(value).unwrap();
        assert_eq!(report.action, None);
        assert_eq!(report.market_status, None);
    }

    #[test]
    fn test_news_item_omits_absent_optionals() {
        let item = NewsItem {
            title: "t".to_string(),
            url: "#".to_string(),
            source: "ETNet".to_string(),
            published_time: None,
            sentiment: None,
            summary: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"title": "t", "url": "#", "source": "ETNet"}));
    }

    #[test]
    fn test_enum_wire_tokens_are_strict() {
        assert_eq!(Action::from_wire("HOLD"), Some(Action::Hold));
        assert_eq!(Action::from_wire("hold"), None);
        assert_eq!(Action::from_wire("STRONG_BUY"), None);
        assert_eq!(MarketStatus::from_wire("CLOSED"), Some(MarketStatus::Closed));
        assert_eq!(MarketStatus::from_wire("PRE_MARKET"), None);
        assert_eq!(Sentiment::from_wire("neutral"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::from_wire("bullish"), None);
    }
}
