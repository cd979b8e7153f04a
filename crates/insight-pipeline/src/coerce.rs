use std::fmt;

use insight_core::{
    Action, InsightError, InsightResult, MarketStatus, NewsItem, Report, Sentiment,
};
use serde_json::{Map, Value};

use crate::extract::extract_json;

/// A coerced value plus the expected keys the payload left out.
///
/// Missing display fields are carried as empty strings rather than rejected;
/// `missing` keeps the record so callers can log the mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub missing: Vec<String>,
}

impl<T> Coerced<T> {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// The tolerated mismatch as an error value, for logging
    pub fn mismatch(&self) -> Option<InsightError> {
        if self.missing.is_empty() {
            None
        } else {
            Some(InsightError::SchemaMismatch {
                missing: self.missing.clone(),
            })
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Required display string. Absent or null becomes "" and is recorded;
/// any non-string JSON type is a violation.
fn text_field(
    obj: &Map<String, Value>,
    key: &str,
    prefix: &str,
    missing: &mut Vec<String>,
) -> InsightResult<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            missing.push(format!("{}{}", prefix, key));
            Ok(String::new())
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(InsightError::Schema(format!(
            "field `{}{}` must be a string, got {}",
            prefix,
            key,
            type_name(other)
        ))),
    }
}

fn optional_text(obj: &Map<String, Value>, key: &str, prefix: &str) -> InsightResult<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(InsightError::Schema(format!(
            "field `{}{}` must be a string, got {}",
            prefix,
            key,
            type_name(other)
        ))),
    }
}

/// Closed-enum field. Absent or null is recorded as missing; an unknown
/// token or a non-string is a violation.
fn enum_field<T>(
    obj: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
    missing: &mut Vec<String>,
) -> InsightResult<Option<T>> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            missing.push(key.to_string());
            Ok(None)
        }
        Some(Value::String(token)) => parse(token).map(Some).ok_or_else(|| {
            InsightError::Schema(format!("field `{}` has unsupported value {:?}", key, token))
        }),
        Some(other) => Err(InsightError::Schema(format!(
            "field `{}` must be a string, got {}",
            key,
            type_name(other)
        ))),
    }
}

/// Map an extracted JSON value onto a [`Report`].
pub fn coerce_report(value: &Value) -> InsightResult<Coerced<Report>> {
    let obj = value.as_object().ok_or_else(|| {
        InsightError::Schema(format!("report must be a JSON object, got {}", type_name(value)))
    })?;

    let mut missing = Vec::new();
    let mut text = |key: &str| text_field(obj, key, "", &mut missing);

    let price = text("price")?;
    let change = text("change")?;
    let change_percent = text("changePercent")?;
    let trend = text("trend")?;
    let support = text("support")?;
    let resistance = text("resistance")?;
    let confidence = text("confidence")?;
    let entry_point = text("entryPoint")?;
    let stop_loss = text("stopLoss")?;
    let take_profit = text("takeProfit")?;
    let analysis = text("analysis")?;
    let fundamentals = text("fundamentals")?;
    let capital_flow = text("capitalFlow")?;

    let market_status = enum_field(obj, "marketStatus", MarketStatus::from_wire, &mut missing)?;
    let action = enum_field(obj, "action", Action::from_wire, &mut missing)?;

    let report = Report {
        price,
        change,
        change_percent,
        market_status,
        trend,
        support,
        resistance,
        action,
        confidence,
        entry_point,
        stop_loss,
        take_profit,
        analysis,
        fundamentals,
        capital_flow,
    };

    Ok(Coerced {
        value: report,
        missing,
    })
}

/// Map an extracted JSON value onto a list of [`NewsItem`]s, keeping upstream order.
pub fn coerce_news(value: &Value) -> InsightResult<Coerced<Vec<NewsItem>>> {
    let entries = value.as_array().ok_or_else(|| {
        InsightError::Schema(format!("news must be a JSON array, got {}", type_name(value)))
    })?;

    let mut missing = Vec::new();
    let mut items = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let prefix = format!("[{}].", idx);
        let obj = entry.as_object().ok_or_else(|| {
            InsightError::Schema(format!("news item {} must be an object, got {}", idx, type_name(entry)))
        })?;

        let sentiment = match optional_text(obj, "sentiment", &prefix)? {
            Some(label) => {
                let parsed = Sentiment::from_wire(&label);
                if parsed.is_none() {
                    tracing::warn!("News item {} has unknown sentiment {:?}; treating as absent", idx, label);
                }
                parsed
            }
            None => None,
        };

        items.push(NewsItem {
            title: text_field(obj, "title", &prefix, &mut missing)?,
            url: text_field(obj, "url", &prefix, &mut missing)?,
            source: text_field(obj, "source", &prefix, &mut missing)?,
            published_time: optional_text(obj, "publishedTime", &prefix)?,
            sentiment,
            summary: optional_text(obj, "summary", &prefix)?,
        });
    }

    Ok(Coerced {
        value: items,
        missing,
    })
}

/// Which result shape a raw response is expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Report,
    News,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Report => f.write_str("report"),
            PayloadKind::News => f.write_str("news"),
        }
    }
}

/// Boundary result for an untrusted upstream response
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    Report(Report),
    News(Vec<NewsItem>),
    Failed { raw_text: String, error: InsightError },
}

impl ParsedPayload {
    pub fn into_report(self) -> InsightResult<Report> {
        match self {
            ParsedPayload::Report(report) => Ok(report),
            ParsedPayload::News(_) => Err(InsightError::Schema("expected a report, got news".to_string())),
            ParsedPayload::Failed { error, .. } => Err(error),
        }
    }

    pub fn into_news(self) -> InsightResult<Vec<NewsItem>> {
        match self {
            ParsedPayload::News(items) => Ok(items),
            ParsedPayload::Report(_) => Err(InsightError::Schema("expected news, got a report".to_string())),
            ParsedPayload::Failed { error, .. } => Err(error),
        }
    }
}

/// Extract and coerce a raw response. Never panics, never propagates.
pub fn parse_payload(kind: PayloadKind, raw: &str) -> ParsedPayload {
    let value = match extract_json(raw) {
        Ok(value) => value,
        Err(error) => {
            return ParsedPayload::Failed {
                raw_text: raw.to_string(),
                error,
            }
        }
    };

    let coerced = match kind {
        PayloadKind::Report => coerce_report(&value).map(|c| (c.mismatch(), ParsedPayload::Report(c.value))),
        PayloadKind::News => coerce_news(&value).map(|c| (c.mismatch(), ParsedPayload::News(c.value))),
    };

    match coerced {
        Ok((mismatch, payload)) => {
            if let Some(mismatch) = mismatch {
                tracing::warn!("Accepting incomplete {} payload: {}", kind, mismatch);
            }
            payload
        }
        Err(error) => ParsedPayload::Failed {
            raw_text: raw.to_string(),
            error,
        },
    }
}
