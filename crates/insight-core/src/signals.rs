//! Display-side readings derived from a [`Report`].
//!
//! These never feed back into the pipeline. They turn the free-text report
//! fields into the small set of values a dashboard needs for colouring and
//! gauges, following the China/HK convention (red = up, green = down).

use serde::{Deserialize, Serialize};

use crate::types::{Action, Report};

/// Confidence assumed when the report's percentage cannot be read
const DEFAULT_CONFIDENCE: u32 = 50;

const INFLOW_KEYWORDS: &[&str] = &["流入", "买入", "吸纳", "增持"];
const OUTFLOW_KEYWORDS: &[&str] = &["流出", "卖出", "减持", "拋售"];

/// Unit for capital-flow amounts (10^8)
const YI: &str = "亿";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeZone {
    Bullish,
    Neutral,
    Bearish,
}

impl GaugeZone {
    pub fn from_value(value: f64) -> Self {
        if value > 55.0 {
            GaugeZone::Bullish
        } else if value < 45.0 {
            GaugeZone::Bearish
        } else {
            GaugeZone::Neutral
        }
    }
}

impl Report {
    /// Direction implied by the explicit sign on `change`
    pub fn direction(&self) -> PriceDirection {
        if self.change.contains('+') {
            PriceDirection::Up
        } else if self.change.contains('-') {
            PriceDirection::Down
        } else {
            PriceDirection::Flat
        }
    }

    /// Leading integer of the confidence string ("82%" -> 82)
    pub fn confidence_value(&self) -> Option<u32> {
        let digits: String = self
            .confidence
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Bull/bear gauge in 0..=100: HOLD (or no action) sits at 50, BUY and
    /// SELL move away from the centre by half the confidence. A zero or
    /// unreadable confidence counts as 50.
    pub fn gauge_value(&self) -> f64 {
        let confidence = self
            .confidence_value()
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_CONFIDENCE) as f64;
        let value = match self.action {
            Some(Action::Buy) => 50.0 + confidence / 2.0,
            Some(Action::Sell) => 50.0 - confidence / 2.0,
            Some(Action::Hold) | None => 50.0,
        };
        value.clamp(0.0, 100.0)
    }

    pub fn gauge_zone(&self) -> GaugeZone {
        GaugeZone::from_value(self.gauge_value())
    }

    pub fn capital_flow_reading(&self) -> CapitalFlowReading {
        CapitalFlowReading::from_text(&self.capital_flow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Inflow,
    Outflow,
    Neutral,
}

/// Keyword reading of the capital-flow narrative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalFlowReading {
    pub direction: FlowDirection,
    /// First amount quoted in 亿, if any
    pub amount_yi: Option<f64>,
}

impl CapitalFlowReading {
    pub fn from_text(text: &str) -> Self {
        let inflow = INFLOW_KEYWORDS.iter().any(|k| text.contains(k));
        let outflow = OUTFLOW_KEYWORDS.iter().any(|k| text.contains(k));

        // Mixed wording is read as neutral
        let direction = match (inflow, outflow) {
            (true, false) => FlowDirection::Inflow,
            (false, true) => FlowDirection::Outflow,
            _ => FlowDirection::Neutral,
        };

        Self {
            direction,
            amount_yi: first_yi_amount(text),
        }
    }

    /// Bar intensity in 20..=100, scaled from the amount (1 亿 assumed when absent)
    pub fn intensity(&self) -> f64 {
        (self.amount_yi.unwrap_or(1.0) * 10.0).clamp(20.0, 100.0)
    }
}

fn first_yi_amount(text: &str) -> Option<f64> {
    text.match_indices(YI).find_map(|(idx, _)| {
        let head = &text[..idx];
        let start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
            .last()
            .map(|(i, _)| i)?;
        head[start..].trim_start_matches('.').parse::<f64>().ok()
    })
}
