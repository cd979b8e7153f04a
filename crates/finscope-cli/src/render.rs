use insight_core::links::{aastocks_url, futu_url};
use insight_core::{CapitalFlowReading, GaugeZone, PriceDirection, QueryResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Readings {
    direction: PriceDirection,
    gauge_value: f64,
    gauge_zone: GaugeZone,
    capital_flow: CapitalFlowReading,
    flow_intensity: f64,
}

#[derive(Debug, Serialize)]
struct Links {
    aastocks: String,
    futu: String,
}

/// One dashboard refresh as emitted on stdout
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    #[serde(flatten)]
    result: &'a QueryResult,
    readings: Readings,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Links>,
}

impl<'a> DashboardView<'a> {
    pub fn new(result: &'a QueryResult, show_links: bool) -> Self {
        let report = &result.report;
        let capital_flow = report.capital_flow_reading();

        Self {
            result,
            readings: Readings {
                direction: report.direction(),
                gauge_value: report.gauge_value(),
                gauge_zone: report.gauge_zone(),
                flow_intensity: capital_flow.intensity(),
                capital_flow,
            },
            links: show_links.then(|| Links {
                aastocks: aastocks_url(&result.ticker),
                futu: futu_url(&result.ticker),
            }),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
