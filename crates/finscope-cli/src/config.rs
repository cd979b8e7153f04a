use anyhow::{Context, Result};
use insight_core::{Ticker, DEFAULT_TICKER};
use std::env;

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Queried once at startup before any input is read
    pub default_ticker: Ticker,
    pub pretty: bool,
    pub show_links: bool,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_ticker = var("FINSCOPE_DEFAULT_TICKER").unwrap_or_else(|| DEFAULT_TICKER.to_string());
        let default_ticker = Ticker::parse(&raw_ticker).context("FINSCOPE_DEFAULT_TICKER is not a valid stock code")?;

        Ok(Self {
            default_ticker,
            pretty: flag(&var, "FINSCOPE_PRETTY", false)?,
            show_links: flag(&var, "FINSCOPE_LINKS", true)?,
        })
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> Result<bool> {
    match var(name) {
        Some(v) => parse_flag(&v).with_context(|| format!("{} must be true/false", name)),
        None => Ok(default),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
