use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InsightError;

/// Width of a canonical exchange code
pub const TICKER_WIDTH: usize = 5;

/// Market suffix users commonly type after the code
pub const MARKET_SUFFIX: &str = ".HK";

/// Ticker queried when nothing else was asked for
pub const DEFAULT_TICKER: &str = "00700";

/// Canonical exchange security code: exactly five ASCII digits, zero-padded.
///
/// The only way to obtain one is through [`Ticker::parse`], so every value in
/// circulation satisfies the width invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and canonicalize free-text user input.
    ///
    /// Trims whitespace, strips a trailing `.HK` (any case), then requires one to
    /// five digits. "700", "0700" and "700.hk" all become "00700".
    pub fn parse(input: &str) -> Result<Self, InsightError> {
        let trimmed = input.trim();
        let code = strip_market_suffix(trimmed);

        if code.is_empty() || code.len() > TICKER_WIDTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InsightError::Validation(format!(
                "'{}' is not a 1-{} digit stock code (e.g. 0700 or 1810)",
                trimmed, TICKER_WIDTH
            )));
        }

        Ok(Ticker(format!("{:0>width$}", code, width = TICKER_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Code with the market suffix, as used in prompts ("00700.HK")
    pub fn with_market_suffix(&self) -> String {
        format!("{}{}", self.0, MARKET_SUFFIX)
    }
}

fn strip_market_suffix(code: &str) -> &str {
    let split = code.len().saturating_sub(MARKET_SUFFIX.len());
    match (code.get(..split), code.get(split..)) {
        (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(MARKET_SUFFIX) => head,
        _ => code,
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker(DEFAULT_TICKER.to_string())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
