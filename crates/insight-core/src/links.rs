//! Ticker-keyed link-out URLs for the presentation layer.

use crate::ticker::Ticker;

const AASTOCKS_ANALYSIS_URL: &str =
    "http://www.aastocks.com/tc/stocks/analysis/stock-aafn-con/quote.aspx";
const FUTU_QUOTE_URL: &str = "https://www.futunn.com/hk/stock";

/// AASTOCKS analysis page
pub fn aastocks_url(ticker: &Ticker) -> String {
    format!("{}?symbol={}", AASTOCKS_ANALYSIS_URL, ticker)
}

/// Futu quote page
pub fn futu_url(ticker: &Ticker) -> String {
    format!("{}/{}-HK", FUTU_QUOTE_URL, ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_out_urls_use_canonical_code() {
        let ticker = Ticker::parse("700").unwrap();
        assert_eq!(
            aastocks_url(&ticker),
            "http://www.aastocks.com/tc/stocks/analysis/stock-aafn-con/quote.aspx?symbol=00700"
        );
        assert_eq!(futu_url(&ticker), "https://www.futunn.com/hk/stock/00700-HK");
    }
}
