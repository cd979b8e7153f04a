use insight_core::Ticker;

/// Number of headlines requested from the news prompt
pub const NEWS_ITEM_COUNT: usize = 4;

/// Instruction for the structured market report.
///
/// Asks for a web-searched real-time quote, technical and fundamental analysis,
/// and exactly one JSON object with the report keys, written in Simplified
/// Chinese with the red-up/green-down convention.
pub fn report_prompt(ticker: &Ticker) -> String {
    let symbol = ticker.with_market_suffix();
    format!(
        r#"You are a Senior Quantitative Analyst for a professional trading terminal (FinScope).

Target: Hong Kong Stock {symbol}.

Task:
1. Use Google Search to find the REAL-TIME PRICE, Change, and Change% for {symbol}.
2. Analyze Technicals (MACD, RSI, MA, trend, support, resistance) and Fundamentals.
3. Output exactly ONE strictly valid JSON object and nothing else.

CRITICAL:
- Language: SIMPLIFIED CHINESE (简体中文).
- China/HK Market Style: Red represents PRICE UP (+), Green represents PRICE DOWN (-).
- Ensure 'change' and 'changePercent' include a '+' or '-' sign.
- Be strictly factual with the price. Do not invent a quote.
- 'marketStatus' must be exactly "OPEN" or "CLOSED".
- 'action' must be exactly "BUY", "SELL" or "HOLD".
- Every value is a JSON string.

JSON Structure:
{{
  "price": "Current Price (e.g. 113.80)",
  "change": "Price Change (e.g. +1.10)",
  "changePercent": "Percentage Change (e.g. +0.98%)",
  "marketStatus": "OPEN" or "CLOSED",
  "trend": "Short trend summary",
  "support": "Support level",
  "resistance": "Resistance level",
  "action": "BUY" | "SELL" | "HOLD",
  "confidence": "Confidence % (e.g. 85%)",
  "entryPoint": "Entry price",
  "stopLoss": "Stop loss",
  "takeProfit": "Target price",
  "analysis": "Detailed analysis paragraph (Simplified Chinese).",
  "fundamentals": "Fundamental summary.",
  "capitalFlow": "Capital flow summary."
}}
"#
    )
}

/// Instruction for the news digest: one JSON array of the top headlines.
pub fn news_prompt(ticker: &Ticker) -> String {
    let symbol = ticker.with_market_suffix();
    format!(
        r#"Search news for {symbol}.
Return exactly ONE STRICT JSON array of the top {count} most recent news items and nothing else.
Analyze sentiment for each item (positive/negative/neutral).
Language: SIMPLIFIED CHINESE (简体中文) for titles and summaries.

JSON Structure:
[{{
  "title": "Title (Simplified Chinese)",
  "source": "Source",
  "url": "Link",
  "publishedTime": "Time ago",
  "sentiment": "positive" | "negative" | "neutral",
  "summary": "Brief summary (Simplified Chinese)"
}}]
"#,
        count = NEWS_ITEM_COUNT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_prompt_targets_ticker() {
        let ticker = Ticker::parse("700").unwrap();
        let prompt = report_prompt(&ticker);
        assert!(prompt.contains("Hong Kong Stock 00700.HK"));
        assert!(prompt.contains("SIMPLIFIED CHINESE"));
        assert!(prompt.contains("Red represents PRICE UP"));
        for key in [
            "\"price\"", "\"change\"", "\"changePercent\"", "\"marketStatus\"", "\"trend\"",
            "\"support\"", "\"resistance\"", "\"action\"", "\"confidence\"", "\"entryPoint\"",
            "\"stopLoss\"", "\"takeProfit\"", "\"analysis\"", "\"fundamentals\"", "\"capitalFlow\"",
        ] {
            assert!(prompt.contains(key), "missing {}", key);
        }
        // Literal braces survive formatting
        assert!(prompt.contains("JSON Structure:\n{\n"));
    }

    #[test]
    fn test_news_prompt_requests_four_items() {
        let ticker = Ticker::parse("1810").unwrap();
        let prompt = news_prompt(&ticker);
        assert!(prompt.starts_with("Search news for 01810.HK."));
        assert!(prompt.contains("top 4 most recent"));
        assert!(prompt.contains("\"sentiment\": \"positive\" | \"negative\" | \"neutral\""));
        assert!(prompt.contains("[{\n"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let ticker = Ticker::parse("5").unwrap();
        assert_eq!(report_prompt(&ticker), report_prompt(&ticker));
        assert_eq!(news_prompt(&ticker), news_prompt(&ticker));
        assert_ne!(report_prompt(&ticker), news_prompt(&ticker));
    }
}
