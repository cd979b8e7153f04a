use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use genai_client::{GenAiError, GenAiResult, GenerationOptions, TextGenerator};
use serde_json::json;

/// Canned generator behaviour for one call
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Status(u16),
    Empty,
    /// Never answers within any sane test timeout
    Hang,
}

/// In-memory [`TextGenerator`] that answers from per-kind reply queues.
///
/// The news prompt is recognised by its opening line; everything else is a
/// report call. The last reply of a queue repeats once the queue drains.
#[derive(Default)]
pub struct ScriptedGenerator {
    report_replies: Mutex<VecDeque<Reply>>,
    news_replies: Mutex<VecDeque<Reply>>,
    delays: Vec<(String, Duration)>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, GenerationOptions)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(self, reply: Reply) -> Self {
        self.report_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn news(self, reply: Reply) -> Self {
        self.news_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Delay every call whose prompt mentions `code`
    pub fn delay_for(mut self, code: &str, delay: Duration) -> Self {
        self.delays.push((code.to_string(), delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, GenerationOptions)> {
        self.last_call.lock().unwrap().clone()
    }

    fn next_reply(&self, prompt: &str) -> Reply {
        let queue = if prompt.starts_with("Search news") {
            &self.news_replies
        } else {
            &self.report_replies
        };
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(Reply::Empty)
        } else {
            queue.front().cloned().unwrap_or(Reply::Empty)
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenAiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((prompt.to_string(), *options));

        let delay = self
            .delays
            .iter()
            .find(|(code, _)| prompt.contains(code.as_str()))
            .map(|(_, d)| *d);
        let reply = self.next_reply(prompt);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Status(status) => Err(GenAiError::Status {
                status,
                body: "scripted".to_string(),
            }),
            Reply::Empty => Err(GenAiError::EmptyResponse),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GenAiError::Timeout)
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// Report payload text with the given action token
pub fn report_json(action: &str) -> String {
    json!({
        "price": "38.55",
        "change": "-0.45",
        "changePercent": "-1.15%",
        "marketStatus": "CLOSED",
        "trend": "震荡下行",
        "support": "HK$37.00",
        "resistance": "HK$40.20",
        "action": action,
        "confidence": "64%",
        "entryPoint": "HK$37.50",
        "stopLoss": "HK$36.00",
        "takeProfit": "HK$42.00",
        "analysis": "短期承压",
        "fundamentals": "PE 22",
        "capitalFlow": "南向资金净流出约 1.2亿港元"
    })
    .to_string()
}

/// News payload text with one item per title
pub fn news_json(titles: &[&str]) -> String {
    let items: Vec<_> = titles
        .iter()
        .map(|title| {
            json!({
                "title": title,
                "source": "HKEJ",
                "url": format!("https://news.example/{}", title),
                "publishedTime": "1小时前",
                "sentiment": "neutral",
                "summary": "摘要"
            })
        })
        .collect();
    format!("Here are the latest headlines:\n```json\n{}\n```", json!(items))
}
