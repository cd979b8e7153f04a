use insight_core::{InsightError, InsightResult};
use serde_json::Value;

const FENCE_WITH_TAG: &str = "```json";
const FENCE: &str = "```";

/// Remove markdown code-fence markers, both the tagged opener and bare fences.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(FENCE_WITH_TAG, "").replace(FENCE, "").trim().to_string()
}

/// Byte span of the JSON payload inside already-cleaned text.
///
/// The earliest opening bracket of either kind decides the shape: an object
/// runs from the first `{` to the last `}`, an array from the first `[` to
/// the last `]`.
fn payload_span(text: &str) -> Option<(usize, usize)> {
    let object_start = text.find('{');
    let array_start = text.find('[');

    let (start, end) = match (object_start, array_start) {
        (Some(obj), arr) if arr.map_or(true, |a| obj < a) => (obj, text.rfind('}')?),
        (_, Some(arr)) => (arr, text.rfind(']')?),
        _ => return None,
    };

    if end > start {
        Some((start, end))
    } else {
        None
    }
}

/// Recover a single JSON value from free-form model output.
///
/// Tolerates surrounding prose and code fences. Anything else (no bracket
/// pair, an inverted or empty span, invalid JSON inside the span) is a
/// [`InsightError::Parse`] carrying the untouched input.
pub fn extract_json(raw: &str) -> InsightResult<Value> {
    let cleaned = strip_code_fences(raw);

    let (start, end) = payload_span(&cleaned)
        .ok_or_else(|| InsightError::parse("no JSON object or array found", raw))?;

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| InsightError::parse(format!("invalid JSON: {}", e), raw))
}
