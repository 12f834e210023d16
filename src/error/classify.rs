use serde_json::Value;

use super::types::StudioError;

/// Classify a non-2xx upstream response into a `StudioError::UpstreamError`.
///
/// Upstreams disagree on envelopes:
/// - Google / OpenAI: `{ "error": { "message": "...", ... } }`
/// - Hugging Face: `{ "error": "..." }` (sometimes `"error": ["..."]`)
/// - Replicate: `{ "detail": "..." }`
///
/// Anything else falls back to the raw body text, or the canonical reason
/// phrase when the body is empty.
pub fn classify_http_error(provider: &str, status: u16, body_text: &str) -> StudioError {
    let message = serde_json::from_str::<Value>(body_text)
        .ok()
        .and_then(|json| extract_message(&json))
        .unwrap_or_else(|| {
            let trimmed = body_text.trim();
            if trimmed.is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    StudioError::upstream(provider, Some(status), message)
}

fn extract_message(json: &Value) -> Option<String> {
    match json.get("error") {
        Some(Value::Object(obj)) => {
            if let Some(msg) = obj.get("message").and_then(Value::as_str) {
                return Some(msg.to_string());
            }
        }
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    json.get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}
