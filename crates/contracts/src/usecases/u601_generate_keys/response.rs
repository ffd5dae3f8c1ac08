use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Whatever the endpoint answered: its JSON, or `{"raw": text}` for plain text
pub type ParsedResponse = Value;

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"authtool[^\s"']+"#).expect("key pattern is a valid regex"));

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

/// Parse a response body.
///
/// Bodies that look like JSON must parse; anything else is wrapped as
/// `{"raw": text}`.
pub fn parse_response_body(text: &str) -> Result<ParsedResponse, serde_json::Error> {
    if looks_like_json(text) {
        serde_json::from_str(text)
    } else {
        Ok(json!({ "raw": text }))
    }
}

/// Pull generated keys out of a response.
///
/// Looks at a `data` array first, then for `authtool…` tokens in a `raw`
/// string, then at the response itself if it is an array.
pub fn extract_keys(response: &ParsedResponse) -> Vec<String> {
    if let Some(data) = response.get("data").and_then(Value::as_array) {
        return data.iter().map(key_text).collect();
    }

    if let Some(raw) = response.get("raw").and_then(Value::as_str) {
        let found: Vec<String> = KEY_PATTERN
            .find_iter(raw)
            .map(|m| m.as_str().to_string())
            .collect();
        if !found.is_empty() {
            return found;
        }
    }

    match response {
        Value::Array(items) => items.iter().map(key_text).collect(),
        _ => Vec::new(),
    }
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty JSON for the response panel
pub fn render_response(response: &ParsedResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
}

/// Text for the "copy all keys" action: trimmed, non-empty keys joined by newlines
pub fn keys_clipboard_text(keys: &[String]) -> Option<(String, usize)> {
    let keys: Vec<&str> = keys
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if keys.is_empty() {
        return None;
    }
    Some((keys.join("\n"), keys.len()))
}
