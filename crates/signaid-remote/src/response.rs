use serde_json::Value;

use crate::{RemoteMatch, RemoteMatchError};

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````)
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (it may carry a language tag)
    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return "",
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a provider answer into validated matches.
///
/// The answer must be a JSON array. Elements are checked field by field:
/// elements without a string `word` are dropped, a non-numeric `confidence`
/// or non-string `matched_from` is treated as absent.
pub fn parse_matches(raw: &str) -> Result<Vec<RemoteMatch>, RemoteMatchError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(RemoteMatchError::InvalidResponse(format!(
                "expected a JSON array, got {}",
                kind(&other)
            )));
        }
    };

    Ok(items.iter().filter_map(parse_item).collect())
}

fn parse_item(item: &Value) -> Option<RemoteMatch> {
    let word = item.get("word")?.as_str()?.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }

    let confidence = item
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0) as f32);

    let matched_from = item
        .get("matched_from")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(RemoteMatch {
        word,
        confidence,
        matched_from,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
