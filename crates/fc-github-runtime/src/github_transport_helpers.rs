use serde_json::Value;

const ERROR_BODY_MAX_CHARS: usize = 800;

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Extracts a readable message from a failed GitHub response body.
///
/// GitHub error bodies are JSON with a `message` field and optional
/// `errors[].message` details; anything else is returned truncated.
pub fn error_message_from_body(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return truncate_for_error(body.trim(), ERROR_BODY_MAX_CHARS);
    };
    let Some(message) = parsed.get("message").and_then(Value::as_str) else {
        return truncate_for_error(body.trim(), ERROR_BODY_MAX_CHARS);
    };
    let details = parsed
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|error| error.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if details.is_empty() {
        return truncate_for_error(message, ERROR_BODY_MAX_CHARS);
    }
    truncate_for_error(
        &format!("{message} ({})", details.join("; ")),
        ERROR_BODY_MAX_CHARS,
    )
}
