use std::borrow::Cow;

use serde_json::Value;

use crate::request::RequestBody;

/// Makes `body` safe inside a single-quoted shell argument by closing the
/// quote, emitting an escaped quote and reopening: `'` becomes `'\''`.
pub fn escape_body(body: &str) -> Cow<'_, str> {
    if body.contains('\'') {
        Cow::Owned(body.replace('\'', r"'\''"))
    } else {
        Cow::Borrowed(body)
    }
}

/// ` --data-binary '<body>'`, or nothing for an empty body.
///
/// Structured bodies are rendered as compact JSON before escaping.
pub fn generate_body(body: &RequestBody) -> String {
    let text = match body {
        RequestBody::Absent => return String::new(),
        RequestBody::Text(text) if text.is_empty() => return String::new(),
        RequestBody::Text(text) => Cow::Borrowed(text.as_str()),
        RequestBody::Structured(value) if is_falsy(value) => return String::new(),
        RequestBody::Structured(value) => Cow::Owned(value.to_string()),
    };
    format!(" --data-binary '{}'", escape_body(&text))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
