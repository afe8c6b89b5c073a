//! Request bodies for the todo API.
//!
//! Bodies are accepted loosely: unknown fields are ignored and values of
//! the wrong JSON type are coerced rather than rejected.

use serde::Deserialize;
use serde_json::Value;
use todo_core::TodoId;

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

impl CreateTodoRequest {
    /// Strings pass through, other scalars become their JSON text.
    pub fn into_text(self) -> Option<String> {
        match self.text? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub done: Option<Value>,
}

impl UpdateTodoRequest {
    /// `None` when the body carries no usable `done` value.
    pub fn done(&self) -> Option<bool> {
        match self.done.as_ref()? {
            Value::Null => None,
            Value::Bool(done) => Some(*done),
            Value::Number(n) => Some(n.as_f64().map_or(false, |n| n != 0.0)),
            Value::String(s) => Some(matches!(s.trim(), "true" | "1")),
            Value::Array(_) | Value::Object(_) => Some(true),
        }
    }
}

/// Parses a path segment into a todo id; anything unparseable matches nothing.
pub fn parse_todo_id(raw: &str) -> Option<TodoId> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<TodoId>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= TodoId::MIN as f64 && value <= TodoId::MAX as f64 {
        Some(value as TodoId)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: Value) -> Option<String> {
        serde_json::from_value::<CreateTodoRequest>(body)
            .unwrap()
            .into_text()
    }

    fn done(body: Value) -> Option<bool> {
        serde_json::from_value::<UpdateTodoRequest>(body)
            .unwrap()
            .done()
    }

    #[test]
    fn text_is_coerced() {
        assert_eq!(create(json!({ "text": "buy milk" })), Some("buy milk".into()));
        assert_eq!(create(json!({ "text": 42 })), Some("42".into()));
        assert_eq!(create(json!({ "text": null })), None);
        assert_eq!(create(json!({})), None);
    }

    #[test]
    fn done_is_coerced() {
        assert_eq!(done(json!({ "done": true })), Some(true));
        assert_eq!(done(json!({ "done": 0 })), Some(false));
        assert_eq!(done(json!({ "done": 1 })), Some(true));
        assert_eq!(done(json!({ "done": "true" })), Some(true));
        assert_eq!(done(json!({ "done": "no" })), Some(false));
        assert_eq!(done(json!({ "done": null })), None);
        assert_eq!(done(json!({ "other": true })), None);
    }

    #[test]
    fn ids_parse_leniently() {
        assert_eq!(parse_todo_id("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_todo_id(" 12 "), Some(12));
        assert_eq!(parse_todo_id("12.0"), Some(12));
        assert_eq!(parse_todo_id("12.5"), None);
        assert_eq!(parse_todo_id("abc"), None);
        assert_eq!(parse_todo_id("NaN"), None);
    }
}
