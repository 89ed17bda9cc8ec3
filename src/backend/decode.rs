use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::lenient::coerce_list;

/// Decode a list response; an empty body or a non-array value is an empty list
pub fn list<T: DeserializeOwned>(body: &str, what: &str) -> Result<Vec<T>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(body)?;
    coerce_list(value, what)
}

pub fn record<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

/// Decode a record if the body carries one; write endpoints may answer with nothing useful
pub fn optional_record<T: DeserializeOwned>(body: &str) -> Option<T> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

/// Best-effort error message from a failed response body.
///
/// JSON bodies contribute their `message` (or `error`) field, JSON strings
/// their content, anything else is taken as plain text.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(r#"{"message": "Grade already exists"}"#).as_deref(),
            Some("Grade already exists")
        );
        assert_eq!(
            error_message(r#"{"error": "Bad Request", "status": 400}"#).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(
            error_message("Campaign not found\n").as_deref(),
            Some("Campaign not found")
        );
        assert_eq!(error_message(r#"{"status": 500}"#), None);
        assert_eq!(error_message("   "), None);
    }

    #[test]
    fn test_list_tolerates_odd_shapes() {
        let empty: Vec<i64> = list("", "ids").unwrap();
        assert!(empty.is_empty());
        let object: Vec<i64> = list(r#"{"data": [1]}"#, "ids").unwrap();
        assert!(object.is_empty());
        let ok: Vec<i64> = list("[1, 2]", "ids").unwrap();
        assert_eq!(ok, vec![1, 2]);
        assert!(list::<i64>("not json", "ids").is_err());
    }
}
