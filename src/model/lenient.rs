//! Defensive decoding for list-shaped fields.
//!
//! The backend occasionally answers with `null`, an object or a message where
//! a list is expected. Those shapes become an empty list (with a warning) so a
//! screen can keep working; malformed list elements are still decode errors.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Coerce a JSON value into a typed list, treating non-arrays as empty
pub fn coerce_list<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!(
                "Expected a list of {}, got {}; treating as empty",
                what,
                shape_name(&other)
            );
            Ok(Vec::new())
        }
    }
}

/// `deserialize_with` adapter for list fields nested in a record
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    coerce_list(value, "items").map_err(D::Error::custom)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_array_becomes_empty() {
        let out: Vec<i64> = coerce_list(json!({"error": "nope"}), "numbers").unwrap();
        assert!(out.is_empty());
        let out: Vec<i64> = coerce_list(Value::Null, "numbers").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_element_is_error() {
        let out: Result<Vec<i64>, _> = coerce_list(json!([1, "two"]), "numbers");
        assert!(out.is_err());
    }
}
