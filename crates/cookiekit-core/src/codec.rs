//! Representation-aware conversion between stored strings and values.

use serde_json::Value;

use crate::definition::Representation;

/// Decode a stored string.
///
/// Raw strings become [`Value::String`] unchanged; structured cookies are
/// parsed as JSON.
pub fn decode(representation: Representation, raw: &str) -> serde_json::Result<Value> {
    match representation {
        Representation::RawString => Ok(Value::String(raw.to_string())),
        Representation::Structured => serde_json::from_str(raw),
    }
}

/// Encode a value for storage.
///
/// Only a string written to a raw-string cookie is stored verbatim. Anything
/// else, including a non-string written to a raw-string cookie, is stored as
/// compact JSON.
pub fn encode(representation: Representation, value: &Value) -> String {
    match (representation, value) {
        (Representation::RawString, Value::String(text)) => text.clone(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_strings_pass_through() {
        assert_eq!(encode(Representation::RawString, &json!("abc 123")), "abc 123");
        assert_eq!(
            decode(Representation::RawString, r#"{"not":"parsed"}"#).unwrap(),
            json!(r#"{"not":"parsed"}"#)
        );
    }

    #[test]
    fn raw_string_cookie_coerces_non_strings_to_json() {
        let stored = encode(Representation::RawString, &json!({"n": 1}));
        assert_eq!(stored, r#"{"n":1}"#);
        assert_eq!(encode(Representation::RawString, &json!(42)), "42");
    }

    #[test]
    fn structured_strings_are_quoted() {
        let stored = encode(Representation::Structured, &json!("dark"));
        assert_eq!(stored, r#""dark""#);
        assert_eq!(
            decode(Representation::Structured, &stored).unwrap(),
            json!("dark")
        );
    }

    #[test]
    fn structured_values_round_trip() {
        let value = json!({"theme": "dark", "sizes": [1, 2.5, null], "ok": true});
        let stored = encode(Representation::Structured, &value);
        assert_eq!(decode(Representation::Structured, &stored).unwrap(), value);
    }

    #[test]
    fn malformed_structured_data_fails() {
        assert!(decode(Representation::Structured, "{theme:dark").is_err());
        assert!(decode(Representation::Structured, "").is_err());
    }
}
