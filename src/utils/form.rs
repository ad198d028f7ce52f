use serde_json::Value as JsonValue;

use crate::dto::form_dto::FormValues;
use crate::error::{Error, Result};

fn missing(key: &str) -> Error {
    Error::Validation(format!("Missing value for \"{}\"", key))
}

fn invalid(key: &str, expected: &str) -> Error {
    Error::Validation(format!("Value for \"{}\" is not {}", key, expected))
}

pub fn read_string(values: &FormValues, key: &str) -> Result<String> {
    match values.get(key) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(JsonValue::Null) | None => Err(missing(key)),
        Some(_) => Err(invalid(key, "text")),
    }
}

pub fn read_optional_string(values: &FormValues, key: &str) -> Result<Option<String>> {
    match values.get(key) {
        Some(JsonValue::Null) | None => Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(_) => read_string(values, key).map(Some),
    }
}

/// Numbers may arrive as JSON numbers or numeric strings.
pub fn read_float(values: &FormValues, key: &str) -> Result<f64> {
    match values.get(key) {
        Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| invalid(key, "a number")),
        Some(JsonValue::String(s)) => s.trim().parse().map_err(|_| invalid(key, "a number")),
        Some(JsonValue::Null) | None => Err(missing(key)),
        Some(_) => Err(invalid(key, "a number")),
    }
}

pub fn read_int(values: &FormValues, key: &str) -> Result<i64> {
    match values.get(key) {
        Some(JsonValue::Number(n)) => n.as_i64().ok_or_else(|| invalid(key, "an integer")),
        Some(JsonValue::String(s)) => s.trim().parse().map_err(|_| invalid(key, "an integer")),
        Some(JsonValue::Null) | None => Err(missing(key)),
        Some(_) => Err(invalid(key, "an integer")),
    }
}

pub fn read_u32(values: &FormValues, key: &str) -> Result<u32> {
    let value = read_int(values, key)?;
    u32::try_from(value).map_err(|_| invalid(key, "a positive integer"))
}

pub fn read_optional_u32(values: &FormValues, key: &str) -> Result<Option<u32>> {
    match values.get(key) {
        Some(JsonValue::Null) | None => Ok(None),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(_) => read_u32(values, key).map(Some),
    }
}

/// Checkboxes post nothing when unchecked.
pub fn read_bool(values: &FormValues, key: &str) -> Result<bool> {
    match values.get(key) {
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(JsonValue::Number(n)) => Ok(n.as_f64().map_or(false, |v| v != 0.0)),
        Some(JsonValue::String(s)) => Ok(matches!(s.as_str(), "1" | "true" | "on")),
        Some(JsonValue::Null) | None => Ok(false),
        Some(_) => Err(invalid(key, "a flag")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(raw: JsonValue) -> FormValues {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn numbers_accept_strings() {
        let v = values(json!({ "points": "2.5", "max": 3, "bad": "x" }));
        assert_eq!(read_float(&v, "points").unwrap(), 2.5);
        assert_eq!(read_u32(&v, "max").unwrap(), 3);
        assert!(matches!(read_float(&v, "bad"), Err(Error::Validation(_))));
        assert!(matches!(read_int(&v, "absent"), Err(Error::Validation(_))));
    }

    #[test]
    fn unchecked_box_reads_false() {
        let v = values(json!({ "shuffle": "on", "negative": -1 }));
        assert!(read_bool(&v, "shuffle").unwrap());
        assert!(!read_bool(&v, "missing").unwrap());
        assert!(read_u32(&v, "negative").is_err());
    }

    #[test]
    fn numeric_flags_accept_floats() {
        let v = values(json!({ "float_on": 1.0, "float_off": 0.0, "int_on": 1, "int_off": 0 }));
        assert!(read_bool(&v, "float_on").unwrap());
        assert!(!read_bool(&v, "float_off").unwrap());
        assert!(read_bool(&v, "int_on").unwrap());
        assert!(!read_bool(&v, "int_off").unwrap());
    }
}
