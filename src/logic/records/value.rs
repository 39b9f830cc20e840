//! Raw cell values as they arrive from ingestion.
//!
//! Values are untyped until the feature builder coerces them; `as_number` is
//! the only coercion site.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged raw cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Coerce to a finite number.
    ///
    /// Text is trimmed and parsed; NaN and infinities are rejected in both
    /// representations.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Numeric(v) => Some(*v).filter(|v| v.is_finite()),
            RawValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            RawValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Numeric(v) => write!(f, "{}", v),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Missing,
            Value::Bool(b) => RawValue::Numeric(if b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Numeric),
            Value::String(s) => RawValue::Text(s),
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<RawValue> for Value {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Numeric(v) => serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RawValue::Text(s) => Value::String(s),
            RawValue::Missing => Value::Null,
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Numeric(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(RawValue::Numeric(2.5).as_number(), Some(2.5));
        assert_eq!(RawValue::Numeric(f64::NAN).as_number(), None);
        assert_eq!(RawValue::Numeric(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(RawValue::from(" 12.75 ").as_number(), Some(12.75));
        assert_eq!(RawValue::from("1e2").as_number(), Some(100.0));
        assert_eq!(RawValue::from("high").as_number(), None);
        assert_eq!(RawValue::from("").as_number(), None);
        assert_eq!(RawValue::from("inf").as_number(), None);
        assert_eq!(RawValue::from("NaN").as_number(), None);
    }

    #[test]
    fn test_missing_is_not_numeric() {
        assert!(RawValue::Missing.is_missing());
        assert_eq!(RawValue::Missing.as_number(), None);
        assert_eq!(RawValue::Missing.to_string(), "<missing>");
    }

    #[test]
    fn test_from_json() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[1.5, "2", null, true, false, [1]]"#).unwrap();
        assert_eq!(values[0], RawValue::Numeric(1.5));
        assert_eq!(values[1], RawValue::Text("2".into()));
        assert_eq!(values[2], RawValue::Missing);
        assert_eq!(values[3], RawValue::Numeric(1.0));
        assert_eq!(values[4], RawValue::Numeric(0.0));
        assert_eq!(values[5], RawValue::Text("[1]".into()));
    }

    #[test]
    fn test_to_json() {
        let json = serde_json::to_string(&vec![
            RawValue::Numeric(3.0),
            RawValue::Text("x".into()),
            RawValue::Missing,
        ])
        .unwrap();
        assert_eq!(json, r#"[3.0,"x",null]"#);
    }
}
