use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a global build property.
///
/// Values are compared through their string form, so `Integer(1)` and `Text("1")` are considered equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl PropertyValue {
    /// Returns `true` if both values render to the same string.
    pub fn same_as(&self, other: &PropertyValue) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Integer(n) => write!(f, "{n}"),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stringified_comparison_ignores_type() {
        assert!(PropertyValue::from(1).same_as(&PropertyValue::from("1")));
        assert!(PropertyValue::from(true).same_as(&PropertyValue::from("true")));
        assert!(!PropertyValue::from("partial").same_as(&PropertyValue::from("all")));
    }

    #[test]
    fn untagged_serde() {
        let v: PropertyValue = serde_json::from_str("42").unwrap();
        assert_eq!(v, PropertyValue::Integer(42));
        let v: PropertyValue = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(v, PropertyValue::Text("all".into()));
    }
}
