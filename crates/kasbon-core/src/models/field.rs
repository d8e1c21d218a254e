//! Explicit known/unknown field sentinel.
//!
//! Downstream persistence assumes a fixed column count, so a field is never
//! silently absent: it is either a concrete typed value or the `"unknown"`
//! sentinel, and it serializes accordingly.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A field value that is either known or explicitly unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// A concrete extracted value.
    Known(T),
    /// Nothing matched; the sentinel, never `null` or an empty string.
    Unknown,
}

impl<T> Field<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    /// Borrow the value if known.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Known(v) => Some(v),
            Field::Unknown => None,
        }
    }

    /// Consume into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Known(v) => Some(v),
            Field::Unknown => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Known(v) => Field::Known(f(v)),
            Field::Unknown => Field::Unknown,
        }
    }

    /// Keep the current value if known, otherwise take the replacement.
    pub fn or(self, other: Field<T>) -> Field<T> {
        match self {
            Field::Known(v) => Field::Known(v),
            Field::Unknown => other,
        }
    }
}

impl<T: fmt::Display> Field<T> {
    /// Render for fixed-width output: the value, or the sentinel text.
    pub fn to_cell(&self) -> String {
        match self {
            Field::Known(v) => v.to_string(),
            Field::Unknown => "unknown".to_string(),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unknown
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Field::Known(v),
            None => Field::Unknown,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(v) => v.serialize(serializer),
            Field::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    /// Tolerant deserialization for model output: `null`, `""`, and the
    /// `"unknown"` sentinel all map to `Unknown`, and a value the target
    /// type cannot represent degrades to `Unknown` rather than failing the
    /// whole record.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Null => Ok(Field::Unknown),
            serde_json::Value::String(ref s) if is_sentinel(s) => Ok(Field::Unknown),
            other => Ok(T::deserialize(other).map_or(Field::Unknown, Field::Known)),
        }
    }
}

fn is_sentinel(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("unknown") || s.eq_ignore_ascii_case("onbekend")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn serializes_known_as_value_and_unknown_as_sentinel() {
        let known: Field<String> = Field::Known("AH".to_string());
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"AH\"");

        let unknown: Field<Decimal> = Field::Unknown;
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn deserializes_sentinels() {
        for json in ["null", "\"unknown\"", "\"\"", "\"  \"", "\"onbekend\""] {
            let field: Field<String> = serde_json::from_str(json).unwrap();
            assert_eq!(field, Field::Unknown);
        }
    }

    #[test]
    fn deserializes_decimal_from_number_and_string() {
        let from_number: Field<Decimal> = serde_json::from_str("43.85").unwrap();
        assert_eq!(from_number, Field::Known(Decimal::from_str("43.85").unwrap()));

        let from_string: Field<Decimal> = serde_json::from_str("\"43.85\"").unwrap();
        assert_eq!(from_string, Field::Known(Decimal::from_str("43.85").unwrap()));
    }

    #[test]
    fn unrepresentable_value_degrades_to_unknown() {
        let field: Field<Decimal> = serde_json::from_str("\"not a number\"").unwrap();
        assert_eq!(field, Field::Unknown);
    }

    #[test]
    fn to_cell_renders_sentinel() {
        let field: Field<i32> = Field::Unknown;
        assert_eq!(field.to_cell(), "unknown");
        assert_eq!(Field::Known(7).to_cell(), "7");
    }
}
