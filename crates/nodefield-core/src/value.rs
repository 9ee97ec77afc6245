#![forbid(unsafe_code)]

//! Control values.
//!
//! A [`FieldValue`] is the host-agnostic value of a single control: either
//! an integer (count and range controls) or text (choice entries and free
//! input). Hosts convert their native widget values into this type at the
//! capability boundary.

use std::fmt;

/// The value of a single node control.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer-valued control (count, range index).
    Int(i64),
    /// Text-valued control (choice entries, free text).
    Text(String),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Interpret the value as an integer.
    ///
    /// `Int` values pass through. `Text` values are trimmed and parsed
    /// leniently (optional sign, decimal digits); non-numeric text yields
    /// `None`. This is where malformed count input like `"abc"` lands
    /// before coercion picks a fallback.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Interpret the value as text. `Int` values yield `None`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Whether this is a text value.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_passes_through() {
        assert_eq!(FieldValue::Int(7).as_int(), Some(7));
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(FieldValue::text(" 12 ").as_int(), Some(12));
        assert_eq!(FieldValue::text("-3").as_int(), Some(-3));
        assert_eq!(FieldValue::text("+4").as_int(), Some(4));
    }

    #[test]
    fn non_numeric_text_is_none() {
        assert_eq!(FieldValue::text("abc").as_int(), None);
        assert_eq!(FieldValue::text("").as_int(), None);
        assert_eq!(FieldValue::text("1.5").as_int(), None);
    }

    #[test]
    fn as_str_only_for_text() {
        assert_eq!(FieldValue::text("a").as_str(), Some("a"));
        assert_eq!(FieldValue::Int(1).as_str(), None);
    }

    #[test]
    fn serde_untagged_roundtrip() {
        let int: FieldValue = serde_json::from_str("5").unwrap();
        assert_eq!(int, FieldValue::Int(5));
        let text: FieldValue = serde_json::from_str("\"five\"").unwrap();
        assert_eq!(text, FieldValue::text("five"));
        assert_eq!(serde_json::to_string(&FieldValue::Int(5)).unwrap(), "5");
    }
}
