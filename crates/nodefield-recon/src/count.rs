#![forbid(unsafe_code)]

//! The count control.
//!
//! Coerces whatever the host's count field currently holds into a value in
//! `[1, max_entries]`. Malformed input never surfaces: non-numeric text and
//! sub-minimum values fall back to the last value that passed coercion, then
//! to the configured default. Overshoot clamps silently.

use nodefield_core::FieldValue;

/// Coercion state for the count control.
///
/// Tracks the last good value across calls so a transiently malformed edit
/// (an empty field mid-typing, pasted garbage) holds the count steady
/// instead of snapping it to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountBoundField {
    last_good: Option<i64>,
}

impl CountBoundField {
    /// Create with no prior good value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the last-good value, e.g. from a deserialized payload.
    pub fn seed(&mut self, value: i64, max_entries: u32) {
        self.last_good = Some(value.clamp(1, i64::from(max_entries)));
    }

    /// Coerce a raw host value into `[1, max_entries]` and record it.
    ///
    /// Ladder: numeric value `>= 1` wins; otherwise the last good value;
    /// otherwise `default`; otherwise 1. The survivor is clamped to
    /// `max_entries`.
    pub fn coerce(&mut self, raw: Option<&FieldValue>, default: i64, max_entries: u32) -> i64 {
        let parsed = raw.and_then(FieldValue::as_int);
        let candidate = match parsed {
            Some(value) if value >= 1 => value,
            _ => self.last_good.unwrap_or(if default >= 1 { default } else { 1 }),
        };
        let count = candidate.clamp(1, i64::from(max_entries));
        self.last_good = Some(count);
        count
    }

    /// The last value that passed coercion, if any.
    #[must_use]
    pub fn last_good(&self) -> Option<i64> {
        self.last_good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_values_pass() {
        let mut count = CountBoundField::new();
        assert_eq!(count.coerce(Some(&FieldValue::Int(5)), 1, 20), 5);
        assert_eq!(count.last_good(), Some(5));
    }

    #[test]
    fn overshoot_clamps_to_max() {
        let mut count = CountBoundField::new();
        assert_eq!(count.coerce(Some(&FieldValue::Int(999)), 1, 20), 20);
    }

    #[test]
    fn garbage_falls_back_to_last_good() {
        let mut count = CountBoundField::new();
        count.coerce(Some(&FieldValue::Int(7)), 1, 20);
        assert_eq!(count.coerce(Some(&FieldValue::text("abc")), 1, 20), 7);
        assert_eq!(count.coerce(Some(&FieldValue::Int(0)), 1, 20), 7);
        assert_eq!(count.coerce(Some(&FieldValue::Int(-3)), 1, 20), 7);
        assert_eq!(count.coerce(None, 1, 20), 7);
    }

    #[test]
    fn garbage_with_no_history_uses_default() {
        let mut count = CountBoundField::new();
        assert_eq!(count.coerce(Some(&FieldValue::text("abc")), 5, 20), 5);
    }

    #[test]
    fn bad_default_bottoms_out_at_one() {
        let mut count = CountBoundField::new();
        assert_eq!(count.coerce(None, 0, 20), 1);
    }

    #[test]
    fn numeric_text_is_accepted() {
        let mut count = CountBoundField::new();
        assert_eq!(count.coerce(Some(&FieldValue::text("4")), 1, 20), 4);
    }

    #[test]
    fn seed_clamps_into_domain() {
        let mut count = CountBoundField::new();
        count.seed(50, 20);
        assert_eq!(count.last_good(), Some(20));
        count.seed(-2, 20);
        assert_eq!(count.last_good(), Some(1));
    }
}
