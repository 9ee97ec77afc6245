#![forbid(unsafe_code)]

//! The dependent range control.
//!
//! A numeric control whose valid maximum tracks the count: after every
//! reconcile its bounds are `[min, max(1, count)]` and its value sits
//! inside them. Out-of-range values are clamped, never rejected, and the
//! write-back only happens when the clamped value actually differs, so no
//! spurious change events fire. The control is optional per node kind; an
//! absent field skips the step silently.

use nodefield_core::{FieldHost, FieldValue, StateStore};

/// Clamp driver for the optional range control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentRangeField {
    name: String,
    min: i64,
}

impl DependentRangeField {
    /// Create a driver for the control named `name` with fixed minimum
    /// `min`.
    #[must_use]
    pub fn new(name: impl Into<String>, min: i64) -> Self {
        Self {
            name: name.into(),
            min,
        }
    }

    /// The control's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retarget the control's bounds to the new count and clamp its value.
    ///
    /// Returns the in-range value, or `None` when the control is absent
    /// from the node (not an error; the control is optional).
    pub fn update(
        &self,
        host: &mut impl FieldHost,
        store: &mut StateStore,
        count: i64,
    ) -> Option<i64> {
        let id = host.find_field(&self.name)?;
        let new_max = count.max(1).max(self.min);
        host.set_int_bounds(id, self.min, new_max);

        let current = host.value(id).and_then(|v| v.as_int());
        let clamped = current.unwrap_or(self.min).clamp(self.min, new_max);
        if current != Some(clamped) {
            host.set_value(id, FieldValue::Int(clamped));
        }
        store.remember_range(clamped);
        Some(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodefield_core::{FieldId, OptionSet};

    #[derive(Default)]
    struct OneField {
        present: bool,
        value: Option<FieldValue>,
        bounds: Option<(i64, i64)>,
        writes: usize,
    }

    impl FieldHost for OneField {
        fn find_field(&self, name: &str) -> Option<FieldId> {
            (self.present && name == "index").then_some(FieldId(0))
        }

        fn field_names(&self) -> Vec<String> {
            if self.present {
                vec!["index".to_owned()]
            } else {
                Vec::new()
            }
        }

        fn value(&self, _id: FieldId) -> Option<FieldValue> {
            self.value.clone()
        }

        fn set_value(&mut self, _id: FieldId, value: FieldValue) {
            self.value = Some(value);
            self.writes += 1;
        }

        fn add_choice_field(&mut self, _name: &str, _initial: &str, _options: &OptionSet) -> FieldId {
            FieldId(0)
        }

        fn remove_field(&mut self, _id: FieldId) -> bool {
            false
        }

        fn set_int_bounds(&mut self, _id: FieldId, min: i64, max: i64) {
            self.bounds = Some((min, max));
        }
    }

    #[test]
    fn absent_field_is_skipped() {
        let mut host = OneField::default();
        let mut store = StateStore::new();
        let range = DependentRangeField::new("index", 1);
        assert_eq!(range.update(&mut host, &mut store, 5), None);
        assert_eq!(store.last_range(), None);
    }

    #[test]
    fn value_above_new_max_is_clamped() {
        let mut host = OneField {
            present: true,
            value: Some(FieldValue::Int(8)),
            ..Default::default()
        };
        let mut store = StateStore::new();
        let range = DependentRangeField::new("index", 1);

        assert_eq!(range.update(&mut host, &mut store, 3), Some(3));
        assert_eq!(host.bounds, Some((1, 3)));
        assert_eq!(host.value, Some(FieldValue::Int(3)));
        assert_eq!(store.last_range(), Some(3));
    }

    #[test]
    fn in_range_value_is_not_rewritten() {
        let mut host = OneField {
            present: true,
            value: Some(FieldValue::Int(2)),
            ..Default::default()
        };
        let mut store = StateStore::new();
        let range = DependentRangeField::new("index", 1);

        assert_eq!(range.update(&mut host, &mut store, 5), Some(2));
        assert_eq!(host.writes, 0);
    }

    #[test]
    fn non_numeric_value_resets_to_min() {
        let mut host = OneField {
            present: true,
            value: Some(FieldValue::text("abc")),
            ..Default::default()
        };
        let mut store = StateStore::new();
        let range = DependentRangeField::new("index", 1);

        assert_eq!(range.update(&mut host, &mut store, 4), Some(1));
        assert_eq!(host.value, Some(FieldValue::Int(1)));
    }

    #[test]
    fn max_never_drops_below_one_or_min() {
        let mut host = OneField {
            present: true,
            value: Some(FieldValue::Int(2)),
            ..Default::default()
        };
        let mut store = StateStore::new();
        let range = DependentRangeField::new("index", 2);

        range.update(&mut host, &mut store, 1);
        assert_eq!(host.bounds, Some((2, 2)));
        assert_eq!(host.value, Some(FieldValue::Int(2)));
    }
}
