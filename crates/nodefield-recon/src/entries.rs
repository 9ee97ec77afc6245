#![forbid(unsafe_code)]

//! The replicated entry field set.
//!
//! Entries are homogeneous choice fields named `{prefix}{index}`, index
//! 1-based. The set is rebuilt to match the count on every reconcile:
//! current values are snapshotted into the [`StateStore`] first, every
//! entry field is detached, and `1..=count` are materialized fresh,
//! restoring stored values that are still members of the option set.

use nodefield_core::{FieldHost, OptionSet, StateStore};

use crate::config::FieldSetConfig;

/// Rebuild driver for the replicated entry fields of one node.
#[derive(Debug, Clone, Default)]
pub struct ReplicatedFieldSet {
    _private: (),
}

impl ReplicatedFieldSet {
    /// Create the driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of currently materialized entry fields, ascending.
    pub fn materialized(&self, host: &impl FieldHost, config: &FieldSetConfig) -> Vec<u32> {
        (1..=config.max_entries())
            .filter(|&index| host.find_field(&config.entry_field(index)).is_some())
            .collect()
    }

    /// Write every materialized entry's current value into the store.
    ///
    /// Runs before any entry is destroyed so edits made since the last
    /// change event are not lost.
    pub fn snapshot(
        &self,
        host: &impl FieldHost,
        config: &FieldSetConfig,
        store: &mut StateStore,
    ) {
        for index in 1..=config.max_entries() {
            let Some(id) = host.find_field(&config.entry_field(index)) else {
                continue;
            };
            if let Some(value) = host.value(id) {
                store.remember_entry(index, value.to_string());
            }
        }
    }

    /// Detach every materialized entry field from the node.
    ///
    /// Touches nothing but entry fields; the count, range, and any other
    /// controls stay in place.
    pub fn destroy_all(&self, host: &mut impl FieldHost, config: &FieldSetConfig) -> u32 {
        let mut removed = 0;
        for index in 1..=config.max_entries() {
            if let Some(id) = host.find_field(&config.entry_field(index)) {
                if host.remove_field(id) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Materialize entry fields `1..=count`, restoring stored values.
    ///
    /// A stored value that is still a member of `options` is restored;
    /// anything else (never stored, or dropped from the backing list)
    /// becomes the option set's first element.
    pub fn materialize(
        &self,
        host: &mut impl FieldHost,
        config: &FieldSetConfig,
        store: &StateStore,
        options: &OptionSet,
        count: i64,
    ) -> u32 {
        let count = count.clamp(1, i64::from(config.max_entries())) as u32;
        for index in 1..=count {
            let initial = options.sanitize(store.entry(index));
            host.add_choice_field(&config.entry_field(index), initial, options);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodefield_core::{FieldId, FieldValue};
    use std::collections::BTreeMap;

    // Minimal in-crate field host; the full mock lives in the harness
    // crate, which integration tests use instead.
    #[derive(Default)]
    struct Fields {
        next: u64,
        fields: BTreeMap<u64, (String, FieldValue)>,
    }

    impl FieldHost for Fields {
        fn find_field(&self, name: &str) -> Option<FieldId> {
            self.fields
                .iter()
                .find(|(_, (n, _))| n == name)
                .map(|(id, _)| FieldId(*id))
        }

        fn field_names(&self) -> Vec<String> {
            self.fields.values().map(|(n, _)| n.clone()).collect()
        }

        fn value(&self, id: FieldId) -> Option<FieldValue> {
            self.fields.get(&id.0).map(|(_, v)| v.clone())
        }

        fn set_value(&mut self, id: FieldId, value: FieldValue) {
            if let Some((_, v)) = self.fields.get_mut(&id.0) {
                *v = value;
            }
        }

        fn add_choice_field(&mut self, name: &str, initial: &str, _options: &OptionSet) -> FieldId {
            let id = self.next;
            self.next += 1;
            self.fields
                .insert(id, (name.to_owned(), FieldValue::text(initial)));
            FieldId(id)
        }

        fn remove_field(&mut self, id: FieldId) -> bool {
            self.fields.remove(&id.0).is_some()
        }

        fn set_int_bounds(&mut self, _id: FieldId, _min: i64, _max: i64) {}
    }

    fn config() -> FieldSetConfig {
        FieldSetConfig::new("entry_count", "entry_").with_max_entries(5)
    }

    #[test]
    fn materialize_is_contiguous_from_one() {
        let mut host = Fields::default();
        let set = ReplicatedFieldSet::new();
        let store = StateStore::new();
        let options = OptionSet::new(["a", "b"]);

        let made = set.materialize(&mut host, &config(), &store, &options, 3);
        assert_eq!(made, 3);
        assert_eq!(set.materialized(&host, &config()), [1, 2, 3]);
    }

    #[test]
    fn snapshot_then_destroy_preserves_values() {
        let mut host = Fields::default();
        let set = ReplicatedFieldSet::new();
        let mut store = StateStore::new();
        let options = OptionSet::new(["a", "b", "c"]);

        set.materialize(&mut host, &config(), &store, &options, 3);
        let id = host.find_field("entry_2").unwrap();
        host.set_value(id, FieldValue::text("c"));

        set.snapshot(&host, &config(), &mut store);
        let removed = set.destroy_all(&mut host, &config());
        assert_eq!(removed, 3);
        assert!(set.materialized(&host, &config()).is_empty());
        assert_eq!(store.entry(2), Some("c"));
    }

    #[test]
    fn restore_falls_back_when_value_left_the_options() {
        let mut host = Fields::default();
        let set = ReplicatedFieldSet::new();
        let mut store = StateStore::new();
        store.remember_entry(1, "gone");
        store.remember_entry(2, "b");

        let options = OptionSet::new(["a", "b"]);
        set.materialize(&mut host, &config(), &store, &options, 2);

        let v1 = host.value(host.find_field("entry_1").unwrap()).unwrap();
        let v2 = host.value(host.find_field("entry_2").unwrap()).unwrap();
        assert_eq!(v1, FieldValue::text("a"));
        assert_eq!(v2, FieldValue::text("b"));
    }

    #[test]
    fn destroy_leaves_foreign_fields_alone() {
        let mut host = Fields::default();
        host.add_choice_field("entry_count", "3", &OptionSet::default());
        let set = ReplicatedFieldSet::new();
        set.materialize(&mut host, &config(), &StateStore::new(), &OptionSet::default(), 2);

        set.destroy_all(&mut host, &config());
        assert!(host.find_field("entry_count").is_some());
    }

    #[test]
    fn materialize_clamps_to_max_entries() {
        let mut host = Fields::default();
        let set = ReplicatedFieldSet::new();
        let made = set.materialize(
            &mut host,
            &config(),
            &StateStore::new(),
            &OptionSet::default(),
            99,
        );
        assert_eq!(made, 5);
    }
}
