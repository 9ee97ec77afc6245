#![forbid(unsafe_code)]

//! Persisted per-entry value cache.
//!
//! The [`StateStore`] remembers the last-known value of every replicated
//! entry, keyed by its 1-based index, including entries currently hidden or
//! destroyed. It is the single source a rebuild restores from, and it
//! round-trips through the node's serialized state as [`NodePersistState`].

use std::collections::BTreeMap;

/// In-memory value cache for a node's replicated entries.
///
/// Values outlive the fields that held them: shrinking the count leaves
/// the shed indices in place, so growing the count back restores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateStore {
    entries: BTreeMap<u32, String>,
    last_count: Option<i64>,
    last_range: Option<i64>,
}

impl StateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current value of entry `index`.
    pub fn remember_entry(&mut self, index: u32, value: impl Into<String>) {
        let value = value.into();
        #[cfg(feature = "tracing")]
        tracing::trace!(index, value = %value, "entry value remembered");
        self.entries.insert(index, value);
    }

    /// Last-known value of entry `index`, if any was ever recorded.
    #[must_use]
    pub fn entry(&self, index: u32) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    /// All recorded entry values, ordered by index.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(i, v)| (*i, v.as_str()))
    }

    /// Record the last count value that passed coercion.
    pub fn remember_count(&mut self, count: i64) {
        self.last_count = Some(count);
    }

    /// Last count value that passed coercion, if any.
    #[must_use]
    pub fn last_count(&self) -> Option<i64> {
        self.last_count
    }

    /// Record the range control's current value.
    pub fn remember_range(&mut self, value: i64) {
        self.last_range = Some(value);
    }

    /// Last recorded range control value, if any.
    #[must_use]
    pub fn last_range(&self) -> Option<i64> {
        self.last_range
    }

    /// Replace this store's contents from a deserialized payload.
    ///
    /// Every entry in the payload is adopted, including indices beyond the
    /// payload's own count, so a later count increase restores them.
    pub fn restore(&mut self, state: &NodePersistState) {
        self.entries = state.entries.clone();
        self.last_count = Some(state.count);
        self.last_range = state.range;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = state.count,
            entries = self.entries.len(),
            "state store restored from payload"
        );
    }

    /// Export the store as a serializable payload.
    #[must_use]
    pub fn to_persist(&self, count: i64) -> NodePersistState {
        NodePersistState {
            count,
            range: self.last_range,
            entries: self.entries.clone(),
        }
    }
}

/// The flat key-value record persisted with the node in the saved graph.
///
/// Holds the count control's value and the last value of every entry ever
/// populated, deliberately including indices above `count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodePersistState {
    /// The count control's value at save time.
    pub count: i64,
    /// The range control's value at save time, if the node has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<i64>,
    /// Last-known value per entry index.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entries: BTreeMap<u32, String>,
}
