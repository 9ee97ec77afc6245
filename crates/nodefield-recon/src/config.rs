#![forbid(unsafe_code)]

//! Reconciler configuration.
//!
//! A [`FieldSetConfig`] names the controls one node kind wires together:
//! the count control, the entry name prefix, the optional range control,
//! and the connector split. Configs are built once per node kind and are
//! cheap to clone per node instance.

/// Default upper bound on replicated entries.
pub const DEFAULT_MAX_ENTRIES: u32 = 20;

/// Configuration for one reconciled node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSetConfig {
    count_field: String,
    entry_prefix: String,
    range_field: Option<String>,
    range_min: i64,
    max_entries: u32,
    default_count: i64,
    variable_slots: u32,
    fixed_trailing: u32,
    tag_marker: String,
}

impl FieldSetConfig {
    /// Create a config for a node whose count control is `count_field` and
    /// whose replicated entries are named `{entry_prefix}{index}`.
    ///
    /// Defaults: no range control, [`DEFAULT_MAX_ENTRIES`] entries, default
    /// count 1, one variable connector slot per entry, no fixed trailing
    /// slots, tag marker `"_set"`.
    pub fn new(count_field: impl Into<String>, entry_prefix: impl Into<String>) -> Self {
        Self {
            count_field: count_field.into(),
            entry_prefix: entry_prefix.into(),
            range_field: None,
            range_min: 1,
            max_entries: DEFAULT_MAX_ENTRIES,
            default_count: 1,
            variable_slots: DEFAULT_MAX_ENTRIES,
            fixed_trailing: 0,
            tag_marker: "_set".to_owned(),
        }
    }

    /// Name the optional range control whose max tracks the count.
    #[must_use]
    pub fn with_range_field(mut self, name: impl Into<String>) -> Self {
        self.range_field = Some(name.into());
        self
    }

    /// Set the range control's fixed minimum (default 1).
    #[must_use]
    pub fn with_range_min(mut self, min: i64) -> Self {
        self.range_min = min;
        self
    }

    /// Set the upper bound on replicated entries.
    ///
    /// Also caps the variable connector range when `with_connector_slots`
    /// is not called afterwards. A zero bound is lifted to 1.
    #[must_use]
    pub fn with_max_entries(mut self, max: u32) -> Self {
        self.max_entries = max.max(1);
        self.variable_slots = self.max_entries;
        self
    }

    /// Set the count the coercion ladder bottoms out at (default 1).
    #[must_use]
    pub fn with_default_count(mut self, count: i64) -> Self {
        self.default_count = count;
        self
    }

    /// Set the connector split: `variable` count-driven slots followed by
    /// `fixed_trailing` always-visible slots. Zero variable slots is
    /// legitimate (a node whose outputs are all fixed).
    #[must_use]
    pub fn with_connector_slots(mut self, variable: u32, fixed_trailing: u32) -> Self {
        self.variable_slots = variable;
        self.fixed_trailing = fixed_trailing;
        self
    }

    /// Set the suffix marker used when deriving a tag from a selected
    /// entry value (default `"_set"`).
    #[must_use]
    pub fn with_tag_marker(mut self, marker: impl Into<String>) -> Self {
        self.tag_marker = marker.into();
        self
    }

    /// Name of the count control.
    #[must_use]
    pub fn count_field(&self) -> &str {
        &self.count_field
    }

    /// Prefix of replicated entry field names.
    #[must_use]
    pub fn entry_prefix(&self) -> &str {
        &self.entry_prefix
    }

    /// Field name of entry `index`.
    #[must_use]
    pub fn entry_field(&self, index: u32) -> String {
        format!("{}{}", self.entry_prefix, index)
    }

    /// Parse an entry index back out of a field name.
    #[must_use]
    pub fn parse_entry_field(&self, name: &str) -> Option<u32> {
        let index: u32 = name.strip_prefix(&self.entry_prefix)?.parse().ok()?;
        (index >= 1 && index <= self.max_entries).then_some(index)
    }

    /// Name of the range control, if the node kind has one.
    #[must_use]
    pub fn range_field(&self) -> Option<&str> {
        self.range_field.as_deref()
    }

    /// The range control's fixed minimum.
    #[must_use]
    pub fn range_min(&self) -> i64 {
        self.range_min
    }

    /// Upper bound on replicated entries.
    #[must_use]
    pub fn max_entries(&self) -> u32 {
        self.max_entries
    }

    /// The count the coercion ladder bottoms out at.
    #[must_use]
    pub fn default_count(&self) -> i64 {
        self.default_count
    }

    /// Number of count-driven connector slots.
    #[must_use]
    pub fn variable_slots(&self) -> u32 {
        self.variable_slots
    }

    /// Number of always-visible trailing connector slots.
    #[must_use]
    pub fn fixed_trailing(&self) -> u32 {
        self.fixed_trailing
    }

    /// Expected total connector slot count.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.variable_slots as usize + self.fixed_trailing as usize
    }

    /// The tag suffix marker.
    #[must_use]
    pub fn tag_marker(&self) -> &str {
        &self.tag_marker
    }
}
