#![forbid(unsafe_code)]

//! Choice option lists.
//!
//! An [`OptionSet`] is the ordered list of values a replicated entry may
//! take, shared by every entry of the same kind. The owner (the node's
//! authoritative definition) supplies it; the reconciler treats it as
//! read-only and never caches a copy across reconciliations.

/// Sentinel value used when the backing option list is legitimately empty.
pub const NONE_SENTINEL: &str = "none";

/// An ordered, non-empty list of allowed entry values.
///
/// Construction sanitizes the source list: an empty list becomes the single
/// [`NONE_SENTINEL`] entry, so `first()` is always well-defined and entries
/// always have a default to fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    /// Build an option set from a source list, substituting the sentinel
    /// if the list is empty.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Self::sentinel_only();
        }
        Self { values }
    }

    /// The option set holding only the [`NONE_SENTINEL`].
    #[must_use]
    pub fn sentinel_only() -> Self {
        Self {
            values: vec![NONE_SENTINEL.to_owned()],
        }
    }

    /// All allowed values, in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The default value: the first element.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.values[0]
    }

    /// Whether `candidate` is a member of the set.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.values.iter().any(|v| v == candidate)
    }

    /// Resolve a candidate value to a member of the set.
    ///
    /// A candidate that is still a member passes through; anything else
    /// (including `None`) resolves to the first element. Restored entry
    /// values go through this so a stale selection from a prior session
    /// never reappears once the backing list has dropped it.
    #[must_use]
    pub fn sanitize<'a>(&'a self, candidate: Option<&'a str>) -> &'a str {
        match candidate {
            Some(value) if self.contains(value) => value,
            _ => self.first(),
        }
    }

    /// Number of allowed values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: sanitization guarantees at least the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::sentinel_only()
    }
}
