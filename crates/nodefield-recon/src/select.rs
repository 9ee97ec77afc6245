#![forbid(unsafe_code)]

//! Indexed entry selection.
//!
//! The backend half of the pattern: once the field set is reconciled, the
//! range control points at one entry, and this module resolves which value
//! that is. An index outside `[1, count]`, an entry that was never
//! populated, and the `"none"` sentinel all resolve to no selection: a
//! logged no-op, never an error.

use nodefield_core::{NONE_SENTINEL, StateStore};

/// A resolved selection: the entry the range control points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 1-based entry index.
    pub index: i64,
    /// The entry's value.
    pub value: String,
    /// Tag derived from the value via [`derive_tag`].
    pub tag: String,
}

/// Resolve the entry at `index` from reconciled state.
///
/// `marker` is the suffix marker handed to [`derive_tag`].
#[must_use]
pub fn resolve(store: &StateStore, count: i64, index: i64, marker: &str) -> Option<Selection> {
    if index < 1 || index > count {
        tracing::debug!(index, count, "selection index out of range");
        return None;
    }
    let value = store.entry(index as u32)?;
    if value == NONE_SENTINEL || value.is_empty() {
        tracing::debug!(index, "selected entry is unset");
        return None;
    }
    Some(Selection {
        index,
        value: value.to_owned(),
        tag: derive_tag(value, marker),
    })
}

/// Derive a display tag from an entry value.
///
/// The value is treated as a file-name-like string: a trailing extension
/// is stripped, then the stem is cut at the first case-insensitive
/// occurrence of `marker`, and the result trimmed. A stem without the
/// marker is returned whole.
///
/// `"Snorri-3434_set.bin"` with marker `"_set"` yields `"Snorri-3434"`.
#[must_use]
pub fn derive_tag(value: &str, marker: &str) -> String {
    let stem = strip_extension(value);
    let cut = match find_ascii_ci(stem, marker) {
        Some(at) => &stem[..at],
        None => stem,
    };
    cut.trim().to_owned()
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Strip a trailing `.ext` if one follows the last path separator.
fn strip_extension(value: &str) -> &str {
    let file_start = value.rfind(['/', '\\']).map_or(0, |at| at + 1);
    match value[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &value[..file_start + dot],
        _ => value,
    }
}
