#![forbid(unsafe_code)]

//! Host editor capabilities.
//!
//! The reconciler never reaches into editor globals. It receives a node
//! handle implementing these traits and drives everything through them:
//! fields through [`FieldHost`], connector visibility through
//! [`ConnectorHost`], and size/redraw requests through [`LayoutHost`].
//! A real embedding implements all three on its node type; the harness
//! crate provides an in-memory implementation for tests.

use crate::value::FieldValue;
use crate::options::OptionSet;

/// Opaque identity of a field within one node.
///
/// Stable for the lifetime of the field; a removed and re-added field may
/// receive a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

/// Positional identity of a connector slot within one node.
///
/// Slots are never structurally removed, so a `SlotId` stays valid for the
/// node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

bitflags::bitflags! {
    /// Category and state flags for a connector slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SlotFlags: u8 {
        /// Slot belongs to the variable range driven by the count.
        const VARIABLE = 1 << 0;
        /// Slot belongs to the fixed trailing range, always shown.
        const FIXED_TRAILING = 1 << 1;
        /// Slot is currently visible.
        const VISIBLE = 1 << 2;
    }
}

/// A single user edit of a field, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    /// Name of the edited field.
    pub name: String,
    /// The new value.
    pub value: FieldValue,
}

/// Field (widget) capabilities of a host node.
///
/// Enumeration order is display order. Field names are unique per node.
pub trait FieldHost {
    /// Look up a field by name.
    fn find_field(&self, name: &str) -> Option<FieldId>;

    /// All field names, in display order.
    fn field_names(&self) -> Vec<String>;

    /// Current value of a field, if it exists.
    fn value(&self, id: FieldId) -> Option<FieldValue>;

    /// Set a field's value. Unknown ids are ignored.
    fn set_value(&mut self, id: FieldId, value: FieldValue);

    /// Append a choice field backed by `options`, returning its id.
    fn add_choice_field(&mut self, name: &str, initial: &str, options: &OptionSet) -> FieldId;

    /// Remove a field. Returns whether the field existed.
    fn remove_field(&mut self, id: FieldId) -> bool;

    /// Set the valid integer range of a numeric field. Unknown ids are
    /// ignored.
    fn set_int_bounds(&mut self, id: FieldId, min: i64, max: i64);
}

/// Connector capabilities of a host node.
///
/// Connectors toggle visibility only; the slot list itself is fixed. Link
/// detachment is a request: the host owns the link graph and performs the
/// actual mutation.
pub trait ConnectorHost {
    /// Number of slots currently in the node's live list.
    fn slot_count(&self) -> usize;

    /// The live slot list, in positional order.
    fn slot_ids(&self) -> Vec<SlotId>;

    /// Whether a slot is currently visible. Unknown slots read as hidden.
    fn is_visible(&self, id: SlotId) -> bool;

    /// Show or hide a slot. Unknown slots are ignored.
    fn set_visible(&mut self, id: SlotId, visible: bool);

    /// Ask the host to detach any links attached to a slot.
    fn detach_links(&mut self, id: SlotId);
}

/// Layout capabilities of a host node.
pub trait LayoutHost {
    /// Ask the host to recompute the node's size after field changes.
    fn request_recompute_size(&mut self);

    /// Ask the host to repaint.
    fn request_redraw(&mut self);
}
