#![forbid(unsafe_code)]

//! Reference fixtures.
//!
//! Two canonical node shapes the reconciler is built for: an indexed
//! resource picker (replicated choice entries, a range control, fixed
//! outputs only) and a segment splitter (count-driven variable outputs
//! plus fixed trailing outputs).

use nodefield_core::OptionSet;
use nodefield_recon::{FieldSetConfig, Reconciler};

use crate::MockNode;

/// An indexed resource picker: up to 20 replicated choice entries, an
/// `index` range control, and three always-visible outputs.
///
/// The node starts with its base controls only; entry fields appear on the
/// first reconcile.
#[must_use]
pub fn picker() -> (MockNode, Reconciler, OptionSet) {
    let config = FieldSetConfig::new("entry_count", "entry_")
        .with_max_entries(20)
        .with_default_count(5)
        .with_range_field("index")
        .with_connector_slots(0, 3);
    let node = MockNode::builder()
        .int_field("entry_count", 5)
        .int_field("index", 1)
        .slots(3)
        .build();
    let options = OptionSet::new([
        "alpha_set.bin",
        "bravo_set.bin",
        "charlie_set.bin",
        "delta_set.bin",
        "echo_set.bin",
        "foxtrot_set.bin",
    ]);
    (node, Reconciler::new(config), options)
}

/// A segment splitter: five count-driven outputs followed by four fixed
/// trailing outputs, no range control.
#[must_use]
pub fn splitter() -> (MockNode, Reconciler, OptionSet) {
    let config = FieldSetConfig::new("segment_count", "segment_")
        .with_max_entries(5)
        .with_connector_slots(5, 4);
    let node = MockNode::builder()
        .int_field("segment_count", 2)
        .slots(9)
        .build();
    (node, Reconciler::new(config), OptionSet::default())
}
