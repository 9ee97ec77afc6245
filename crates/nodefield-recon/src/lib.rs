#![forbid(unsafe_code)]

//! Count-driven field-set reconciliation for node-graph editors.
//!
//! A node exposes a single count control; this crate keeps the node's
//! replicated entry fields and its output-connector visibility in lockstep
//! with it, preserving user-entered values across shrink/grow cycles and
//! across save/reload of the graph.
//!
//! The host editor is reached only through the capability traits in
//! `nodefield-core` ([`FieldHost`](nodefield_core::FieldHost),
//! [`ConnectorHost`](nodefield_core::ConnectorHost),
//! [`LayoutHost`](nodefield_core::LayoutHost)); the reconciler holds no
//! editor globals and no references into the host between passes.
//!
//! ```
//! use nodefield_core::OptionSet;
//! use nodefield_harness::MockNode;
//! use nodefield_recon::{FieldSetConfig, Reconciler};
//!
//! let config = FieldSetConfig::new("entry_count", "entry_")
//!     .with_max_entries(5)
//!     .with_range_field("index")
//!     .with_connector_slots(5, 2);
//! let mut node = MockNode::builder()
//!     .int_field("entry_count", 3)
//!     .int_field("index", 1)
//!     .slots(7)
//!     .build();
//! let options = OptionSet::new(["a", "b", "c"]);
//!
//! let mut recon = Reconciler::new(config);
//! recon.attach(&node);
//! recon.ready(&mut node, &options);
//! assert_eq!(node.entry_fields("entry_"), ["entry_1", "entry_2", "entry_3"]);
//! ```

pub mod config;
pub mod count;
pub mod entries;
pub mod range;
pub mod reconciler;
pub mod select;
pub mod visibility;

pub use config::{DEFAULT_MAX_ENTRIES, FieldSetConfig};
pub use count::CountBoundField;
pub use entries::ReplicatedFieldSet;
pub use range::DependentRangeField;
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use select::{Selection, derive_tag, resolve};
pub use visibility::VisibilitySet;
