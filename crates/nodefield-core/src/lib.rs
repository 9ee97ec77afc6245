#![forbid(unsafe_code)]

//! Core types for the nodefield reconciler.
//!
//! This crate defines the host-agnostic pieces the reconciler is built on:
//! control values ([`FieldValue`]), sanitized option lists ([`OptionSet`]),
//! the persisted per-entry value cache ([`StateStore`] and its serialized
//! form [`NodePersistState`]), the capability traits a host editor exposes
//! ([`FieldHost`], [`ConnectorHost`], [`LayoutHost`]), ordered change
//! subscribers ([`Subscribers`]), and the error taxonomy
//! ([`ReconcileError`]).
//!
//! Nothing here touches a real editor. Hosts implement the capability
//! traits; `nodefield-recon` drives them.

pub mod error;
pub mod host;
pub mod options;
pub mod store;
pub mod subscribe;
pub mod value;

pub use error::ReconcileError;
pub use host::{ConnectorHost, FieldEvent, FieldHost, FieldId, LayoutHost, SlotFlags, SlotId};
pub use options::{NONE_SENTINEL, OptionSet};
pub use store::{NodePersistState, StateStore};
pub use subscribe::{SubscriberId, Subscribers};
pub use value::FieldValue;
