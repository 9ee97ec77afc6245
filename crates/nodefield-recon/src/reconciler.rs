#![forbid(unsafe_code)]

//! The reconciler.
//!
//! Orchestrates the count control, the replicated entry fields, the
//! optional range control, and connector visibility into one idempotent
//! pass. Every pass derives purely from the count field's current value,
//! the [`StateStore`], and the connector master list, never from deltas,
//! so redundant invocations in quick succession are harmless.
//!
//! # Protocol
//!
//! The host drives the reconciler through explicit signals instead of
//! timers:
//!
//! 1. [`Reconciler::attach`] once, when the node's base controls and
//!    connectors exist; snapshots the connector master list.
//! 2. [`Reconciler::load`] when deserializing a saved node; fills the
//!    store and defers.
//! 3. [`Reconciler::ready`] when host setup is complete; runs the first
//!    real pass.
//! 4. [`Reconciler::observe`] (or the `note_*` methods) for every user
//!    edit the host reports. Entry edits land in the store immediately, so
//!    a delayed reconciliation never loses them.
//!
//! Errors never escape: every failure path inside a pass terminates in a
//! logged [`ReconcileOutcome::Skipped`], leaving the node inert rather
//! than destabilizing the host.

use nodefield_core::{
    ConnectorHost, FieldEvent, FieldHost, FieldValue, LayoutHost, NodePersistState,
    OptionSet, ReconcileError, StateStore,
};

use crate::config::FieldSetConfig;
use crate::count::CountBoundField;
use crate::entries::ReplicatedFieldSet;
use crate::range::DependentRangeField;
use crate::select::{self, Selection};
use crate::visibility::VisibilitySet;

/// What a reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The node was rebuilt to match the count.
    Applied {
        /// The coerced count the pass applied.
        count: i64,
        /// Number of entry fields now materialized.
        materialized: u32,
        /// Connector cutoff, if the node has a connector surface.
        cutoff: Option<u32>,
    },
    /// The node already matched; nothing was touched.
    Unchanged,
    /// Not ready yet; the pass will run on [`Reconciler::ready`].
    Deferred,
    /// The pass could not run; the node was left as-is.
    Skipped {
        /// Human-readable reason, already logged.
        reason: String,
    },
}

/// The field-set reconciler for one node instance.
#[derive(Debug)]
pub struct Reconciler {
    config: FieldSetConfig,
    count: CountBoundField,
    entries: ReplicatedFieldSet,
    range: Option<DependentRangeField>,
    visibility: VisibilitySet,
    store: StateStore,
    attached: bool,
    ready: bool,
    pending: bool,
    last_applied: Option<(i64, Option<u32>)>,
}

impl Reconciler {
    /// Create a reconciler for one node instance. No host calls happen
    /// here.
    #[must_use]
    pub fn new(config: FieldSetConfig) -> Self {
        let range = config
            .range_field()
            .map(|name| DependentRangeField::new(name, config.range_min()));
        let visibility = VisibilitySet::new(config.variable_slots(), config.fixed_trailing());
        Self {
            config,
            count: CountBoundField::new(),
            entries: ReplicatedFieldSet::new(),
            range,
            visibility,
            store: StateStore::new(),
            attached: false,
            ready: false,
            pending: false,
            last_applied: None,
        }
    }

    /// First-attachment hook: snapshot the connector master list and mark
    /// a pass pending. Idempotent; a second call changes nothing.
    pub fn attach(&mut self, host: &impl ConnectorHost) {
        if self.attached {
            return;
        }
        if let Err(err) = self.visibility.capture(host) {
            // Not fatal: a later pass retries via one-shot recovery.
            tracing::warn!(%err, "connector master list not captured at attach");
        }
        self.attached = true;
        self.pending = true;
    }

    /// Deserialization hook: populate the store from a saved payload and
    /// defer a pass to [`Reconciler::ready`].
    ///
    /// The count and range values are pushed into the host's fields here,
    /// so the pass does not depend on whether the host has already applied
    /// its own saved widget values.
    pub fn load(&mut self, host: &mut impl FieldHost, state: &NodePersistState) {
        self.store.restore(state);
        self.count.seed(state.count, self.config.max_entries());

        if let Some(id) = host.find_field(self.config.count_field()) {
            let saved = self
                .count
                .last_good()
                .unwrap_or_else(|| self.config.default_count().max(1));
            if host.value(id).and_then(|v| v.as_int()) != Some(saved) {
                host.set_value(id, FieldValue::Int(saved));
            }
        }
        if let (Some(range), Some(value)) = (&self.range, state.range) {
            if let Some(id) = host.find_field(range.name()) {
                if host.value(id).and_then(|v| v.as_int()) != Some(value) {
                    host.set_value(id, FieldValue::Int(value));
                }
            }
        }
        self.pending = true;
        tracing::debug!(
            count = state.count,
            entries = state.entries.len(),
            "node state loaded, reconcile deferred"
        );
    }

    /// Host-setup-complete signal: run the pending pass (or a fresh one).
    pub fn ready<H>(&mut self, host: &mut H, options: &OptionSet) -> ReconcileOutcome
    where
        H: FieldHost + ConnectorHost + LayoutHost,
    {
        self.ready = true;
        self.reconcile(host, options)
    }

    /// Run one reconciliation pass.
    ///
    /// Synchronous and non-blocking; safe to call redundantly. Before
    /// [`Reconciler::ready`] this only marks a pass pending and returns
    /// [`ReconcileOutcome::Deferred`].
    pub fn reconcile<H>(&mut self, host: &mut H, options: &OptionSet) -> ReconcileOutcome
    where
        H: FieldHost + ConnectorHost + LayoutHost,
    {
        if !self.ready {
            self.pending = true;
            return ReconcileOutcome::Deferred;
        }
        match self.try_reconcile(host, options) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%err, "reconcile skipped");
                ReconcileOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn try_reconcile<H>(
        &mut self,
        host: &mut H,
        options: &OptionSet,
    ) -> Result<ReconcileOutcome, ReconcileError>
    where
        H: FieldHost + ConnectorHost + LayoutHost,
    {
        if !self.attached {
            return Err(ReconcileError::NotAttached);
        }
        let _span = tracing::debug_span!("reconcile").entered();

        // Step 1: coerced count.
        let count_id = host
            .find_field(self.config.count_field())
            .ok_or_else(|| ReconcileError::MissingControl {
                name: self.config.count_field().to_owned(),
            })?;
        let raw = host.value(count_id);
        let count = self
            .count
            .coerce(raw.as_ref(), self.config.default_count(), self.config.max_entries());
        if raw.and_then(|v| v.as_int()) != Some(count) {
            host.set_value(count_id, FieldValue::Int(count));
        }
        self.store.remember_count(count);

        // Step 2: snapshot live entry values before anything is destroyed.
        self.entries.snapshot(host, &self.config, &mut self.store);

        // Steps 3–4: rebuild, unless the field set already matches.
        let settled = self.is_settled(host, options, count);
        let materialized = if settled {
            count as u32
        } else {
            self.entries.destroy_all(host, &self.config);
            self.entries
                .materialize(host, &self.config, &self.store, options, count)
        };

        // Step 5: retarget the dependent range control.
        if let Some(range) = &self.range {
            range.update(host, &mut self.store, count);
        }

        // Step 6: connector visibility from the master list.
        let cutoff = match self.visibility.apply(host, count) {
            Ok(cutoff) => cutoff,
            Err(err) => {
                tracing::warn!(%err, "connector visibility skipped");
                None
            }
        };

        // Step 7: layout, unless this pass was a proven no-op.
        let unchanged = settled && self.last_applied == Some((count, cutoff));
        self.last_applied = Some((count, cutoff));
        self.pending = false;

        if unchanged {
            tracing::debug!(count, "reconcile unchanged");
            return Ok(ReconcileOutcome::Unchanged);
        }
        host.request_recompute_size();
        host.request_redraw();
        tracing::debug!(count, materialized, cutoff, "reconcile applied");
        Ok(ReconcileOutcome::Applied {
            count,
            materialized,
            cutoff,
        })
    }

    /// Whether the materialized entry fields already match `count` exactly:
    /// indices `1..=count` contiguously, every value a member of `options`.
    fn is_settled<H: FieldHost>(&self, host: &H, options: &OptionSet, count: i64) -> bool {
        let materialized = self.entries.materialized(host, &self.config);
        if materialized.len() as i64 != count {
            return false;
        }
        for (position, index) in materialized.iter().enumerate() {
            if *index as usize != position + 1 {
                return false;
            }
            let member = host
                .find_field(&self.config.entry_field(*index))
                .and_then(|id| host.value(id))
                .and_then(|value| value.as_str().map(|text| options.contains(text)));
            if member != Some(true) {
                return false;
            }
        }
        true
    }

    /// Route a host-reported edit to the right handler.
    ///
    /// Count edits trigger a pass; entry and range edits land in the store
    /// so they survive a delayed reconciliation; anything else is ignored.
    pub fn observe<H>(
        &mut self,
        host: &mut H,
        options: &OptionSet,
        event: &FieldEvent,
    ) -> ReconcileOutcome
    where
        H: FieldHost + ConnectorHost + LayoutHost,
    {
        if event.name == self.config.count_field() {
            return self.note_count_edit(host, options);
        }
        if let Some(index) = self.config.parse_entry_field(&event.name) {
            self.note_entry_edit(index, &event.value.to_string());
            return ReconcileOutcome::Unchanged;
        }
        if Some(event.name.as_str()) == self.config.range_field() {
            if let Some(value) = event.value.as_int() {
                self.store.remember_range(value);
            }
            return ReconcileOutcome::Unchanged;
        }
        ReconcileOutcome::Unchanged
    }

    /// Count control change handler: reconcile against the host's current
    /// count value.
    pub fn note_count_edit<H>(&mut self, host: &mut H, options: &OptionSet) -> ReconcileOutcome
    where
        H: FieldHost + ConnectorHost + LayoutHost,
    {
        tracing::trace!("count edit observed");
        self.reconcile(host, options)
    }

    /// Entry change handler: record the value immediately.
    pub fn note_entry_edit(&mut self, index: u32, value: &str) {
        if index >= 1 && index <= self.config.max_entries() {
            self.store.remember_entry(index, value);
        }
    }

    /// Export the node's serializable state, capturing live field values
    /// first so edits made since the last pass are included.
    #[must_use]
    pub fn persist_state(&self, host: &impl FieldHost) -> NodePersistState {
        let mut store = self.store.clone();
        for index in 1..=self.config.max_entries() {
            if let Some(value) = host
                .find_field(&self.config.entry_field(index))
                .and_then(|id| host.value(id))
            {
                store.remember_entry(index, value.to_string());
            }
        }
        if let Some(range) = &self.range {
            if let Some(value) = host
                .find_field(range.name())
                .and_then(|id| host.value(id))
                .and_then(|v| v.as_int())
            {
                store.remember_range(value);
            }
        }
        let count = host
            .find_field(self.config.count_field())
            .and_then(|id| host.value(id))
            .and_then(|v| v.as_int())
            .filter(|v| *v >= 1)
            .map(|v| v.clamp(1, i64::from(self.config.max_entries())))
            .or_else(|| self.count.last_good())
            .unwrap_or_else(|| self.config.default_count().max(1));
        store.to_persist(count)
    }

    /// The entry the range control currently points at, if any.
    #[must_use]
    pub fn current_selection(&self) -> Option<Selection> {
        let count = self.store.last_count()?;
        let index = self.store.last_range()?;
        select::resolve(&self.store, count, index, self.config.tag_marker())
    }

    /// The per-entry value store.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// This reconciler's configuration.
    #[must_use]
    pub fn config(&self) -> &FieldSetConfig {
        &self.config
    }

    /// Whether [`Reconciler::attach`] has run.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a pass is waiting on [`Reconciler::ready`].
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
    }
}
