#![forbid(unsafe_code)]

//! Connector slot visibility.
//!
//! Connectors cannot be structurally removed and re-added without breaking
//! existing links, so this is a separate state machine from the entry
//! fields: the slot list is fixed, and only visibility toggles. The first
//! `variable_slots` positions are shown iff their index is below the
//! count-derived cutoff; the trailing `fixed_trailing` positions are always
//! shown.
//!
//! All recomputation derives from the master list: a snapshot of the full
//! slot list taken once at first attachment. Deriving from the live list
//! after it has been filtered would lose the trailing fixed slots for
//! good. If the snapshot goes missing or stops matching the host, one
//! recovery from the live list is attempted, and only when the live length
//! matches the expected total; otherwise visibility reconciliation refuses
//! to run rather than corrupt connector identity.

use nodefield_core::{ConnectorHost, ReconcileError, SlotFlags, SlotId};

/// Visibility driver for one node's connector slots.
#[derive(Debug, Clone, Default)]
pub struct VisibilitySet {
    variable_slots: u32,
    fixed_trailing: u32,
    master: Vec<SlotId>,
    recovered: bool,
}

impl VisibilitySet {
    /// Create a driver for `variable_slots` count-driven positions followed
    /// by `fixed_trailing` always-visible positions.
    #[must_use]
    pub fn new(variable_slots: u32, fixed_trailing: u32) -> Self {
        Self {
            variable_slots,
            fixed_trailing,
            master: Vec::new(),
            recovered: false,
        }
    }

    /// Expected total slot count.
    #[must_use]
    pub fn expected_total(&self) -> usize {
        self.variable_slots as usize + self.fixed_trailing as usize
    }

    /// Whether the master list has been captured.
    #[must_use]
    pub fn has_master(&self) -> bool {
        !self.master.is_empty()
    }

    /// The master list, as captured.
    #[must_use]
    pub fn master(&self) -> &[SlotId] {
        &self.master
    }

    /// Snapshot the host's full slot list as the master list.
    ///
    /// A one-time operation: an already-captured master list is never
    /// overwritten (a later call with a filtered live list must not win).
    /// Refuses to capture a list of the wrong length.
    pub fn capture(&mut self, host: &impl ConnectorHost) -> Result<(), ReconcileError> {
        if self.has_master() {
            return Ok(());
        }
        let live = host.slot_ids();
        if live.len() != self.expected_total() {
            return Err(ReconcileError::MasterListMismatch {
                expected: self.expected_total(),
                actual: live.len(),
            });
        }
        self.master = live;
        Ok(())
    }

    /// The cutoff for a given count: `clamp(count, 1, variable_slots)`,
    /// or 0 when the node has no variable slots.
    #[must_use]
    pub fn cutoff(&self, count: i64) -> u32 {
        if self.variable_slots == 0 {
            return 0;
        }
        count.clamp(1, i64::from(self.variable_slots)) as u32
    }

    /// Category and target visibility of the slot at `position` for a
    /// given count.
    #[must_use]
    pub fn slot_flags(&self, position: usize, count: i64) -> SlotFlags {
        if position < self.variable_slots as usize {
            if (position as u32) < self.cutoff(count) {
                SlotFlags::VARIABLE | SlotFlags::VISIBLE
            } else {
                SlotFlags::VARIABLE
            }
        } else {
            SlotFlags::FIXED_TRAILING | SlotFlags::VISIBLE
        }
    }

    /// Apply visibility for `count` across the master list.
    ///
    /// Variable positions below the cutoff are shown, the rest hidden;
    /// fixed trailing positions are always shown. A slot transitioning to
    /// hidden gets a link-detach request first. Returns the cutoff, or
    /// `Ok(None)` when the node has no connector surface at all.
    pub fn apply(
        &mut self,
        host: &mut impl ConnectorHost,
        count: i64,
    ) -> Result<Option<u32>, ReconcileError> {
        if self.expected_total() == 0 {
            return Ok(None);
        }
        if !self.has_master() && host.slot_count() == 0 {
            // No connector surface on this node kind.
            return Ok(None);
        }
        self.ensure_master(host)?;

        let cutoff = self.cutoff(count);
        for (position, id) in self.master.iter().enumerate() {
            let visible = self.slot_flags(position, count).contains(SlotFlags::VISIBLE);
            if host.is_visible(*id) == visible {
                continue;
            }
            if !visible {
                host.detach_links(*id);
            }
            host.set_visible(*id, visible);
        }
        Ok(Some(cutoff))
    }

    /// Validate the master list, recovering once from the live list if it
    /// is missing or the wrong length and the live list's length matches
    /// the expected total.
    fn ensure_master(&mut self, host: &impl ConnectorHost) -> Result<(), ReconcileError> {
        if self.master.len() == self.expected_total() {
            return Ok(());
        }
        let actual = host.slot_count();
        if !self.recovered && actual == self.expected_total() {
            self.master = host.slot_ids();
            self.recovered = true;
            tracing::warn!(
                expected = self.expected_total(),
                "connector master list rebuilt from live list"
            );
            return Ok(());
        }
        Err(ReconcileError::MasterListMismatch {
            expected: self.expected_total(),
            actual,
        })
    }
}
