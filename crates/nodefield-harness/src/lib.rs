#![forbid(unsafe_code)]

//! Test harness for nodefield.
//!
//! [`MockNode`] is a complete in-memory stand-in for a host editor node:
//! fields in display order, a fixed connector slot list with visibility
//! flags and link bookkeeping, layout/redraw counters, and ordered edit
//! subscribers. Integration tests drive a real [`Reconciler`] against it;
//! embedders can use it to test their own wiring.
//!
//! [`Reconciler`]: nodefield_recon::Reconciler

pub mod fixtures;

use ahash::AHashMap;

use nodefield_core::{
    ConnectorHost, FieldEvent, FieldHost, FieldId, FieldValue, LayoutHost, OptionSet, SlotId,
    SubscriberId, Subscribers,
};

/// One field of a mock node.
#[derive(Debug, Clone)]
struct MockField {
    id: FieldId,
    name: String,
    value: FieldValue,
    bounds: Option<(i64, i64)>,
}

/// One connector slot of a mock node.
#[derive(Debug, Clone)]
struct MockSlot {
    id: SlotId,
    visible: bool,
    links: u32,
}

/// An in-memory node implementing all three host capabilities.
#[derive(Default)]
pub struct MockNode {
    fields: Vec<MockField>,
    by_name: AHashMap<String, FieldId>,
    next_field: u64,
    slots: Vec<MockSlot>,
    detach_log: Vec<SlotId>,
    size_recomputes: usize,
    redraws: usize,
    subscribers: Subscribers<FieldEvent>,
}

impl std::fmt::Debug for MockNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockNode")
            .field("fields", &self.fields.len())
            .field("slots", &self.slots.len())
            .field("redraws", &self.redraws)
            .finish()
    }
}

impl MockNode {
    /// Start building a node.
    #[must_use]
    pub fn builder() -> MockNodeBuilder {
        MockNodeBuilder::default()
    }

    fn push_field(&mut self, name: &str, value: FieldValue) -> FieldId {
        let id = FieldId(self.next_field);
        self.next_field += 1;
        self.fields.push(MockField {
            id,
            name: name.to_owned(),
            value,
            bounds: None,
        });
        self.by_name.insert(name.to_owned(), id);
        id
    }

    fn field(&self, id: FieldId) -> Option<&MockField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn field_mut(&mut self, id: FieldId) -> Option<&mut MockField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Simulate a user edit: set the field's value, fan the event out to
    /// subscribers, and return it for routing into a reconciler.
    pub fn edit(&mut self, name: &str, value: impl Into<FieldValue>) -> FieldEvent {
        let value = value.into();
        if let Some(id) = self.by_name.get(name).copied() {
            if let Some(field) = self.field_mut(id) {
                field.value = value.clone();
            }
        }
        let event = FieldEvent {
            name: name.to_owned(),
            value,
        };
        tracing::trace!(name, value = %event.value, "mock edit");
        self.subscribers.emit(&event);
        event
    }

    /// Register an edit subscriber (fires in registration order).
    pub fn subscribe_edits(&mut self, callback: impl FnMut(&FieldEvent) + 'static) -> SubscriberId {
        self.subscribers.subscribe(callback)
    }

    /// Current value of the field named `name`.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        let id = self.by_name.get(name)?;
        self.field(*id).map(|f| f.value.clone())
    }

    /// Integer bounds last set on the field named `name`.
    #[must_use]
    pub fn bounds(&self, name: &str) -> Option<(i64, i64)> {
        let id = self.by_name.get(name)?;
        self.field(*id).and_then(|f| f.bounds)
    }

    /// Names of replicated entry fields for `prefix`, in display order.
    ///
    /// An entry field is `prefix` followed by a numeric index (e.g.
    /// `entry_1`); sibling controls that merely share the prefix, such as
    /// the `entry_count` control, are not entries and are excluded.
    #[must_use]
    pub fn entry_fields(&self, prefix: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| {
                f.name
                    .strip_prefix(prefix)
                    .is_some_and(|rest| !rest.is_empty() && rest.parse::<u32>().is_ok())
            })
            .map(|f| f.name.clone())
            .collect()
    }

    /// Positional ids of currently visible slots.
    #[must_use]
    pub fn visible_slots(&self) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.id.0)
            .collect()
    }

    /// Attach `links` pretend links to a slot.
    pub fn link_slot(&mut self, id: SlotId, links: u32) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.links = links;
        }
    }

    /// Number of links currently attached to a slot.
    #[must_use]
    pub fn links(&self, id: SlotId) -> u32 {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map_or(0, |s| s.links)
    }

    /// Every detach request the node has received, in order.
    #[must_use]
    pub fn detach_log(&self) -> &[SlotId] {
        &self.detach_log
    }

    /// Structurally remove a slot, simulating an external mutation the
    /// reconciler must survive. Real hosts never do this on purpose.
    pub fn corrupt_remove_slot(&mut self, id: SlotId) {
        self.slots.retain(|s| s.id != id);
    }

    /// How many size recomputes the node was asked for.
    #[must_use]
    pub fn size_recomputes(&self) -> usize {
        self.size_recomputes
    }

    /// How many redraws the node was asked for.
    #[must_use]
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl FieldHost for MockNode {
    fn find_field(&self, name: &str) -> Option<FieldId> {
        self.by_name.get(name).copied()
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn value(&self, id: FieldId) -> Option<FieldValue> {
        self.field(id).map(|f| f.value.clone())
    }

    fn set_value(&mut self, id: FieldId, value: FieldValue) {
        if let Some(field) = self.field_mut(id) {
            field.value = value;
        }
    }

    fn add_choice_field(&mut self, name: &str, initial: &str, _options: &OptionSet) -> FieldId {
        self.push_field(name, FieldValue::text(initial))
    }

    fn remove_field(&mut self, id: FieldId) -> bool {
        let Some(position) = self.fields.iter().position(|f| f.id == id) else {
            return false;
        };
        let removed = self.fields.remove(position);
        self.by_name.remove(&removed.name);
        true
    }

    fn set_int_bounds(&mut self, id: FieldId, min: i64, max: i64) {
        if let Some(field) = self.field_mut(id) {
            field.bounds = Some((min, max));
        }
    }
}

impl ConnectorHost for MockNode {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    fn is_visible(&self, id: SlotId) -> bool {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .is_some_and(|s| s.visible)
    }

    fn set_visible(&mut self, id: SlotId, visible: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.visible = visible;
        }
    }

    fn detach_links(&mut self, id: SlotId) {
        self.detach_log.push(id);
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.links = 0;
        }
    }
}

impl LayoutHost for MockNode {
    fn request_recompute_size(&mut self) {
        self.size_recomputes += 1;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

/// Builder for [`MockNode`].
#[derive(Debug, Default)]
pub struct MockNodeBuilder {
    fields: Vec<(String, FieldValue)>,
    slots: u32,
}

impl MockNodeBuilder {
    /// Add an integer field.
    #[must_use]
    pub fn int_field(mut self, name: impl Into<String>, value: i64) -> Self {
        self.fields.push((name.into(), FieldValue::Int(value)));
        self
    }

    /// Add a text field.
    #[must_use]
    pub fn text_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), FieldValue::Text(value.into())));
        self
    }

    /// Give the node `total` connector slots, all initially visible.
    #[must_use]
    pub fn slots(mut self, total: u32) -> Self {
        self.slots = total;
        self
    }

    /// Build the node.
    #[must_use]
    pub fn build(self) -> MockNode {
        let mut node = MockNode::default();
        for (name, value) in self.fields {
            node.push_field(&name, value);
        }
        node.slots = (0..self.slots)
            .map(|i| MockSlot {
                id: SlotId(i),
                visible: true,
                links: 0,
            })
            .collect();
        node
    }
}
