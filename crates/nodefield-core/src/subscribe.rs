#![forbid(unsafe_code)]

//! Ordered change subscribers.
//!
//! Each control carries an explicit list of subscribers invoked in
//! registration order. This replaces ad-hoc callback wrapping (saving the
//! previous handler and calling it from the new one), which inverts
//! invocation order and breaks once a third party re-points the handler
//! again.
//!
//! ```
//! use nodefield_core::subscribe::Subscribers;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut subs: Subscribers<i64> = Subscribers::new();
//!
//! let a = Rc::clone(&seen);
//! subs.subscribe(move |v| a.borrow_mut().push(("first", *v)));
//! let b = Rc::clone(&seen);
//! subs.subscribe(move |v| b.borrow_mut().push(("second", *v)));
//!
//! subs.emit(&7);
//! assert_eq!(*seen.borrow(), [("first", 7), ("second", 7)]);
//! ```

use std::fmt;

/// Handle returned by [`Subscribers::subscribe`], usable for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// An ordered list of callbacks for one control.
///
/// Not thread-safe; reconciliation is single-threaded by contract.
pub struct Subscribers<E> {
    next_id: u64,
    entries: Vec<(SubscriberId, Box<dyn FnMut(&E)>)>,
}

impl<E> Subscribers<E> {
    /// Create an empty subscriber list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Append a subscriber. Subscribers fire in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every subscriber with `event`, in registration order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no subscribers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}
