//! Process-wide listener table.
//!
//! Controllers that need to observe events outside their own subtree
//! (outside clicks, global keys, drag moves) register here. A registration
//! lives exactly as long as the [`Subscription`] guard returned by
//! [`Listeners::subscribe`]; dropping the guard deregisters it, so a
//! controller that stores the guard in its open state cannot leak listeners
//! across open/close cycles.
//!
//! The table is single-threaded: all event processing happens on one thread
//! and handlers run to completion.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::event::{Event, EventKind};

/// Identifier of a live registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug)]
struct Registration {
    owner: String,
    kinds: Vec<EventKind>,
}

#[derive(Debug, Default)]
struct Table {
    next_id: u64,
    entries: BTreeMap<ListenerId, Registration>,
}

/// Shared handle to the listener table. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    table: Rc<RefCell<Table>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in the given event kinds on behalf of `owner`.
    pub fn subscribe(&self, owner: impl Into<String>, kinds: &[EventKind]) -> Subscription {
        let owner = owner.into();
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;

        log::debug!("[listeners] {owner} subscribed to {kinds:?} as {id:?}");
        table.entries.insert(
            id,
            Registration {
                owner,
                kinds: kinds.to_vec(),
            },
        );

        Subscription {
            id,
            kinds: kinds.to_vec(),
            table: Rc::downgrade(&self.table),
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owners currently listening for `kind`, in registration order.
    pub fn owners(&self, kind: EventKind) -> Vec<String> {
        self.table
            .borrow()
            .entries
            .values()
            .filter(|reg| reg.kinds.contains(&kind))
            .map(|reg| reg.owner.clone())
            .collect()
    }
}

/// RAII guard for a listener registration.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    kinds: Vec<EventKind>,
    table: Weak<RefCell<Table>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the registration is still present in its table.
    pub fn is_live(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|table| table.borrow().entries.contains_key(&self.id))
    }

    /// Whether this subscription should receive `event`.
    pub fn accepts(&self, event: &Event) -> bool {
        self.kinds.contains(&event.kind()) && self.is_live()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let removed = table.borrow_mut().entries.remove(&self.id);
        if let Some(reg) = removed {
            log::debug!("[listeners] {} released {:?}", reg.owner, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;

    #[test]
    fn test_drop_deregisters() {
        let listeners = Listeners::new();
        let sub = listeners.subscribe("popover", &[EventKind::PointerDown, EventKind::Key]);
        assert_eq!(listeners.len(), 1);
        assert!(sub.is_live());

        drop(sub);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_accepts_filters_by_kind() {
        let listeners = Listeners::new();
        let sub = listeners.subscribe("drag", &[EventKind::PointerMove, EventKind::PointerUp]);

        assert!(sub.accepts(&Event::pointer_move(1, 1)));
        assert!(sub.accepts(&Event::pointer_up(1, 1)));
        assert!(!sub.accepts(&Event::pointer_down(1, 1)));
        assert!(!sub.accepts(&Event::key(Key::Escape)));
    }

    #[test]
    fn test_owners_by_kind() {
        let listeners = Listeners::new();
        let _a = listeners.subscribe("a", &[EventKind::Key]);
        let _b = listeners.subscribe("b", &[EventKind::PointerDown, EventKind::Key]);

        assert_eq!(listeners.owners(EventKind::Key), vec!["a", "b"]);
        assert_eq!(listeners.owners(EventKind::PointerDown), vec!["b"]);
        assert!(listeners.owners(EventKind::Resize).is_empty());
    }

    #[test]
    fn test_subscription_outlives_table() {
        let listeners = Listeners::new();
        let sub = listeners.subscribe("orphan", &[EventKind::Key]);
        drop(listeners);

        assert!(!sub.is_live());
        assert!(!sub.accepts(&Event::key(Key::Escape)));
        // Dropping after the table is gone is a no-op
        drop(sub);
    }
}
