//! Mount point registry.
//!
//! Each overlay id owns at most one mount node in the document. The registry
//! hands out reference-counted [`MountHandle`]s: acquiring an id that is
//! already live returns the existing node instead of creating a duplicate.
//! When the last handle for an id is dropped the node is destroyed and the
//! record purged, so a later acquire starts fresh.
//!
//! Two controllers constructed with the same id therefore share one node.
//! That is defined behavior, but closing either one detaches the node for
//! both.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use portaldom::{Document, NodeId, Position};

type Records = Rc<RefCell<HashMap<String, Weak<MountSlot>>>>;

struct MountSlot {
    id: String,
    node: NodeId,
    document: Document,
    records: Weak<RefCell<HashMap<String, Weak<MountSlot>>>>,
}

impl Drop for MountSlot {
    fn drop(&mut self) {
        log::debug!("[mount] releasing mount point '{}'", self.id);
        self.document.destroy(self.node);

        if let Some(records) = self.records.upgrade() {
            let mut records = records.borrow_mut();
            // Only purge the record if it still points at a dead slot
            if records
                .get(&self.id)
                .is_some_and(|weak| weak.upgrade().is_none())
            {
                records.remove(&self.id);
            }
        }
    }
}

/// Registry of mount points keyed by overlay id. Cloning is cheap.
#[derive(Clone)]
pub struct MountRegistry {
    document: Document,
    records: Records,
}

impl MountRegistry {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            records: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Return the live mount point for `id`, creating it if needed.
    ///
    /// A newly created node is tagged with `id` and `style_class` and starts
    /// detached. An existing node keeps the tags it was created with.
    pub fn acquire(&self, id: &str, style_class: &str) -> MountHandle {
        if let Some(slot) = self.records.borrow().get(id).and_then(Weak::upgrade) {
            log::trace!("[mount] reusing mount point '{id}'");
            return MountHandle { slot };
        }

        let node = self.document.create_element(id, style_class);
        let slot = Rc::new(MountSlot {
            id: id.to_string(),
            node,
            document: self.document.clone(),
            records: Rc::downgrade(&self.records),
        });
        self.records
            .borrow_mut()
            .insert(id.to_string(), Rc::downgrade(&slot));
        log::debug!("[mount] created mount point '{id}' ({style_class})");

        MountHandle { slot }
    }

    /// Whether a live mount point exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.records
            .borrow()
            .get(id)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of live mount points.
    pub fn len(&self) -> usize {
        self.records
            .borrow()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MountRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountRegistry")
            .field("live", &self.len())
            .finish()
    }
}

/// Shared handle to a mount point.
#[derive(Clone)]
pub struct MountHandle {
    slot: Rc<MountSlot>,
}

impl MountHandle {
    pub fn id(&self) -> &str {
        &self.slot.id
    }

    pub fn node(&self) -> NodeId {
        self.slot.node
    }

    pub fn document(&self) -> &Document {
        &self.slot.document
    }

    /// Ensure the mount point is attached to the document root.
    ///
    /// Returns true if the tree changed.
    pub fn attach(&self) -> bool {
        let document = &self.slot.document;
        if document.is_attached(self.slot.node) {
            return false;
        }
        let attached = document.append_child(document.root(), self.slot.node);
        if attached {
            log::debug!("[mount] attached '{}'", self.slot.id);
        }
        attached
    }

    /// Ensure the mount point is not in the tree.
    ///
    /// Returns true if the tree changed.
    pub fn detach(&self) -> bool {
        let detached = self.slot.document.remove(self.slot.node);
        if detached {
            log::debug!("[mount] detached '{}'", self.slot.id);
        }
        detached
    }

    pub fn is_attached(&self) -> bool {
        self.slot.document.is_attached(self.slot.node)
    }

    /// Apply `position` as the mount point's style offset.
    pub fn set_position(&self, position: Position) {
        self.slot.document.set_offset(self.slot.node, position);
    }

    /// Number of handles sharing this mount point.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.slot)
    }

    /// Whether two handles refer to the same mount point.
    pub fn same_mount(&self, other: &MountHandle) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountHandle")
            .field("id", &self.slot.id)
            .field("node", &self.slot.node)
            .finish()
    }
}
