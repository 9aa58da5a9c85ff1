use crate::document::{Document, NodeId};

/// Find the deepest attached node at the given coordinates.
/// Returns None if the point is outside the root.
pub fn hit_test(document: &Document, x: u16, y: u16) -> Option<NodeId> {
    hit_test_node(document, document.root(), x, y)
}

/// Find the deepest node at the given coordinates within `subtree`.
pub fn hit_test_within(document: &Document, subtree: NodeId, x: u16, y: u16) -> Option<NodeId> {
    hit_test_node(document, subtree, x, y)
}

fn hit_test_node(document: &Document, node: NodeId, x: u16, y: u16) -> Option<NodeId> {
    let rect = document.rect(node)?;

    // Children are checked first and in reverse order (last attached = on top).
    // Overlay mounts are not clipped to their parent, so children are tested
    // even when the point falls outside this node.
    for child in document.children(node).into_iter().rev() {
        if let Some(hit) = hit_test_node(document, child, x, y) {
            return Some(hit);
        }
    }

    if rect.contains(x, y) {
        Some(node)
    } else {
        None
    }
}

impl Document {
    /// Deepest attached node under the point. See [`hit_test`].
    pub fn hit_test(&self, x: u16, y: u16) -> Option<NodeId> {
        hit_test(self, x, y)
    }
}
