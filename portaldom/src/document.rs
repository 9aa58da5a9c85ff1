//! The shared UI tree.
//!
//! A [`Document`] is the single attachment root every overlay mounts into.
//! Nodes live in an arena and are addressed by [`NodeId`]. A node can exist
//! without being attached (no path to the root), which is how mount points
//! are parked while their overlay is closed.
//!
//! The document is a cheap-clone handle over single-threaded shared state;
//! controllers keep a clone so teardown can detach without extra plumbing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::Element;
use crate::layout::Rect;
use crate::length::{Length, Position};
use crate::listeners::Listeners;

/// Arena index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    id: String,
    class: String,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    left: Length,
    top: Length,
    width: u16,
    height: u16,
}

impl Node {
    fn new(id: String, class: String) -> Self {
        Self {
            id,
            class,
            text: None,
            parent: None,
            children: Vec::new(),
            left: Length::ZERO,
            top: Length::ZERO,
            width: 0,
            height: 0,
        }
    }
}

#[derive(Debug)]
struct Dom {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
    viewport: (u16, u16),
}

impl Dom {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn unlink(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|&child| child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
        true
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        self.free.push(id.0);
        for child in node.children {
            self.free_subtree(child);
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn origin(&self, id: NodeId) -> Option<(i32, i32)> {
        let node = self.node(id)?;
        let (base_x, base_y) = match node.parent {
            Some(parent) => self.origin(parent)?,
            None => (0, 0),
        };
        let (width, height) = self.viewport;
        Some((
            base_x + node.left.resolve(width),
            base_y + node.top.resolve(height),
        ))
    }

    fn materialize(&mut self, element: &Element, parent: NodeId, top: i32) -> NodeId {
        let (width, height) = element.extent();
        let mut node = Node::new(element.id.clone(), element.class.clone());
        node.text = element.text.clone();
        node.parent = Some(parent);
        node.top = Length::Cells(top);
        node.width = width;
        node.height = height;
        let id = self.alloc(node);

        let mut cursor = 0i32;
        for child in &element.children {
            let child_id = self.materialize(child, id, cursor);
            cursor += i32::from(child.extent().1);
            if let Some(node) = self.node_mut(id) {
                node.children.push(child_id);
            }
        }
        id
    }
}

/// Handle to the shared UI tree.
#[derive(Debug, Clone)]
pub struct Document {
    dom: Rc<RefCell<Dom>>,
    listeners: Listeners,
}

impl Document {
    /// Create a document whose root covers a viewport of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        let mut root = Node::new("root".to_string(), String::new());
        root.width = width;
        root.height = height;
        Self {
            dom: Rc::new(RefCell::new(Dom {
                nodes: vec![Some(root)],
                free: Vec::new(),
                root: NodeId(0),
                viewport: (width, height),
            })),
            listeners: Listeners::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.dom.borrow().root
    }

    /// The process-wide listener table for this document.
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.dom.borrow().viewport
    }

    pub fn resize(&self, width: u16, height: u16) {
        let mut dom = self.dom.borrow_mut();
        dom.viewport = (width, height);
        let root = dom.root;
        if let Some(node) = dom.node_mut(root) {
            node.width = width;
            node.height = height;
        }
    }

    /// Create a detached element tagged with `id` and `class`.
    pub fn create_element(&self, id: impl Into<String>, class: impl Into<String>) -> NodeId {
        self.dom
            .borrow_mut()
            .alloc(Node::new(id.into(), class.into()))
    }

    /// Whether `id` refers to a node that has not been destroyed.
    pub fn exists(&self, id: NodeId) -> bool {
        self.dom.borrow().node(id).is_some()
    }

    /// Append `child` to `parent`, moving it if it already has a parent.
    ///
    /// Returns false if either node is gone or the move would create a cycle.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> bool {
        let mut dom = self.dom.borrow_mut();
        if dom.node(parent).is_none() || dom.node(child).is_none() {
            return false;
        }
        if dom.contains(child, parent) {
            log::warn!("[document] refusing to append {child:?} into its own subtree");
            return false;
        }
        dom.unlink(child);
        if let Some(node) = dom.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = dom.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Detach `node` from its parent. The node survives and can be re-attached.
    ///
    /// Returns false if the node had no parent.
    pub fn remove(&self, node: NodeId) -> bool {
        self.dom.borrow_mut().unlink(node)
    }

    /// Detach and free `node` and its whole subtree.
    pub fn destroy(&self, node: NodeId) {
        let mut dom = self.dom.borrow_mut();
        if node == dom.root {
            return;
        }
        dom.unlink(node);
        dom.free_subtree(node);
    }

    /// Whether `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let dom = self.dom.borrow();
        dom.node(node).is_some() && dom.contains(dom.root, node)
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.dom.borrow().contains(ancestor, node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.borrow().node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.dom
            .borrow()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// The `id` attribute of a node.
    pub fn element_id(&self, node: NodeId) -> Option<String> {
        self.dom.borrow().node(node).map(|n| n.id.clone())
    }

    pub fn class(&self, node: NodeId) -> Option<String> {
        self.dom.borrow().node(node).map(|n| n.class.clone())
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.dom.borrow().node(node).and_then(|n| n.text.clone())
    }

    /// Find an attached node by its `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        fn walk(dom: &Dom, node: NodeId, id: &str) -> Option<NodeId> {
            let current = dom.node(node)?;
            if current.id == id {
                return Some(node);
            }
            current
                .children
                .iter()
                .find_map(|&child| walk(dom, child, id))
        }

        let dom = self.dom.borrow();
        walk(&dom, dom.root, id)
    }

    /// Set the `left`/`top` style offsets of a node.
    pub fn set_offset(&self, node: NodeId, position: Position) {
        if let Some(node) = self.dom.borrow_mut().node_mut(node) {
            node.left = position.x;
            node.top = position.y;
        }
    }

    /// The unresolved `left`/`top` style offsets of a node.
    pub fn offset(&self, node: NodeId) -> Option<Position> {
        self.dom
            .borrow()
            .node(node)
            .map(|n| Position::new(n.left, n.top))
    }

    /// Resolved distance in cells from the viewport's left edge.
    pub fn offset_left(&self, node: NodeId) -> Option<i32> {
        self.dom.borrow().origin(node).map(|(x, _)| x)
    }

    /// Resolved distance in cells from the viewport's top edge.
    pub fn offset_top(&self, node: NodeId) -> Option<i32> {
        self.dom.borrow().origin(node).map(|(_, y)| y)
    }

    /// Rendered size of a node.
    pub fn size(&self, node: NodeId) -> Option<(u16, u16)> {
        self.dom.borrow().node(node).map(|n| (n.width, n.height))
    }

    pub fn set_size(&self, node: NodeId, width: u16, height: u16) {
        if let Some(node) = self.dom.borrow_mut().node_mut(node) {
            node.width = width;
            node.height = height;
        }
    }

    /// Screen rectangle of a node, clamped to non-negative coordinates.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        let dom = self.dom.borrow();
        let (left, top) = dom.origin(node)?;
        let n = dom.node(node)?;
        Some(Rect::from_origin(left, top, n.width, n.height))
    }

    /// Replace the children of `node` with `element`, returning the new
    /// content root. `node` takes the size of the mounted content.
    pub fn mount(&self, node: NodeId, element: &Element) -> Option<NodeId> {
        let mut dom = self.dom.borrow_mut();
        let old_children = std::mem::take(&mut dom.node_mut(node)?.children);
        for child in old_children {
            dom.free_subtree(child);
        }

        let content = dom.materialize(element, node, 0);
        let (width, height) = element.extent();
        let target = dom.node_mut(node)?;
        target.children.push(content);
        target.width = width;
        target.height = height;
        Some(content)
    }
}
