//! Pointer drag sessions.
//!
//! A session starts on pointer-down, registers process-wide interest in
//! pointer moves and releases, and turns each move into a per-axis clamped
//! offset for the tracked node. The anchor is reset to the latest pointer
//! position after every move, so deltas are incremental.
//!
//! The node's size and offset are read fresh from the document on every
//! move; content can change size between (or during) sessions.

use portaldom::{Document, Event, EventKind, Listeners, NodeId, Point, Subscription};

/// Live state between a pointer-down and the following pointer-up.
#[derive(Debug)]
pub struct DragSession {
    anchor: Point,
    subscription: Subscription,
}

impl DragSession {
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// Result of feeding one event to a [`DragController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// No session, or not a drag event.
    Ignored,
    /// New offsets for the axes whose move stayed in bounds.
    Moved { x: Option<i32>, y: Option<i32> },
    /// The session ended.
    Ended,
}

/// Accept a move along one axis only if the node stays fully inside the viewport.
///
/// Returns the new offset, or `None` when `offset + delta` would leave
/// `[0, viewport - extent]`.
pub fn clamp_axis(offset: i32, delta: i32, extent: u16, viewport: u16) -> Option<i32> {
    let next = offset + delta;
    let limit = i32::from(viewport) - i32::from(extent);
    (0..=limit).contains(&next).then_some(next)
}

/// Drives drag sessions for one node.
#[derive(Debug)]
pub struct DragController {
    owner: String,
    listeners: Listeners,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(owner: impl Into<String>, listeners: Listeners) -> Self {
        Self {
            owner: owner.into(),
            listeners,
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begin a session anchored at `pointer`. Restarting replaces the anchor.
    pub fn start(&mut self, pointer: Point) {
        if let Some(session) = self.session.as_mut() {
            session.anchor = pointer;
            return;
        }
        let subscription = self.listeners.subscribe(
            format!("{}:drag", self.owner),
            &[EventKind::PointerMove, EventKind::PointerUp],
        );
        log::debug!("[drag] '{}' started at {:?}", self.owner, pointer);
        self.session = Some(DragSession {
            anchor: pointer,
            subscription,
        });
    }

    /// End the current session, releasing its listeners.
    pub fn cancel(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            log::debug!("[drag] '{}' ended", self.owner);
        }
        ended
    }

    /// Process one event against `node` in `document`.
    pub fn handle_event(&mut self, event: &Event, document: &Document, node: NodeId) -> DragUpdate {
        let Some(session) = self.session.as_mut() else {
            return DragUpdate::Ignored;
        };
        if !session.subscription.accepts(event) {
            return DragUpdate::Ignored;
        }

        match *event {
            Event::PointerMove { x, y } => {
                let pointer = Point::new(x, y);
                let update = step(session.anchor, pointer, document, node);
                session.anchor = pointer;
                update
            }
            Event::PointerUp { .. } => {
                self.cancel();
                DragUpdate::Ended
            }
            _ => DragUpdate::Ignored,
        }
    }
}

fn step(anchor: Point, pointer: Point, document: &Document, node: NodeId) -> DragUpdate {
    let (Some(left), Some(top), Some((width, height))) = (
        document.offset_left(node),
        document.offset_top(node),
        document.size(node),
    ) else {
        log::warn!("[drag] tracked node {node:?} is gone");
        return DragUpdate::Ignored;
    };
    let (viewport_width, viewport_height) = document.viewport();

    let dx = i32::from(pointer.x) - i32::from(anchor.x);
    let dy = i32::from(pointer.y) - i32::from(anchor.y);

    let x = clamp_axis(left, dx, width, viewport_width);
    let y = clamp_axis(top, dy, height, viewport_height);
    log::trace!("[drag] delta=({dx}, {dy}) accepted x={x:?} y={y:?}");

    DragUpdate::Moved { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portaldom::Position;

    #[test]
    fn test_clamp_axis_bounds() {
        // viewport 100, element 20 => valid offsets 0..=80
        assert_eq!(clamp_axis(10, 5, 20, 100), Some(15));
        assert_eq!(clamp_axis(10, -10, 20, 100), Some(0));
        assert_eq!(clamp_axis(10, -11, 20, 100), None);
        assert_eq!(clamp_axis(70, 10, 20, 100), Some(80));
        assert_eq!(clamp_axis(70, 11, 20, 100), None);
    }

    #[test]
    fn test_clamp_axis_oversized_element() {
        assert_eq!(clamp_axis(0, 0, 120, 100), None);
    }

    fn setup() -> (Document, NodeId) {
        let doc = Document::new(100, 50);
        let node = doc.create_element("modal", "modal-container");
        doc.append_child(doc.root(), node);
        doc.set_offset(node, Position::cells(10, 10));
        doc.set_size(node, 20, 10);
        (doc, node)
    }

    #[test]
    fn test_session_registers_and_releases_listeners() {
        let (doc, node) = setup();
        let mut drag = DragController::new("modal", doc.listeners().clone());

        drag.start(Point::new(12, 11));
        assert!(drag.is_dragging());
        assert_eq!(doc.listeners().len(), 1);

        assert_eq!(
            drag.handle_event(&Event::pointer_up(12, 11), &doc, node),
            DragUpdate::Ended
        );
        assert!(!drag.is_dragging());
        assert!(doc.listeners().is_empty());
    }

    #[test]
    fn test_axes_are_independent() {
        let (doc, node) = setup();
        let mut drag = DragController::new("modal", doc.listeners().clone());
        drag.start(Point::new(15, 15));

        // dx = -15 would push x to -5, dy = +5 is fine
        let update = drag.handle_event(&Event::pointer_move(0, 20), &doc, node);
        assert_eq!(
            update,
            DragUpdate::Moved {
                x: None,
                y: Some(15)
            }
        );
        assert_eq!(drag.session().unwrap().anchor(), Point::new(0, 20));
    }

    #[test]
    fn test_ignores_events_without_session() {
        let (doc, node) = setup();
        let mut drag = DragController::new("modal", doc.listeners().clone());
        assert_eq!(
            drag.handle_event(&Event::pointer_move(1, 1), &doc, node),
            DragUpdate::Ignored
        );
    }

    #[test]
    fn test_restart_keeps_single_subscription() {
        let (doc, _) = setup();
        let mut drag = DragController::new("modal", doc.listeners().clone());
        drag.start(Point::new(1, 1));
        drag.start(Point::new(4, 4));

        assert_eq!(doc.listeners().len(), 1);
        assert_eq!(drag.session().unwrap().anchor(), Point::new(4, 4));
    }
}
