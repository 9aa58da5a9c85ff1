//! Common interface of overlay controllers.
//!
//! Controllers never talk to each other. A host owns them side by side and
//! forwards every input event to each one; a controller only reacts when it
//! currently holds a listener subscription for that kind of event.

use portaldom::{Element, Event, NodeId};

use crate::state::OverlayStatus;

/// What a controller did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not listening for this event, or nothing to do.
    Ignored,
    /// The event updated controller state (drag move, drag end).
    Handled,
    /// The event closed the overlay.
    Closed,
}

pub trait OverlayController {
    /// Id of the overlay's mount point.
    fn id(&self) -> &str;

    fn status(&self) -> OverlayStatus;

    /// Returns false if already open.
    fn open(&mut self) -> bool;

    /// Returns false if already closed.
    fn close(&mut self) -> bool;

    fn toggle(&mut self) -> OverlayStatus {
        match self.status() {
            OverlayStatus::Open => self.close(),
            OverlayStatus::Closed => self.open(),
        };
        self.status()
    }

    /// React to a process-wide event.
    fn handle_event(&mut self, event: &Event) -> EventOutcome;

    /// Mount content while open. See [`crate::Portal::render`].
    fn render(&self, content: &Element) -> Option<NodeId>;
}

/// Forward `event` to every controller, collecting what each did.
pub fn dispatch(controllers: &mut [&mut dyn OverlayController], event: &Event) -> Vec<EventOutcome> {
    controllers
        .iter_mut()
        .map(|controller| controller.handle_event(event))
        .collect()
}
