//! Draggable modal overlay.
//!
//! A [`Portal`] plus a [`DragController`]. The overlay appears at its
//! configured initial position every time it opens; while open, a drag
//! session started from its title bar (or any handle the host chooses)
//! moves it around, one axis at a time, without ever leaving the viewport.
//! Closing resets the position and ends any session in progress.

use portaldom::{Element, Event, Length, NodeId, Point, Position};

use crate::config::DraggableOptions;
use crate::controller::{EventOutcome, OverlayController};
use crate::drag::{DragController, DragUpdate};
use crate::error::ConfigError;
use crate::mount::MountRegistry;
use crate::portal::Portal;
use crate::state::{Action, OverlayStatus, Transition};

#[derive(Debug)]
pub struct DraggableOverlay {
    portal: Portal,
    drag: DragController,
}

impl DraggableOverlay {
    pub fn new(registry: &MountRegistry, options: DraggableOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let portal = Portal::with_position(
            registry,
            &options.id,
            &options.style_class,
            options.initial_position,
        )?;
        let drag = DragController::new(options.id, registry.document().listeners().clone());
        Ok(Self { portal, drag })
    }

    pub fn id(&self) -> &str {
        self.portal.id()
    }

    pub fn status(&self) -> OverlayStatus {
        self.portal.status()
    }

    pub fn is_open(&self) -> bool {
        self.portal.is_open()
    }

    pub fn position(&self) -> Position {
        self.portal.position()
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn open(&mut self) -> bool {
        self.portal.open()
    }

    pub fn close(&mut self) -> bool {
        self.drag.cancel();
        self.portal.close()
    }

    pub fn toggle(&mut self) -> OverlayStatus {
        if self.portal.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.status()
    }

    /// Start a drag session at the pointer-down position.
    ///
    /// Ignored while closed. Returns whether a session is now active.
    pub fn on_drag_start(&mut self, pointer: Point) -> bool {
        if !self.portal.is_open() {
            log::debug!("[draggable] '{}' ignoring drag start while closed", self.id());
            return false;
        }
        self.drag.start(pointer);
        true
    }

    pub fn render(&self, content: &Element) -> Option<NodeId> {
        self.portal.render(content)
    }

    pub fn handle_event(&mut self, event: &Event) -> EventOutcome {
        let document = self.portal.mount().document().clone();
        let node = self.portal.mount().node();

        match self.drag.handle_event(event, &document, node) {
            DragUpdate::Ignored => EventOutcome::Ignored,
            DragUpdate::Ended => EventOutcome::Handled,
            DragUpdate::Moved { x, y } => {
                let action = Action::Move {
                    x: x.map(Length::Cells),
                    y: y.map(Length::Cells),
                };
                match self.portal.apply(action) {
                    Transition::Moved => EventOutcome::Handled,
                    _ => EventOutcome::Ignored,
                }
            }
        }
    }
}

impl OverlayController for DraggableOverlay {
    fn id(&self) -> &str {
        DraggableOverlay::id(self)
    }

    fn status(&self) -> OverlayStatus {
        DraggableOverlay::status(self)
    }

    fn open(&mut self) -> bool {
        DraggableOverlay::open(self)
    }

    fn close(&mut self) -> bool {
        DraggableOverlay::close(self)
    }

    fn handle_event(&mut self, event: &Event) -> EventOutcome {
        DraggableOverlay::handle_event(self, event)
    }

    fn render(&self, content: &Element) -> Option<NodeId> {
        DraggableOverlay::render(self, content)
    }
}
