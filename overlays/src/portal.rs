//! Plain portal: visibility, a mount point and a render contract.
//!
//! [`Portal`] is the shared core of every overlay controller. On its own it
//! is the simplest overlay: it opens, closes and renders, with no drag or
//! dismissal behavior. [`crate::DraggableOverlay`] and [`crate::Popover`]
//! wrap one.

use portaldom::{Element, NodeId, Position};

use crate::controller::{EventOutcome, OverlayController};
use crate::error::{ConfigError, validate_identity};
use crate::mount::{MountHandle, MountRegistry};
use crate::state::{Action, OverlayState, OverlayStatus, Transition, transition};

pub struct Portal {
    mount: MountHandle,
    initial: Position,
    state: OverlayState,
}

impl Portal {
    /// Create a closed portal at the origin.
    pub fn new(registry: &MountRegistry, id: &str, style_class: &str) -> Result<Self, ConfigError> {
        Self::with_position(registry, id, style_class, Position::default())
    }

    /// Create a closed portal that opens at `initial`.
    pub fn with_position(
        registry: &MountRegistry,
        id: &str,
        style_class: &str,
        initial: Position,
    ) -> Result<Self, ConfigError> {
        validate_identity(id, style_class)?;
        Ok(Self {
            mount: registry.acquire(id, style_class),
            initial,
            state: OverlayState::new(initial),
        })
    }

    pub fn id(&self) -> &str {
        self.mount.id()
    }

    pub fn mount(&self) -> &MountHandle {
        &self.mount
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn status(&self) -> OverlayStatus {
        self.state.status()
    }

    pub fn is_open(&self) -> bool {
        self.state.visible
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn initial_position(&self) -> Position {
        self.initial
    }

    /// Feed an action through the state machine and apply its side effects.
    pub(crate) fn apply(&mut self, action: Action) -> Transition {
        let (next, result) = transition(&self.state, action, self.initial);
        self.state = next;

        match result {
            Transition::Opened => {
                self.mount.attach();
                self.mount.set_position(self.state.position);
                log::debug!("[portal] '{}' opened at {:?}", self.id(), self.state.position);
            }
            Transition::Closed => {
                self.mount.detach();
                self.mount.set_position(self.state.position);
                log::debug!("[portal] '{}' closed", self.id());
            }
            Transition::Moved => {
                self.mount.set_position(self.state.position);
                log::trace!("[portal] '{}' moved to {:?}", self.id(), self.state.position);
            }
            Transition::Unchanged => {}
        }
        result
    }

    /// Open the portal. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        self.apply(Action::Open) == Transition::Opened
    }

    /// Close the portal. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        self.apply(Action::Close) == Transition::Closed
    }

    pub fn toggle(&mut self) -> OverlayStatus {
        self.apply(Action::Toggle);
        self.status()
    }

    /// Mount `content` at the portal's mount point.
    ///
    /// Yields the content root only while open and attached; otherwise
    /// nothing is mounted and `None` is returned.
    pub fn render(&self, content: &Element) -> Option<NodeId> {
        if !self.state.visible || !self.mount.is_attached() {
            return None;
        }
        self.mount.document().mount(self.mount.node(), content)
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        // Teardown always detaches, whatever the current state
        self.mount.detach();
        log::trace!("[portal] '{}' torn down", self.mount.id());
    }
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("id", &self.id())
            .field("state", &self.state)
            .finish()
    }
}

impl OverlayController for Portal {
    fn id(&self) -> &str {
        Portal::id(self)
    }

    fn status(&self) -> OverlayStatus {
        Portal::status(self)
    }

    fn open(&mut self) -> bool {
        Portal::open(self)
    }

    fn close(&mut self) -> bool {
        Portal::close(self)
    }

    fn handle_event(&mut self, _event: &portaldom::Event) -> EventOutcome {
        EventOutcome::Ignored
    }

    fn render(&self, content: &Element) -> Option<NodeId> {
        Portal::render(self, content)
    }
}
