//! Dismissible popover.
//!
//! While open, the popover holds one process-wide subscription for
//! pointer-down and key events. `Escape` always closes it; a pointer-down
//! whose target is outside the mount point's subtree closes it only when
//! `close_on_click_outside` is set. The subscription is released on every
//! path out of the open state, including drop.

use portaldom::{Element, Event, EventKind, Key, NodeId, Subscription};

use crate::config::PopoverOptions;
use crate::controller::{EventOutcome, OverlayController};
use crate::error::ConfigError;
use crate::mount::MountRegistry;
use crate::portal::Portal;
use crate::state::OverlayStatus;

#[derive(Debug)]
pub struct Popover {
    portal: Portal,
    close_on_click_outside: bool,
    subscription: Option<Subscription>,
}

impl Popover {
    pub fn new(registry: &MountRegistry, options: PopoverOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let portal =
            Portal::with_position(registry, &options.id, &options.style_class, options.position)?;
        Ok(Self {
            portal,
            close_on_click_outside: options.close_on_click_outside,
            subscription: None,
        })
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

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn closes_on_click_outside(&self) -> bool {
        self.close_on_click_outside
    }

    pub fn open(&mut self) -> bool {
        if !self.portal.open() {
            return false;
        }
        let listeners = self.portal.mount().document().listeners();
        self.subscription = Some(listeners.subscribe(
            format!("{}:dismiss", self.portal.id()),
            &[EventKind::PointerDown, EventKind::Key],
        ));
        true
    }

    pub fn close(&mut self) -> bool {
        self.subscription = None;
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

    pub fn render(&self, content: &Element) -> Option<NodeId> {
        self.portal.render(content)
    }

    /// Whether a pointer-down at (`x`, `y`) targets the popover's subtree.
    pub fn contains_point(&self, x: u16, y: u16) -> bool {
        let mount = self.portal.mount();
        let document = mount.document();
        document
            .hit_test(x, y)
            .is_some_and(|target| document.contains(mount.node(), target))
    }

    pub fn handle_event(&mut self, event: &Event) -> EventOutcome {
        let listening = self
            .subscription
            .as_ref()
            .is_some_and(|subscription| subscription.accepts(event));
        if !listening {
            return EventOutcome::Ignored;
        }

        let dismiss = match *event {
            Event::Key {
                key: Key::Escape, ..
            } => true,
            Event::PointerDown { x, y, .. } => {
                self.close_on_click_outside && !self.contains_point(x, y)
            }
            _ => false,
        };

        if dismiss && self.close() {
            log::debug!("[popover] '{}' dismissed by {:?}", self.id(), event.kind());
            EventOutcome::Closed
        } else {
            EventOutcome::Ignored
        }
    }
}

impl OverlayController for Popover {
    fn id(&self) -> &str {
        Popover::id(self)
    }

    fn status(&self) -> OverlayStatus {
        Popover::status(self)
    }

    fn open(&mut self) -> bool {
        Popover::open(self)
    }

    fn close(&mut self) -> bool {
        Popover::close(self)
    }

    fn handle_event(&mut self, event: &Event) -> EventOutcome {
        Popover::handle_event(self, event)
    }

    fn render(&self, content: &Element) -> Option<NodeId> {
        Popover::render(self, content)
    }
}
