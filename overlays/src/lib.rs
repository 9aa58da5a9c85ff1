//! Stateful overlay controllers for portaldom trees.
//!
//! Three sibling controllers share one attachment substrate:
//!
//! - [`DraggableOverlay`]: a modal that can be dragged around the viewport
//! - [`Popover`]: dismissed by outside clicks or `Escape`
//! - [`NotificationQueue`]: timed notifications that expire on their own
//!
//! Overlays are mounted at the root of the [`portaldom::Document`] through a
//! [`MountRegistry`], one mount point per overlay id, and detached whenever
//! they close or are dropped.

pub mod config;
pub mod controller;
pub mod drag;
pub mod draggable;
pub mod error;
pub mod mount;
pub mod notify;
pub mod popover;
pub mod portal;
pub mod state;

pub use config::{DraggableOptions, PopoverOptions};
pub use controller::{EventOutcome, OverlayController};
pub use draggable::DraggableOverlay;
pub use error::ConfigError;
pub use mount::{MountHandle, MountRegistry};
pub use notify::{
    AUTO_CLOSE_DELAY, Category, NewNotification, Notification, NotificationId, NotificationQueue,
};
pub use popover::Popover;
pub use portal::Portal;
pub use state::{OverlayState, OverlayStatus};

pub mod prelude {
    pub use crate::config::{DraggableOptions, PopoverOptions};
    pub use crate::controller::{EventOutcome, OverlayController};
    pub use crate::draggable::DraggableOverlay;
    pub use crate::mount::MountRegistry;
    pub use crate::notify::{Category, NewNotification, NotificationQueue};
    pub use crate::popover::Popover;
    pub use crate::portal::Portal;
    pub use portaldom::{Document, Element, Event, Key, Length, Point, Position};
}
