//! Overlay configuration types.

use portaldom::Position;
use serde::Deserialize;

use crate::error::{ConfigError, validate_identity};

/// Configuration for a [`crate::DraggableOverlay`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DraggableOptions {
    /// Id of the mount point. Overlays sharing an id share one mount point.
    pub id: String,

    /// Class attached to the mount point.
    pub style_class: String,

    /// Where the overlay appears each time it opens.
    #[serde(default)]
    pub initial_position: Position,
}

impl DraggableOptions {
    pub fn new(id: impl Into<String>, style_class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style_class: style_class.into(),
            initial_position: Position::default(),
        }
    }

    /// Set the position the overlay resets to on open and close.
    pub fn initial_position(mut self, position: Position) -> Self {
        self.initial_position = position;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_identity(&self.id, &self.style_class)
    }
}

/// Configuration for a [`crate::Popover`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopoverOptions {
    /// Id of the mount point. Overlays sharing an id share one mount point.
    pub id: String,

    /// Class attached to the mount point.
    pub style_class: String,

    /// Fixed position of the popover.
    #[serde(default)]
    pub position: Position,

    /// Close when a pointer-down lands outside the popover.
    /// Defaults to false; `Escape` always closes.
    #[serde(default)]
    pub close_on_click_outside: bool,
}

impl PopoverOptions {
    pub fn new(id: impl Into<String>, style_class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style_class: style_class.into(),
            position: Position::default(),
            close_on_click_outside: false,
        }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn close_on_click_outside(mut self, enabled: bool) -> Self {
        self.close_on_click_outside = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_identity(&self.id, &self.style_class)
    }
}
