//! Construction-time errors.
//!
//! Only configuration problems are errors. Redundant operations (closing a
//! closed overlay, detaching a detached mount, closing a notification that
//! already expired) are no-ops reported through `bool` returns instead.

use portaldom::LengthError;
use thiserror::Error;

/// Errors raised when constructing an overlay controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The overlay id was missing or blank.
    #[error("overlay id must not be empty")]
    MissingId,

    /// The style class was missing or blank.
    #[error("overlay '{id}' needs a style class")]
    MissingStyleClass {
        /// Id of the overlay being configured.
        id: String,
    },

    /// A position value could not be parsed.
    #[error("invalid position: {0}")]
    InvalidLength(#[from] LengthError),
}

/// Validate the identity pair shared by every overlay configuration.
pub(crate) fn validate_identity(id: &str, style_class: &str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::MissingId);
    }
    if style_class.trim().is_empty() {
        return Err(ConfigError::MissingStyleClass { id: id.to_string() });
    }
    Ok(())
}
