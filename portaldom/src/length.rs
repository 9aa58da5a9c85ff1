//! CSS-like offset values.
//!
//! Overlay positions are configured the way stylesheets write them (`"120px"`,
//! `"45%"`, `"0"`) and resolved to terminal cells against the viewport when
//! the tree needs real coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a [`Length`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthError {
    #[error("empty length value")]
    Empty,
    #[error("invalid length '{0}': expected '<int>', '<int>px' or '<number>%'")]
    Invalid(String),
}

/// A single offset along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Length {
    /// Absolute offset in cells. Rendered with a `px` suffix.
    Cells(i32),
    /// Fraction of the viewport extent, in percent.
    Percent(f32),
}

impl Length {
    pub const ZERO: Length = Length::Cells(0);

    /// Resolve to cells against the extent of the containing axis.
    pub fn resolve(&self, extent: u16) -> i32 {
        match self {
            Length::Cells(cells) => *cells,
            Length::Percent(percent) => (extent as f32 * percent / 100.0).floor() as i32,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Cells(cells) => write!(f, "{cells}px"),
            Length::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

impl FromStr for Length {
    type Err = LengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(LengthError::Empty);
        }

        let invalid = || LengthError::Invalid(s.to_string());

        if let Some(percent) = value.strip_suffix('%') {
            let percent: f32 = percent.trim().parse().map_err(|_| invalid())?;
            if !percent.is_finite() {
                return Err(invalid());
            }
            return Ok(Length::Percent(percent));
        }

        let cells = value.strip_suffix("px").unwrap_or(value).trim();
        cells.parse().map(Length::Cells).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Length {
    type Error = LengthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}

/// A two-axis offset from the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Length,
    pub y: Length,
}

impl Position {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Parse both axes from CSS-like strings.
    pub fn parse(x: &str, y: &str) -> Result<Self, LengthError> {
        Ok(Self {
            x: x.parse()?,
            y: y.parse()?,
        })
    }

    pub const fn cells(x: i32, y: i32) -> Self {
        Self {
            x: Length::Cells(x),
            y: Length::Cells(y),
        }
    }
}
