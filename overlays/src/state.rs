//! Overlay state record and its transition function.
//!
//! Controllers keep one [`OverlayState`] per instance and only change it
//! through [`transition`], then apply the resulting side effects (attach,
//! detach, listener registration) themselves.

use portaldom::{Length, Position};

/// Whether an overlay is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayStatus {
    #[default]
    Closed,
    Open,
}

/// Visibility and position of one overlay instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub position: Position,
}

impl OverlayState {
    /// A closed overlay sitting at `initial`.
    pub fn new(initial: Position) -> Self {
        Self {
            visible: false,
            position: initial,
        }
    }

    pub fn status(&self) -> OverlayStatus {
        if self.visible {
            OverlayStatus::Open
        } else {
            OverlayStatus::Closed
        }
    }
}

/// Inputs to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Open,
    Close,
    Toggle,
    /// Move one or both axes. Ignored while closed.
    Move { x: Option<Length>, y: Option<Length> },
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Moved,
    Unchanged,
}

/// Compute the next state for `action`.
///
/// Opening and closing both reset the position to `initial`.
pub fn transition(state: &OverlayState, action: Action, initial: Position) -> (OverlayState, Transition) {
    let action = match action {
        Action::Toggle if state.visible => Action::Close,
        Action::Toggle => Action::Open,
        other => other,
    };

    match action {
        Action::Open if !state.visible => (
            OverlayState {
                visible: true,
                position: initial,
            },
            Transition::Opened,
        ),
        Action::Close if state.visible => (OverlayState::new(initial), Transition::Closed),
        Action::Move { x, y } if state.visible && (x.is_some() || y.is_some()) => {
            let mut next = *state;
            if let Some(x) = x {
                next.position.x = x;
            }
            if let Some(y) = y {
                next.position.y = y;
            }
            (next, Transition::Moved)
        }
        _ => (*state, Transition::Unchanged),
    }
}
