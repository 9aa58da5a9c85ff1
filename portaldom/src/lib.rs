pub mod document;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod length;
pub mod listeners;

pub use document::{Document, NodeId};
pub use element::Element;
pub use event::{convert_event, Event, EventKind, Key, Modifiers, MouseButton, Point};
pub use hit::{hit_test, hit_test_within};
pub use layout::Rect;
pub use length::{Length, LengthError, Position};
pub use listeners::{ListenerId, Listeners, Subscription};
