//! Auto-expiring notification queue.

mod notification;
mod queue;
mod timers;

pub use notification::{Category, NewNotification, Notification, NotificationId, ParseCategoryError};
pub use queue::{AUTO_CLOSE_DELAY, NotificationQueue};
pub use timers::TimerSet;
