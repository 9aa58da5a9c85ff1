use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use super::notification::{Category, NewNotification, Notification, NotificationId};
use super::timers::TimerSet;

/// Delay before an auto-closing notification removes itself.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(5000);

/// Ordered collection of notifications with per-entry expiry.
///
/// Entries keep insertion order whatever order they expire in. Every
/// auto-close timer is tracked by notification id and cancelled when the
/// entry leaves the queue by any other path, and dropping the queue cancels
/// whatever is still pending.
///
/// Deadlines use `tokio::time::Instant`, so a paused tokio clock drives
/// expiry deterministically in tests.
///
/// # Example
///
/// ```ignore
/// let mut queue = NotificationQueue::new();
/// let id = queue.add_notification(Category::Error, "Error", "Upload failed", true);
///
/// loop {
///     tokio::select! {
///         expired = queue.next_expiry() => redraw(queue.notifications()),
///         // ...
///     }
/// }
/// ```
#[derive(Debug)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    timers: TimerSet<NotificationId>,
    delay: Duration,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_delay(AUTO_CLOSE_DELAY)
    }

    /// Queue whose auto-close delay is `delay` instead of [`AUTO_CLOSE_DELAY`].
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            entries: Vec::new(),
            timers: TimerSet::new(),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Append a notification, scheduling its removal if `auto_close` is set.
    pub fn add_notification(
        &mut self,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        auto_close: bool,
    ) -> NotificationId {
        self.add(NewNotification::new(category, title, description, auto_close))
    }

    /// Append a notification from a request record.
    pub fn add(&mut self, request: NewNotification) -> NotificationId {
        let id = self.unique_id();
        let auto_close = request.auto_close;
        self.entries.push(Notification::new(id.clone(), request));

        if auto_close {
            let deadline = self.timers.schedule(id.clone(), Instant::now(), self.delay);
            log::debug!(
                "[notify] added {id}, expires in {:?} (at {:?})",
                self.delay,
                deadline
            );
        } else {
            log::debug!("[notify] added {id}, no expiry");
        }
        id
    }

    fn unique_id(&self) -> NotificationId {
        loop {
            let id = NotificationId::generate();
            if self.get(id.as_str()).is_none() {
                return id;
            }
            log::warn!("[notify] id collision on {id}, regenerating");
        }
    }

    /// Remove the notification with `id`.
    ///
    /// Returns false if it is not in the queue (already expired or closed).
    pub fn close_notification(&mut self, id: &str) -> bool {
        let Some(index) = self.entries.iter().position(|n| n.id().as_str() == id) else {
            log::trace!("[notify] close of absent {id} ignored");
            return false;
        };
        let removed = self.entries.remove(index);
        if self.timers.cancel(removed.id()) {
            log::debug!("[notify] closed {id}, timer cancelled");
        } else {
            log::debug!("[notify] closed {id}");
        }
        true
    }

    /// Current notifications in insertion order.
    ///
    /// Reflects the last expiry sweep: an entry whose deadline has passed
    /// stays listed until [`tick`](Self::tick), [`expire`](Self::expire) or
    /// [`next_expiry`](Self::next_expiry) removes it.
    pub fn notifications(&self) -> &[Notification] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id().as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of auto-close timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest pending expiry, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Remove every notification whose timer has come due.
    pub fn tick(&mut self) -> Vec<NotificationId> {
        self.expire(Instant::now())
    }

    /// Remove every notification whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired = self.timers.drain_expired(now);
        if expired.is_empty() {
            return expired;
        }
        self.entries.retain(|n| !expired.iter().any(|id| id == n.id()));
        for id in &expired {
            log::debug!("[notify] {id} expired");
        }
        expired
    }

    /// Wait for the next deadline and remove what expired.
    ///
    /// Never completes while no timer is pending, which makes it safe to use
    /// as a `tokio::select!` branch.
    pub async fn next_expiry(&mut self) -> Vec<NotificationId> {
        loop {
            let Some(deadline) = self.next_deadline() else {
                return std::future::pending().await;
            };
            sleep_until(deadline).await;
            let expired = self.expire(Instant::now());
            if !expired.is_empty() {
                return expired;
            }
        }
    }

    /// Remove every notification and cancel every timer.
    pub fn clear(&mut self) {
        let cancelled = self.timers.clear();
        self.entries.clear();
        log::debug!("[notify] cleared, {cancelled} timers cancelled");
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NotificationQueue {
    fn drop(&mut self) {
        let cancelled = self.timers.clear();
        if cancelled > 0 {
            log::debug!("[notify] teardown cancelled {cancelled} pending timers");
        }
    }
}
