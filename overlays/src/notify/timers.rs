use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Timer {
    seq: u64,
    deadline: Instant,
}

/// One pending timer per key.
///
/// Timers never fire on their own: the owner polls [`TimerSet::drain_expired`]
/// and removes whatever came due. Cancelling is explicit, so a key removed
/// by another path must be cancelled here too.
#[derive(Debug)]
pub struct TimerSet<K> {
    next_seq: u64,
    timers: HashMap<K, Timer>,
}

impl<K: Eq + Hash + Clone> TimerSet<K> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            timers: HashMap::new(),
        }
    }

    /// Schedule `key` to expire `delay` after `now`, replacing any pending timer.
    pub fn schedule(&mut self, key: K, now: Instant, delay: Duration) -> Instant {
        let deadline = now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(key, Timer { seq, deadline });
        deadline
    }

    /// Cancel the timer for `key`. Returns false if none was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.timers.remove(key).is_some()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.timers.contains_key(key)
    }

    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.timers.get(key).map(|timer| timer.deadline)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// ordered by deadline, then by scheduling order.
    pub fn drain_expired(&mut self, now: Instant) -> Vec<K> {
        let mut expired: Vec<(Instant, u64, K)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(key, timer)| (timer.deadline, timer.seq, key.clone()))
            .collect();
        expired.sort_by_key(|(deadline, seq, _)| (*deadline, *seq));

        for (_, _, key) in &expired {
            self.timers.remove(key);
        }
        expired.into_iter().map(|(_, _, key)| key).collect()
    }

    /// Cancel everything, returning how many timers were pending.
    pub fn clear(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for TimerSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_deadline_order() {
        let now = Instant::now();
        let mut timers = TimerSet::new();
        timers.schedule("late", now, Duration::from_millis(300));
        timers.schedule("early", now, Duration::from_millis(100));
        timers.schedule("tie", now, Duration::from_millis(100));

        assert_eq!(timers.next_deadline(), Some(now + Duration::from_millis(100)));
        assert!(timers.drain_expired(now).is_empty());
        assert_eq!(
            timers.drain_expired(now + Duration::from_millis(100)),
            vec!["early", "tie"]
        );
        assert_eq!(timers.len(), 1);
        assert_eq!(
            timers.drain_expired(now + Duration::from_secs(1)),
            vec!["late"]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_prevents_expiry() {
        let now = Instant::now();
        let mut timers = TimerSet::new();
        timers.schedule(1u32, now, Duration::from_millis(10));

        assert!(timers.cancel(&1));
        assert!(!timers.cancel(&1));
        assert!(timers.drain_expired(now + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_reschedule_replaces() {
        let now = Instant::now();
        let mut timers = TimerSet::new();
        timers.schedule('a', now, Duration::from_millis(10));
        timers.schedule('a', now, Duration::from_millis(50));

        assert_eq!(timers.len(), 1);
        assert_eq!(timers.deadline(&'a'), Some(now + Duration::from_millis(50)));
    }
}
