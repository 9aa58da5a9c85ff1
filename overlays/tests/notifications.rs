use std::time::Duration;

use overlays::{AUTO_CLOSE_DELAY, Category, NewNotification, NotificationQueue};
use simplelog::{Config, LevelFilter, TestLogger};
use tokio::time::{Instant, advance, timeout};

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn titles(queue: &NotificationQueue) -> Vec<&str> {
    queue.notifications().iter().map(|n| n.title()).collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_insertion_order_is_kept() {
    let mut queue = NotificationQueue::new();
    queue.add_notification(Category::Success, "A", "first", false);
    let b = queue.add_notification(Category::Warning, "B", "second", false);
    queue.add_notification(Category::Information, "C", "third", false);

    assert_eq!(titles(&queue), vec!["A", "B", "C"]);

    assert!(queue.close_notification(b.as_str()));
    assert_eq!(titles(&queue), vec!["A", "C"]);
}

#[test]
fn test_ids_are_unique() {
    let mut queue = NotificationQueue::new();
    let ids: Vec<_> = (0..100)
        .map(|i| queue.add_notification(Category::Information, format!("n{i}"), "", false))
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

#[test]
fn test_close_unknown_is_noop() {
    let mut queue = NotificationQueue::new();
    let id = queue.add_notification(Category::Success, "Saved", "", false);

    assert!(!queue.close_notification("not-an-id"));
    assert!(queue.close_notification(id.as_str()));
    assert!(!queue.close_notification(id.as_str()));
    assert!(queue.is_empty());
}

#[test]
fn test_add_from_request() {
    let mut queue = NotificationQueue::new();
    let request: NewNotification = serde_json::from_str(
        r#"{"category": "error", "title": "Upload failed", "description": "Disk full"}"#,
    )
    .unwrap();
    let id = queue.add(request);

    let added = queue.get(id.as_str()).unwrap();
    assert_eq!(added.category(), Category::Error);
    assert_eq!(added.description(), "Disk full");
    assert!(!added.auto_close(), "auto_close defaults to off");
    assert_eq!(queue.pending_timers(), 0);
}

// ============================================================================
// Auto-close
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_auto_close_fires_at_delay() {
    init_logging();
    let mut queue = NotificationQueue::new();
    let id = queue.add_notification(Category::Error, "Error", "Something broke", true);
    assert_eq!(queue.pending_timers(), 1);

    advance(AUTO_CLOSE_DELAY - Duration::from_millis(1)).await;
    assert!(queue.tick().is_empty());
    assert_eq!(queue.len(), 1);

    advance(Duration::from_millis(1)).await;
    assert_eq!(queue.tick(), vec![id]);
    assert!(queue.is_empty());
    assert_eq!(queue.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_manual_entries_survive_expiry() {
    let mut queue = NotificationQueue::new();
    queue.add_notification(Category::Success, "Kept", "", false);
    queue.add_notification(Category::Warning, "Gone", "", true);
    queue.add_notification(Category::Information, "Also kept", "", false);

    advance(AUTO_CLOSE_DELAY).await;
    queue.tick();

    assert_eq!(titles(&queue), vec!["Kept", "Also kept"]);
}

#[tokio::test(start_paused = true)]
async fn test_next_expiry_waits_for_deadline() {
    let mut queue = NotificationQueue::new();
    let start = Instant::now();
    let first = queue.add_notification(Category::Error, "First", "", true);

    advance(Duration::from_millis(1000)).await;
    let second = queue.add_notification(Category::Warning, "Second", "", true);

    assert_eq!(queue.next_expiry().await, vec![first]);
    assert_eq!(start.elapsed(), AUTO_CLOSE_DELAY);

    assert_eq!(queue.next_expiry().await, vec![second]);
    assert_eq!(start.elapsed(), AUTO_CLOSE_DELAY + Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_closed_before_expiry_never_fires() {
    let mut queue = NotificationQueue::new();
    let id = queue.add_notification(Category::Error, "Error", "", true);

    assert!(queue.close_notification(id.as_str()));
    assert!(queue.is_empty());
    assert_eq!(queue.pending_timers(), 0);

    let waited = timeout(Duration::from_secs(60), queue.next_expiry()).await;
    assert!(waited.is_err(), "nothing left to expire");
}

#[tokio::test(start_paused = true)]
async fn test_with_delay() {
    let mut queue = NotificationQueue::with_delay(Duration::from_millis(250));
    queue.add(NewNotification::preset(Category::Warning));

    advance(Duration::from_millis(250)).await;
    assert_eq!(queue.tick().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_timers() {
    let mut queue = NotificationQueue::new();
    queue.add(NewNotification::preset(Category::Error));
    queue.add(NewNotification::preset(Category::Success));

    queue.clear();

    assert!(queue.is_empty());
    assert_eq!(queue.pending_timers(), 0);
    assert_eq!(queue.next_deadline(), None);
    advance(AUTO_CLOSE_DELAY * 2).await;
    assert!(queue.tick().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_expire_with_explicit_instant() {
    let mut queue = NotificationQueue::new();
    let now = Instant::now();
    let id = queue.add_notification(Category::Error, "Error", "", true);

    assert_eq!(queue.next_deadline(), Some(now + AUTO_CLOSE_DELAY));
    assert!(queue.expire(now).is_empty());
    assert_eq!(queue.expire(now + AUTO_CLOSE_DELAY), vec![id]);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_listed_until_swept() {
    let mut queue = NotificationQueue::new();
    queue.add_notification(Category::Warning, "Stale", "", true);

    advance(AUTO_CLOSE_DELAY).await;
    assert_eq!(titles(&queue), vec!["Stale"]);

    queue.tick();
    assert!(queue.notifications().is_empty());
}
