//! Scripted, headless tour of the overlay controllers.
//!
//! Run with `cargo run -p overlays --example walkthrough`. Controller logs go
//! to `walkthrough.log`.

use std::fs::File;
use std::time::Duration;

use overlays::controller::dispatch;
use overlays::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("walkthrough.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let document = Document::new(120, 40);
    let registry = MountRegistry::new(document.clone());

    let mut modal = DraggableOverlay::new(
        &registry,
        DraggableOptions::new("modal", "modal-container")
            .initial_position(Position::parse("15%", "20%")?),
    )?;
    let mut popover = Popover::new(
        &registry,
        PopoverOptions::new("popover", "popover-container")
            .position(Position::cells(4, 2))
            .close_on_click_outside(true),
    )?;

    // Modal: open, drag by the title bar, release, close
    modal.open();
    modal.render(&dialog());
    report("modal opened", &modal.position());

    modal.on_drag_start(Point::new(20, 8));
    for (x, y) in [(25, 9), (40, 12), (200, 12), (45, 14)] {
        dispatch(&mut [&mut modal, &mut popover], &Event::pointer_move(x, y));
        report(&format!("pointer at ({x}, {y})"), &modal.position());
    }
    dispatch(&mut [&mut modal, &mut popover], &Event::pointer_up(45, 14));
    modal.close();
    report("modal closed", &modal.position());

    // Popover: clicks inside keep it, clicks outside dismiss it
    popover.open();
    popover.render(&menu());
    for (x, y) in [(5, 3), (100, 30)] {
        let outcomes = dispatch(&mut [&mut modal, &mut popover], &Event::pointer_down(x, y));
        println!("click at ({x}, {y}): {:?}, open={}", outcomes[1], popover.is_open());
    }
    println!("listeners after dismissal: {}", document.listeners().len());

    // Notifications: two expire on their own, one waits for the user
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        let mut queue = NotificationQueue::with_delay(Duration::from_millis(500));
        queue.add(NewNotification::preset(Category::Error));
        queue.add(NewNotification::preset(Category::Success));
        let warning = queue.add_notification(Category::Warning, "Low disk", "Under 5% free", true);
        print_queue(&queue);

        while queue.pending_timers() > 0 {
            let expired = queue.next_expiry().await;
            println!("expired: {expired:?}");
            print_queue(&queue);
        }
        // Already gone, so this is a no-op
        println!("close {warning}: {}", queue.close_notification(warning.as_str()));
    });

    Ok(())
}

fn dialog() -> Element {
    Element::col()
        .id("dialog")
        .width(36)
        .height(8)
        .child(Element::text("Settings").class("title"))
        .child(Element::text("Drag the title to move this dialog."))
}

fn menu() -> Element {
    Element::col()
        .width(12)
        .child(Element::text("Open"))
        .child(Element::text("Rename"))
        .child(Element::text("Delete"))
}

fn report(label: &str, position: &Position) {
    println!("{label}: left={} top={}", position.x, position.y);
}

fn print_queue(queue: &NotificationQueue) {
    let entries: Vec<String> = queue
        .notifications()
        .iter()
        .map(|n| format!("[{}] {}", n.category(), n.title()))
        .collect();
    println!("queue: {}", entries.join(", "));
}
