use overlays::controller::dispatch;
use overlays::{
    DraggableOptions, DraggableOverlay, EventOutcome, MountRegistry, OverlayController,
    OverlayStatus, Popover, PopoverOptions,
};
use portaldom::{Document, Element, Event, EventKind, Key, Point, Position};

fn setup(close_on_click_outside: bool) -> (MountRegistry, Popover) {
    let registry = MountRegistry::new(Document::new(80, 24));
    let popover = Popover::new(
        &registry,
        PopoverOptions::new("popover", "popover-container")
            .position(Position::cells(10, 5))
            .close_on_click_outside(close_on_click_outside),
    )
    .unwrap();
    (registry, popover)
}

fn menu() -> Element {
    Element::col()
        .width(20)
        .height(5)
        .child(Element::text("Rename"))
        .child(Element::text("Delete"))
}

// ============================================================================
// Dismissal
// ============================================================================

#[test]
fn test_outside_click_closes_when_enabled() {
    let (registry, mut popover) = setup(true);
    popover.open();
    popover.render(&menu());

    assert_eq!(
        popover.handle_event(&Event::pointer_down(1, 1)),
        EventOutcome::Closed
    );
    assert!(!popover.is_open());
    assert!(!popover.portal().mount().is_attached());
    assert!(registry.document().listeners().is_empty());
}

#[test]
fn test_inside_click_keeps_open() {
    let (_registry, mut popover) = setup(true);
    popover.open();
    popover.render(&menu());

    // Lands on the "Delete" text node inside the content
    assert!(popover.contains_point(11, 6));
    assert_eq!(
        popover.handle_event(&Event::pointer_down(11, 6)),
        EventOutcome::Ignored
    );
    assert!(popover.is_open());
}

#[test]
fn test_outside_click_ignored_by_default() {
    let (registry, mut popover) = setup(false);
    assert!(!popover.closes_on_click_outside());
    popover.open();
    popover.render(&menu());

    assert_eq!(
        popover.handle_event(&Event::pointer_down(70, 20)),
        EventOutcome::Ignored
    );
    assert!(popover.is_open());
    assert_eq!(registry.document().listeners().len(), 1);
}

#[test]
fn test_escape_closes_regardless_of_flag() {
    for flag in [false, true] {
        let (registry, mut popover) = setup(flag);
        popover.open();

        assert_eq!(
            popover.handle_event(&Event::key(Key::Escape)),
            EventOutcome::Closed
        );
        assert_eq!(popover.status(), OverlayStatus::Closed);
        assert!(registry.document().listeners().is_empty());
    }
}

#[test]
fn test_other_keys_do_nothing() {
    let (_registry, mut popover) = setup(true);
    popover.open();

    assert_eq!(
        popover.handle_event(&Event::key(Key::Enter)),
        EventOutcome::Ignored
    );
    assert_eq!(
        popover.handle_event(&Event::key(Key::Char('q'))),
        EventOutcome::Ignored
    );
    assert!(popover.is_open());
}

#[test]
fn test_closed_popover_ignores_events() {
    let (_registry, mut popover) = setup(true);

    assert_eq!(
        popover.handle_event(&Event::key(Key::Escape)),
        EventOutcome::Ignored
    );
    assert_eq!(
        popover.handle_event(&Event::pointer_down(1, 1)),
        EventOutcome::Ignored
    );
}

// ============================================================================
// Listener hygiene
// ============================================================================

#[test]
fn test_open_close_cycles_hold_one_listener() {
    let (registry, mut popover) = setup(true);
    let listeners = registry.document().listeners().clone();

    for _ in 0..10 {
        popover.open();
        popover.open();
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners.owners(EventKind::Key), vec!["popover:dismiss"]);

        popover.close();
        popover.close();
        assert!(listeners.is_empty());
    }
}

#[test]
fn test_toggle_registers_and_releases() {
    let (registry, mut popover) = setup(false);

    assert_eq!(popover.toggle(), OverlayStatus::Open);
    assert_eq!(registry.document().listeners().len(), 1);
    assert_eq!(popover.toggle(), OverlayStatus::Closed);
    assert!(registry.document().listeners().is_empty());
}

#[test]
fn test_drop_while_open_releases_everything() {
    let (registry, mut popover) = setup(true);
    popover.open();
    popover.render(&menu());

    drop(popover);

    let doc = registry.document();
    assert!(doc.listeners().is_empty());
    assert_eq!(doc.get_element_by_id("popover"), None);
    assert!(doc.children(doc.root()).is_empty());
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_reaches_each_controller() {
    let (registry, mut popover) = setup(true);
    let mut modal = DraggableOverlay::new(
        &registry,
        DraggableOptions::new("modal", "modal-container").initial_position(Position::cells(40, 2)),
    )
    .unwrap();

    popover.open();
    popover.render(&menu());
    modal.open();
    modal.render(&Element::box_().width(10).height(4));
    modal.on_drag_start(Point::new(41, 3));

    // A move only concerns the drag session
    let outcomes = dispatch(&mut [&mut popover, &mut modal], &Event::pointer_move(43, 4));
    assert_eq!(outcomes, vec![EventOutcome::Ignored, EventOutcome::Handled]);
    assert_eq!(modal.position(), Position::cells(42, 3));

    // Pointer-down outside the popover closes it; the modal is not listening
    let outcomes = dispatch(&mut [&mut popover, &mut modal], &Event::pointer_down(70, 20));
    assert_eq!(outcomes, vec![EventOutcome::Closed, EventOutcome::Ignored]);

    // Escape is the popover's only; once closed nobody reacts
    let outcomes = dispatch(&mut [&mut popover, &mut modal], &Event::key(Key::Escape));
    assert_eq!(outcomes, vec![EventOutcome::Ignored, EventOutcome::Ignored]);
}

#[test]
fn test_trait_toggle_matches_inherent() {
    let (_registry, mut popover) = setup(true);
    let controller: &mut dyn OverlayController = &mut popover;

    assert_eq!(controller.toggle(), OverlayStatus::Open);
    assert_eq!(controller.id(), "popover");
    assert_eq!(controller.toggle(), OverlayStatus::Closed);
}
