use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// A pointer coordinate in viewport cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Events delivered to process-wide listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer button pressed
    PointerDown { x: u16, y: u16, button: MouseButton },
    /// Pointer moved, with or without a button held
    PointerMove { x: u16, y: u16 },
    /// Pointer button released
    PointerUp { x: u16, y: u16, button: MouseButton },
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Viewport resized
    Resize { width: u16, height: u16 },
}

/// Discriminant of [`Event`], used to declare listener interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Key,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerUp { .. } => EventKind::PointerUp,
            Event::Key { .. } => EventKind::Key,
            Event::Resize { .. } => EventKind::Resize,
        }
    }

    /// Pointer coordinates, for pointer events.
    pub fn point(&self) -> Option<Point> {
        match self {
            Event::PointerDown { x, y, .. }
            | Event::PointerMove { x, y }
            | Event::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn pointer_down(x: u16, y: u16) -> Self {
        Event::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn pointer_move(x: u16, y: u16) -> Self {
        Event::PointerMove { x, y }
    }

    pub fn pointer_up(x: u16, y: u16) -> Self {
        Event::PointerUp {
            x,
            y,
            button: MouseButton::Left,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

fn convert_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::F(n) => Some(Key::F(n)),
        _ => None,
    }
}

fn convert_mouse(event: MouseEvent) -> Option<Event> {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(button) => Some(Event::PointerDown {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Up(button) => Some(Event::PointerUp {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(Event::PointerMove { x, y }),
        _ => None,
    }
}

/// Convert a crossterm event into a listener event.
///
/// Only key presses are forwarded; releases and repeats are dropped, as are
/// scroll and focus events.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                log::trace!("Ignoring non-press key event: {:?}", key_event.code);
                return None;
            }
            let key = convert_key(key_event.code)?;
            Some(Event::Key {
                key,
                modifiers: key_event.modifiers.into(),
            })
        }
        CrosstermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
