#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Mouse coordinates are 0-indexed. Scroll signals come from the host's
//! scroll container (see [`crate::scroll`]), not from the mouse wheel: a
//! wheel event only becomes a [`ScrollSignal`] once the host has applied it
//! to its scroll offset.

use crate::scroll::ScrollSignal;
use bitflags::bitflags;
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A mouse event.
    Mouse(MouseEvent),

    /// The host scroll container moved.
    Scroll(ScrollSignal),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },
}

impl Event {
    /// Convert a Crossterm event into a dropbar [`Event`].
    ///
    /// Keyboard, focus and paste events have no counterpart and map to `None`.
    #[must_use]
    #[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Mouse(mouse) => map_mouse_event(mouse).map(Event::Mouse),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }

    /// The mouse payload, if this is a mouse event.
    #[must_use]
    pub const fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            Event::Mouse(mouse) => Some(mouse),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys that can be held during a mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for a left-button press at `(x, y)`.
    #[must_use]
    pub const fn left_click(x: u16, y: u16) -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Whether this is a left-button press.
    #[must_use]
    pub const fn is_left_press(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,

    /// Mouse wheel scrolled up.
    ScrollUp,

    /// Mouse wheel scrolled down.
    ScrollDown,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => MouseEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => MouseEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => MouseEventKind::Drag(map_mouse_button(button)),
        cte::MouseEventKind::Moved => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };

    Some(
        MouseEvent::new(kind, event.column, event.row)
            .with_modifiers(map_modifiers(event.modifiers)),
    )
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER) {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_click_is_left_press() {
        let ev = MouseEvent::left_click(3, 0);
        assert!(ev.is_left_press());
        assert_eq!(ev.position(), (3, 0));
        assert_eq!(ev.modifiers, Modifiers::NONE);
    }

    #[test]
    fn release_is_not_press() {
        let ev = MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 0, 0);
        assert!(!ev.is_left_press());
    }

    #[test]
    fn as_mouse_only_for_mouse_events() {
        let mouse = Event::Mouse(MouseEvent::left_click(1, 1));
        assert!(mouse.as_mouse().is_some());
        let resize = Event::Resize {
            width: 80,
            height: 24,
        };
        assert!(resize.as_mouse().is_none());
    }

    #[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
    #[test]
    fn crossterm_mouse_down_maps_coordinates_and_modifiers() {
        let ct = cte::Event::Mouse(cte::MouseEvent {
            kind: cte::MouseEventKind::Down(cte::MouseButton::Left),
            column: 7,
            row: 2,
            modifiers: cte::KeyModifiers::SHIFT | cte::KeyModifiers::CONTROL,
        });
        let Some(Event::Mouse(ev)) = Event::from_crossterm(ct) else {
            panic!("expected mouse event");
        };
        assert!(ev.is_left_press());
        assert_eq!(ev.position(), (7, 2));
        assert_eq!(ev.modifiers, Modifiers::SHIFT | Modifiers::CTRL);
    }

    #[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
    #[test]
    fn crossterm_focus_is_dropped() {
        assert_eq!(Event::from_crossterm(cte::Event::FocusGained), None);
    }

    #[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
    #[test]
    fn crossterm_resize_maps() {
        assert_eq!(
            Event::from_crossterm(cte::Event::Resize(100, 30)),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
    }
}
