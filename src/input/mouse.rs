//! Mouse events in surface coordinates.

use crate::input::keyboard::KeyModifiers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Wheel and bare motion events.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    /// Pointer motion; `button` is the button held, if any.
    Move,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// A mouse event. `x`/`y` are surface cells, not text-area cells: the text
/// area subtracts the origin of the rectangle it was last drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u32,
    pub y: u32,
    pub button: MouseButton,
    pub kind: MouseEventKind,
    /// Shift extends the selection on press.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    #[must_use]
    pub fn new(x: u32, y: u32, button: MouseButton, kind: MouseEventKind) -> Self {
        Self {
            x,
            y,
            button,
            kind,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[must_use]
    pub fn press(x: u32, y: u32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Press)
    }

    #[must_use]
    pub fn release(x: u32, y: u32, button: MouseButton) -> Self {
        Self::new(x, y, button, MouseEventKind::Release)
    }

    /// Motion with the left button held.
    #[must_use]
    pub fn drag(x: u32, y: u32) -> Self {
        Self::new(x, y, MouseButton::Left, MouseEventKind::Move)
    }

    #[must_use]
    pub fn scroll_up(x: u32, y: u32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollUp)
    }

    #[must_use]
    pub fn scroll_down(x: u32, y: u32) -> Self {
        Self::new(x, y, MouseButton::None, MouseEventKind::ScrollDown)
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }
}
