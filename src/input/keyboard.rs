//! Key events as the text area sees them.

use bitflags::bitflags;

bitflags! {
    /// Modifiers held while a key was pressed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Extends the selection on motion keys.
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
        /// Never bound by the text area.
        const SUPER = 0b0000_1000;
    }
}

/// Keys the host reports. Anything else can be sent as `Esc` or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Delete,
    Insert,
    /// Function key (F1-F24).
    F(u8),
    /// A printable character, space included.
    Char(char),
    Esc,
}

/// A key press with its modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// A plain typed character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Shift turns a motion into a selection-extending motion.
    #[must_use]
    pub fn extends_selection(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Ctrl or Alt on Left/Right/Backspace moves or deletes by word.
    #[must_use]
    pub fn by_word(&self) -> bool {
        self.modifiers.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }
}
