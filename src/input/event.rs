//! The union of everything a host can feed to
//! [`TextArea::handle_event`](crate::TextArea::handle_event).

use crate::input::keyboard::KeyEvent;
use crate::input::mouse::MouseEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste: inserted as one undo step, newlines kept verbatim.
    Paste(PasteEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<PasteEvent> for Event {
    fn from(e: PasteEvent) -> Self {
        Self::Paste(e)
    }
}

/// Text delivered between bracketed-paste markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    pub content: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
