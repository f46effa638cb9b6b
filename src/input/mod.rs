//! Input event types: keys, mouse and bracketed paste.
//!
//! Hosts translate their terminal events into these types and feed them to
//! [`TextArea::handle_event`](crate::TextArea::handle_event).

mod event;
mod keyboard;
mod mouse;

pub use event::{Event, PasteEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
