//! `opentui_textarea` - a multi-line text editing area for terminal UIs
//!
//! Text is stored as a piece chain over two append-only buffers, laid out
//! lazily into rows (no wrap, char wrap or word wrap) and painted cluster by
//! cluster onto any [`Surface`]. Editing goes through [`EditCommand`]s with
//! coalescing undo/redo; key and mouse events map onto commands.
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{CellBuffer, ClipRect, KeyCode, KeyEvent, TextArea, TextAreaConfig};
//!
//! let mut area = TextArea::new("", TextAreaConfig::default()).unwrap();
//! for c in "hi there".chars() {
//!     area.handle_key(&KeyEvent::char(c));
//! }
//! area.handle_key(&KeyEvent::key(KeyCode::Enter));
//! area.handle_key(&KeyEvent::char('!'));
//!
//! let mut screen = CellBuffer::new(10, 3);
//! area.draw(&mut screen, ClipRect::new(0, 0, 10, 3));
//! assert_eq!(screen.to_text(), "hi there\n!\n");
//! assert_eq!(area.cursor_screen_position(), Some((1, 1)));
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::module_name_repetitions)] // Allow text::TextArea etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod input;
pub mod style;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use buffer::{CellBuffer, ClipRect, Surface};
pub use cell::{Cell, CellContent};
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use style::{Style, StyleBuilder, TextAttributes};

// Re-export input types
pub use input::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent,
};

// Re-export the text area
pub use text::{
    Clipboard, EditCommand, Effects, InternalClipboard, PieceChain, Position, TextArea,
    TextAreaConfig, WrapMode,
};
pub use unicode::WidthMethod;
