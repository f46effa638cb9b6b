//! Piece-chain text storage and the editable text area built on it.
//!
//! Text lives in two append-only buffers: the initial text and everything
//! typed or pasted since. A doubly linked chain of spans (the piece chain)
//! references slices of those buffers in document order; edits relink spans
//! and never rewrite text.
//!
//! Key types:
//!
//! - [`PieceChain`]: spans, replace and undo/redo
//! - [`Stepper`]: grapheme-cluster iteration across span boundaries
//! - [`Layout`]: lazily extended line-start table for a wrap width
//! - [`TextArea`]: cursor, selection, scrolling, commands and rendering
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{CellBuffer, ClipRect, EditCommand, TextArea};
//!
//! let mut area = TextArea::with_text("aaaa bbbb");
//! let mut screen = CellBuffer::new(5, 2);
//! area.draw(&mut screen, ClipRect::new(0, 0, 5, 2));
//! assert_eq!(screen.to_text(), "aaaa\nbbbb");
//!
//! area.apply(EditCommand::DocumentEnd { extend: false });
//! area.apply(EditCommand::Insert("!".into()));
//! assert_eq!(area.text(), "aaaa bbbb!");
//! ```

mod chain;
mod clipboard;
mod config;
mod cursor;
mod edit;
mod layout;
mod render;
mod stepper;
mod store;
mod textarea;

pub use chain::{HEAD, PieceChain, Position, Span, SpanIndex, TAIL};
pub use clipboard::{Clipboard, InternalClipboard};
pub use config::TextAreaConfig;
pub use layout::{Layout, WrapMode};
pub use stepper::{Boundaries, Step, StepOptions, Stepper};
pub use store::Source;
pub use textarea::{EditCommand, Effects, TextArea};
