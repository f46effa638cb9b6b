//! Cell type for the in-memory render target.
//!
//! A rendered screen is a grid of cells, each holding one grapheme cluster
//! (a primary char plus combining chars) with its style. A glyph of display
//! width 2 occupies its own cell and marks the following one as
//! [`CellContent::Continuation`].
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{Cell, Style};
//!
//! let cell = Cell::new('A', Style::NONE);
//! assert_eq!(cell.symbol(), "A");
//!
//! let accented = Cell::cluster('e', &['\u{301}'], Style::NONE);
//! assert_eq!(accented.symbol(), "e\u{301}");
//! ```

use crate::style::Style;
use std::borrow::Cow;

/// Content of a single cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    /// Cleared cell, shown as a space.
    #[default]
    Empty,
    /// Single-codepoint glyph.
    Char(char),
    /// Primary char followed by combining chars.
    Cluster(Box<str>),
    /// Right half of a wide glyph painted into the previous cell.
    Continuation,
}

impl CellContent {
    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation)
    }

    /// Check if this is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Textual form: a space for empty cells, nothing for continuations.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(" "),
            Self::Char(c) => Cow::Owned(c.to_string()),
            Self::Cluster(s) => Cow::Borrowed(s),
            Self::Continuation => Cow::Borrowed(""),
        }
    }
}

/// A single screen cell with content and style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// The glyph occupying this cell.
    pub content: CellContent,
    /// Style the glyph was painted with.
    pub style: Style,
}

impl Cell {
    /// Create a cell holding a single char.
    #[must_use]
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            content: CellContent::Char(ch),
            style,
        }
    }

    /// Create a cell from a primary char and its combining chars.
    #[must_use]
    pub fn cluster(primary: char, combining: &[char], style: Style) -> Self {
        let content = if combining.is_empty() {
            CellContent::Char(primary)
        } else {
            let mut s = String::with_capacity(4 * (combining.len() + 1));
            s.push(primary);
            s.extend(combining);
            CellContent::Cluster(s.into_boxed_str())
        };
        Self { content, style }
    }

    /// Create a cleared cell.
    #[must_use]
    pub fn clear(style: Style) -> Self {
        Self {
            content: CellContent::Empty,
            style,
        }
    }

    /// Create a continuation cell for the right half of a wide glyph.
    #[must_use]
    pub fn continuation(style: Style) -> Self {
        Self {
            content: CellContent::Continuation,
            style,
        }
    }

    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    /// Glyph text of the cell.
    #[must_use]
    pub fn symbol(&self) -> Cow<'_, str> {
        self.content.as_str()
    }
}
