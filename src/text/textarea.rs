//! The text area: a piece chain, its layout, a cursor and a selection.
//!
//! Every interaction is an [`EditCommand`] applied through
//! [`TextArea::apply`], which reports what changed as [`Effects`]. Key and
//! mouse events are mapped to commands by [`TextArea::handle_event`].
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{EditCommand, Effects, TextArea, TextAreaConfig};
//!
//! let mut area = TextArea::new("hello", TextAreaConfig::default()).unwrap();
//! area.apply(EditCommand::DocumentEnd { extend: false });
//! let effects = area.apply(EditCommand::Insert(" world".into()));
//! assert!(effects.contains(Effects::TEXT_CHANGED));
//! assert_eq!(area.text(), "hello world");
//!
//! area.apply(EditCommand::Undo);
//! assert_eq!(area.text(), "hello");
//! ```

use std::fmt;
use std::ops::Range;

use bitflags::bitflags;

use crate::buffer::ClipRect;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::input::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crate::unicode::graphemes;

use super::chain::{PieceChain, Position};
use super::clipboard::{Clipboard, InternalClipboard};
use super::config::TextAreaConfig;
use super::cursor::Cursor;
use super::layout::{Layout, WrapMode};
use super::stepper::{Boundaries, Stepper};

const DEFAULT_WIDTH: usize = 80;
const DEFAULT_HEIGHT: usize = 24;

bitflags! {
    /// What a command changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Effects: u8 {
        /// The text changed.
        const TEXT_CHANGED = 0b001;
        /// The cursor or the selection moved.
        const CURSOR_MOVED = 0b010;
        /// The scroll offsets changed.
        const SCROLLED     = 0b100;
    }
}

/// A single interaction with a [`TextArea`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommand {
    /// Type text, replacing the selection. A single cluster coalesces with
    /// the keystrokes before it; longer text is an undo step of its own.
    Insert(String),
    /// Insert pasted text as one undo step.
    PasteText(String),
    /// Insert the configured newline.
    Newline,
    /// Insert `tab_size` spaces.
    Tab,
    Backspace,
    Delete,
    /// Delete back to the start of the previous word.
    DeleteWordBack,
    /// Delete up to the next hard line break, or the break itself if the
    /// cursor is right before it.
    KillToLineEnd,
    /// Delete the whole hard line including its break.
    KillLine,
    Left { extend: bool, word: bool },
    Right { extend: bool, word: bool },
    Up { extend: bool },
    Down { extend: bool },
    Home { extend: bool },
    End { extend: bool },
    PageUp { extend: bool },
    PageDown { extend: bool },
    DocumentStart { extend: bool },
    DocumentEnd { extend: bool },
    SelectAll,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    /// Place the cursor at a viewport cell.
    Click { x: u32, y: u32, extend: bool },
    /// Extend the selection to a viewport cell.
    Drag { x: u32, y: u32 },
    /// Select the word at a viewport cell.
    SelectWord { x: u32, y: u32 },
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl EditCommand {
    /// Default key binding.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let extend = key.extends_selection();
        let word = key.by_word();
        let ctrl = key.ctrl();
        let cmd = match key.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'h' => Self::Backspace,
                'd' => Self::Delete,
                'w' => Self::DeleteWordBack,
                'k' => Self::KillToLineEnd,
                'u' => Self::KillLine,
                'a' => Self::Home { extend },
                'e' => Self::End { extend },
                'b' => Self::PageUp { extend },
                'f' => Self::PageDown { extend },
                'l' => Self::SelectAll,
                'q' => Self::Copy,
                'x' => Self::Cut,
                'v' => Self::Paste,
                'z' => Self::Undo,
                'y' => Self::Redo,
                _ => return None,
            },
            KeyCode::Char(_) if key.alt() => return None,
            KeyCode::Char(c) => Self::Insert(c.to_string()),
            KeyCode::Enter => Self::Newline,
            KeyCode::Tab => Self::Tab,
            KeyCode::Backspace if word => Self::DeleteWordBack,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Left => Self::Left { extend, word },
            KeyCode::Right => Self::Right { extend, word },
            KeyCode::Up => Self::Up { extend },
            KeyCode::Down => Self::Down { extend },
            KeyCode::Home if ctrl => Self::DocumentStart { extend },
            KeyCode::End if ctrl => Self::DocumentEnd { extend },
            KeyCode::Home => Self::Home { extend },
            KeyCode::End => Self::End { extend },
            KeyCode::PageUp => Self::PageUp { extend },
            KeyCode::PageDown => Self::PageDown { extend },
            _ => return None,
        };
        Some(cmd)
    }

    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Insert(_)
                | Self::PasteText(_)
                | Self::Newline
                | Self::Tab
                | Self::Backspace
                | Self::Delete
                | Self::DeleteWordBack
                | Self::KillToLineEnd
                | Self::KillLine
                | Self::Cut
                | Self::Paste
                | Self::Undo
                | Self::Redo
        )
    }
}

/// Kind of the previous edit, for undo coalescing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Action {
    TypeSpace,
    TypeNonSpace,
    Backspace,
    Delete,
    #[default]
    Other,
}

/// Ordered selection bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    pub from: Position,
    pub to: Position,
    pub from_row: usize,
    pub to_row: usize,
}

/// A multi-line text editing area.
pub struct TextArea {
    pub(crate) chain: PieceChain,
    pub(crate) config: TextAreaConfig,
    pub(crate) layout: Layout,
    pub(crate) height: usize,
    /// Screen area of the last draw, for mouse coordinates.
    pub(crate) area: ClipRect,
    pub(crate) row_offset: usize,
    pub(crate) column_offset: usize,
    pub(crate) cursor: Cursor,
    pub(crate) selection_start: Cursor,
    last_action: Action,
    clipboard: Box<dyn Clipboard>,
    dragging: bool,
}

impl fmt::Debug for TextArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextArea")
            .field("len", &self.chain.len())
            .field("width", &self.layout.width())
            .field("height", &self.height)
            .field("row_offset", &self.row_offset)
            .field("column_offset", &self.column_offset)
            .field("cursor", &self.cursor)
            .field("selection_start", &self.selection_start)
            .finish_non_exhaustive()
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::build("", TextAreaConfig::default())
    }
}

impl TextArea {
    /// Create a text area holding `text`, with the cursor at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(text: &str, config: TextAreaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(text, config))
    }

    /// Create a text area with the default configuration.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::build(text, TextAreaConfig::default())
    }

    fn build(text: &str, config: TextAreaConfig) -> Self {
        let mut chain = PieceChain::new(text);
        chain.set_max_length(config.max_length);
        let layout = Layout::new(config.wrap, DEFAULT_WIDTH, config.step_options());
        let start = Cursor::at(chain.first());
        Self {
            chain,
            config,
            layout,
            height: DEFAULT_HEIGHT,
            area: ClipRect::new(0, 0, DEFAULT_WIDTH as u32, DEFAULT_HEIGHT as u32),
            row_offset: 0,
            column_offset: 0,
            cursor: start,
            selection_start: start,
            last_action: Action::Other,
            clipboard: Box::new(InternalClipboard::new()),
            dragging: false,
        }
    }

    /// Use a different clipboard.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Replace the clipboard.
    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = clipboard;
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TextAreaConfig {
        &self.config
    }

    /// Change the wrap mode.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.config.wrap = wrap;
        self.layout.set_wrap(wrap);
        self.forget_rows();
        self.clamp_to_cursor(0);
    }

    /// Change the maximum length in bytes (0 = unlimited). Text already
    /// longer than the limit is kept.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.config.max_length = max_length;
        self.chain.set_max_length(max_length);
    }

    /// Make the text area read-only or editable.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    /// Change the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.config.placeholder = placeholder.into();
    }

    /// The underlying piece chain.
    #[must_use]
    pub fn chain(&self) -> &PieceChain {
        &self.chain
    }

    /// Text length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        self.chain.text()
    }

    /// Replace the whole text, discarding undo history and selection.
    pub fn set_text(&mut self, text: &str, cursor_at_end: bool) {
        self.chain.reset(text);
        self.layout.truncate(0);
        self.row_offset = 0;
        self.column_offset = 0;
        self.last_action = Action::Other;
        self.cursor = Cursor::at(self.chain.first());
        if cursor_at_end {
            self.document_end();
        }
        self.selection_start = self.cursor;
        self.clamp_to_cursor(0);
    }

    /// Check if any text is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.cursor.pos != self.selection_start.pos
    }

    pub(crate) fn selection(&mut self) -> Selection {
        let hint = self.row_offset;
        self.find_cursor(hint);
        self.find_selection_start(hint);
        let a = self.selection_start;
        let b = self.cursor;
        let key = |c: &Cursor| (c.row.unwrap_or(0), c.actual_column);
        let a_first = match key(&a).cmp(&key(&b)) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            // Zero-width clusters share a column.
            std::cmp::Ordering::Equal => {
                a.pos == b.pos || self.chain.distance(a.pos, b.pos).is_some()
            }
        };
        let (from, to) = if a_first { (a, b) } else { (b, a) };
        Selection {
            from: from.pos,
            to: to.pos,
            from_row: from.row.unwrap_or(0),
            to_row: to.row.unwrap_or(0),
        }
    }

    /// Selected text.
    pub fn selected_text(&mut self) -> String {
        if !self.has_selection() {
            return String::new();
        }
        let sel = self.selection();
        self.chain.text_between(sel.from, sel.to)
    }

    /// Selection as byte offsets; empty at the cursor if nothing is selected.
    pub fn selection_range(&mut self) -> Range<usize> {
        if !self.has_selection() {
            let at = self.chain.offset_of(self.cursor.pos);
            return at..at;
        }
        let sel = self.selection();
        self.chain.offset_of(sel.from)..self.chain.offset_of(sel.to)
    }

    /// Select `[start, end)` by byte offset, clamped and snapped to cluster
    /// boundaries. The cursor goes to `end`; `start == end` just places it.
    pub fn select(&mut self, start: usize, end: usize) {
        self.selection_start = self.cursor_at_offset(start);
        self.cursor = self.cursor_at_offset(end);
        self.last_action = Action::Other;
        let hint = self.cursor.row.unwrap_or(0);
        self.clamp_to_cursor(hint);
    }

    /// Replace the byte range `[start, end)` with `text` as one undo step,
    /// leaving the cursor after the inserted text.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        if self.config.read_only {
            emit_log(LogLevel::Debug, "text area is read-only, edit ignored");
            return;
        }
        let from = self.cursor_at_offset(start.min(end));
        let to = self.cursor_at_offset(start.max(end));
        self.last_action = Action::Other;
        self.edit(from.pos, from.row.unwrap_or(0), to.pos, text, false);
    }

    /// Cursor row and column.
    pub fn cursor_position(&mut self) -> (usize, usize) {
        let row = self.cursor_row();
        (row, self.cursor.actual_column)
    }

    /// Screen cell of the cursor within the last drawn area, if visible.
    pub fn cursor_screen_position(&mut self) -> Option<(u32, u32)> {
        let (mut row, mut column) = self.cursor_position();
        let width = self.layout.width();
        if self.layout.wrap() != WrapMode::None && width > 0 && column >= width {
            row += 1;
            column = 0;
        }
        let y = row.checked_sub(self.row_offset)?;
        let x = column.checked_sub(self.column_offset)?;
        if y >= self.height || x >= width {
            return None;
        }
        Some((self.area.x + x as u32, self.area.y + y as u32))
    }

    /// Scroll offsets as (row, column).
    #[must_use]
    pub fn offset(&self) -> (usize, usize) {
        (self.row_offset, self.column_offset)
    }

    /// Scroll to (row, column), clamped to the text.
    pub fn set_offset(&mut self, row: usize, column: usize) {
        self.row_offset = row.min(self.max_row_offset(row));
        self.column_offset = if self.layout.wrap() == WrapMode::None {
            column.min(self.max_column_offset())
        } else {
            0
        };
    }

    fn max_column_offset(&self) -> usize {
        (self.layout.widest_line() + 1).saturating_sub(self.layout.width())
    }

    /// Viewport size in cells.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        (self.layout.width(), self.height)
    }

    /// Resize the viewport. A width change discards the layout.
    pub fn set_size(&mut self, width: usize, height: usize) {
        let changed = width != self.layout.width() || height != self.height;
        if self.layout.set_width(width) {
            self.forget_rows();
        }
        self.height = height;
        if changed {
            self.clamp_to_cursor(0);
        }
    }

    pub(crate) fn forget_rows(&mut self) {
        self.cursor.row = None;
        self.selection_start.row = None;
    }

    /// Text of every row, without hard breaks. Whitespace hanging at a
    /// word-wrap point is dropped.
    pub fn visual_lines(&mut self) -> Vec<String> {
        self.layout.extend_all(&self.chain);
        let rows = self.layout.known_rows();
        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let Some(start) = self.layout.row_start(row) else {
                break;
            };
            let end = self.layout.row_end(row);
            let mut line = String::new();
            let mut hard = false;
            for step in Stepper::new(&self.chain, start, self.layout.options()) {
                if step.start == end {
                    break;
                }
                if step.boundaries.contains(Boundaries::LINE_MUST) {
                    hard = true;
                    break;
                }
                line.push_str(&step.cluster);
            }
            if self.layout.wrap() == WrapMode::Word && !hard && row + 1 < rows {
                line.truncate(line.trim_end().len());
            }
            lines.push(line);
        }
        lines
    }

    /// Check if there is an edit to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.chain.can_undo()
    }

    /// Check if there is an edit to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.chain.can_redo()
    }

    /// Undo the last step.
    pub fn undo(&mut self) -> Effects {
        self.apply(EditCommand::Undo)
    }

    /// Redo the last undone step.
    pub fn redo(&mut self) -> Effects {
        self.apply(EditCommand::Redo)
    }

    /// Apply a command.
    pub fn apply(&mut self, cmd: EditCommand) -> Effects {
        let revision = self.chain.revision();
        let cursor = self.cursor.pos;
        let selection_start = self.selection_start.pos;
        let offsets = (self.row_offset, self.column_offset);

        if self.config.read_only && cmd.is_mutation() && cmd != EditCommand::Cut {
            emit_log(LogLevel::Debug, "text area is read-only, edit ignored");
        } else {
            let action = self.run(cmd);
            self.last_action = action;
        }

        let mut effects = Effects::empty();
        if self.chain.revision() != revision {
            effects |= Effects::TEXT_CHANGED;
        }
        if self.cursor.pos != cursor || self.selection_start.pos != selection_start {
            effects |= Effects::CURSOR_MOVED;
        }
        if (self.row_offset, self.column_offset) != offsets {
            effects |= Effects::SCROLLED;
        }
        effects
    }

    fn run(&mut self, cmd: EditCommand) -> Action {
        match cmd {
            EditCommand::Insert(text) => {
                if text.is_empty() {
                    return self.last_action;
                }
                // Only a single typed cluster joins the running typing step.
                let kind = if graphemes(&text).nth(1).is_some() {
                    Action::Other
                } else if text.chars().all(char::is_whitespace) {
                    Action::TypeSpace
                } else {
                    Action::TypeNonSpace
                };
                self.insert(&text, kind)
            }
            EditCommand::PasteText(text) => self.insert(&text, Action::Other),
            EditCommand::Newline => {
                let newline = self.config.newline.clone();
                self.insert(&newline, Action::TypeSpace)
            }
            EditCommand::Tab => {
                let spaces = " ".repeat(self.config.tab_size);
                self.insert(&spaces, Action::TypeSpace)
            }
            EditCommand::Backspace => self.backspace(),
            EditCommand::Delete => self.delete_forward(),
            EditCommand::DeleteWordBack => {
                if self.has_selection() {
                    self.delete_selection();
                } else {
                    let row = self.cursor_row();
                    let (from, from_row) = self.word_left_target(self.cursor.pos, row);
                    self.edit(from, from_row, self.cursor.pos, "", false);
                }
                Action::Other
            }
            EditCommand::KillToLineEnd => {
                let row = self.cursor_row();
                let (before, after) = self.hard_line_end(self.cursor.pos);
                let end = if before == self.cursor.pos { after } else { before };
                self.edit(self.cursor.pos, row, end, "", false);
                Action::Other
            }
            EditCommand::KillLine => {
                let row = self.cursor_row();
                let (start, start_row) = self.hard_line_start(row);
                let (_, end) = self.hard_line_end(self.cursor.pos);
                self.edit(start, start_row, end, "", false);
                Action::Other
            }
            EditCommand::Left { extend, word } => {
                if !extend && !word && self.has_selection() {
                    self.collapse_selection(true);
                } else if word {
                    self.word_left();
                } else {
                    self.cursor_left();
                }
                self.finish_motion(extend)
            }
            EditCommand::Right { extend, word } => {
                if !extend && !word && self.has_selection() {
                    self.collapse_selection(false);
                } else if word {
                    self.word_right();
                } else {
                    self.cursor_right();
                }
                self.finish_motion(extend)
            }
            EditCommand::Up { extend } => {
                self.cursor_up();
                self.finish_motion(extend)
            }
            EditCommand::Down { extend } => {
                self.cursor_down();
                self.finish_motion(extend)
            }
            EditCommand::Home { extend } => {
                self.cursor_home();
                self.finish_motion(extend)
            }
            EditCommand::End { extend } => {
                self.cursor_end();
                self.finish_motion(extend)
            }
            EditCommand::PageUp { extend } => {
                self.page_up();
                self.finish_motion(extend)
            }
            EditCommand::PageDown { extend } => {
                self.page_down();
                self.finish_motion(extend)
            }
            EditCommand::DocumentStart { extend } => {
                self.document_start();
                self.finish_motion(extend)
            }
            EditCommand::DocumentEnd { extend } => {
                self.document_end();
                self.finish_motion(extend)
            }
            EditCommand::SelectAll => {
                self.document_start();
                self.selection_start = self.cursor;
                self.document_end();
                self.finish_motion(true)
            }
            EditCommand::Copy => {
                self.copy_selection();
                Action::Other
            }
            EditCommand::Cut => {
                self.copy_selection();
                if self.config.read_only {
                    emit_log(LogLevel::Debug, "text area is read-only, cut copies only");
                } else if self.has_selection() {
                    self.delete_selection();
                }
                Action::Other
            }
            EditCommand::Paste => {
                match self.clipboard.paste() {
                    Ok(text) => {
                        self.insert(&text, Action::Other);
                    }
                    Err(err) => emit_log(LogLevel::Warn, &format!("paste failed: {err}")),
                }
                Action::Other
            }
            EditCommand::Undo => {
                if let Some(pos) = self.chain.undo(self.cursor.pos) {
                    self.restore_cursor(pos);
                }
                Action::Other
            }
            EditCommand::Redo => {
                if let Some(pos) = self.chain.redo(self.cursor.pos) {
                    self.restore_cursor(pos);
                }
                Action::Other
            }
            EditCommand::Click { x, y, extend } => {
                self.move_to_cell(x, y);
                self.finish_motion(extend)
            }
            EditCommand::Drag { x, y } => {
                self.move_to_cell(x, y);
                self.finish_motion(true)
            }
            EditCommand::SelectWord { x, y } => {
                self.move_to_cell(x, y);
                let row = self.cursor_row();
                let (start, end) = self.word_bounds(self.cursor.pos, row);
                self.selection_start = self.locate(start, row).into_cursor();
                self.set_cursor_pos(end, row);
                self.cursor.column = self.cursor.actual_column;
                self.clamp_to_cursor(row);
                Action::Other
            }
            EditCommand::ScrollUp => {
                self.row_offset = self.row_offset.saturating_sub(1);
                Action::Other
            }
            EditCommand::ScrollDown => {
                let target = self.row_offset + 1;
                self.row_offset = target.min(self.max_row_offset(target));
                Action::Other
            }
            EditCommand::ScrollLeft => {
                self.column_offset = self.column_offset.saturating_sub(1);
                Action::Other
            }
            EditCommand::ScrollRight => {
                if self.layout.wrap() == WrapMode::None {
                    // Rows laid out so far bound the scroll.
                    self.extend_lines(self.row_offset + self.height.max(1));
                    self.column_offset = (self.column_offset + 1).min(self.max_column_offset());
                }
                Action::Other
            }
        }
    }

    fn is_continuation(&self, kind: Action) -> bool {
        kind != Action::Other
            && (kind == self.last_action
                || (self.last_action == Action::TypeNonSpace && kind == Action::TypeSpace))
    }

    fn insert(&mut self, text: &str, kind: Action) -> Action {
        let continuation = self.is_continuation(kind);
        let sel = self.selection();
        self.edit(sel.from, sel.from_row, sel.to, text, continuation);
        kind
    }

    fn delete_selection(&mut self) {
        let sel = self.selection();
        self.edit(sel.from, sel.from_row, sel.to, "", false);
    }

    fn backspace(&mut self) -> Action {
        if self.has_selection() {
            self.delete_selection();
            return Action::Other;
        }
        let Some((from, from_row)) = self.prev_cluster_start() else {
            return Action::Backspace;
        };
        let continuation = self.is_continuation(Action::Backspace);
        self.edit(from, from_row, self.cursor.pos, "", continuation);
        Action::Backspace
    }

    fn delete_forward(&mut self) -> Action {
        if self.has_selection() {
            self.delete_selection();
            return Action::Other;
        }
        let Some(to) = self.next_cluster_end() else {
            return Action::Delete;
        };
        let row = self.cursor_row();
        let continuation = self.is_continuation(Action::Delete);
        self.edit(self.cursor.pos, row, to, "", continuation);
        Action::Delete
    }

    /// Replace `[from, to)` and put the cursor after the insert.
    fn edit(
        &mut self,
        from: Position,
        from_row: usize,
        to: Position,
        insert: &str,
        continuation: bool,
    ) {
        let revision = self.chain.revision();
        let (end, redirect) =
            self.chain
                .replace_tracked(from, to, insert, continuation, self.cursor.pos);
        if self.chain.revision() == revision {
            return;
        }
        if let Some(redirect) = redirect {
            self.layout.redirect(redirect);
        }
        self.layout.truncate(from_row);
        self.cursor = Cursor::at(end);
        let hint = from_row.saturating_sub(1);
        self.clamp_to_cursor(hint);
        self.cursor.column = self.cursor.actual_column;
        self.selection_start = self.cursor;
    }

    fn restore_cursor(&mut self, pos: Position) {
        self.layout.truncate(0);
        self.cursor = Cursor::at(pos);
        let hint = self.row_offset;
        self.clamp_to_cursor(hint);
        self.cursor.column = self.cursor.actual_column;
        self.selection_start = self.cursor;
    }

    fn collapse_selection(&mut self, to_start: bool) {
        let sel = self.selection();
        let (pos, row) = if to_start {
            (sel.from, sel.from_row)
        } else {
            (sel.to, sel.to_row)
        };
        self.set_cursor_pos(pos, row);
        self.cursor.column = self.cursor.actual_column;
    }

    fn finish_motion(&mut self, extend: bool) -> Action {
        if !extend {
            self.selection_start = self.cursor;
        }
        let hint = self.cursor.row.unwrap_or(self.row_offset);
        self.clamp_to_cursor(hint);
        Action::Other
    }

    fn move_to_cell(&mut self, x: u32, y: u32) {
        let row = self.row_offset + y as usize;
        let column = self.column_offset + x as usize;
        self.move_cursor(row, Some(column));
        self.cursor.column = self.cursor.actual_column;
    }

    fn copy_selection(&mut self) {
        if !self.has_selection() {
            return;
        }
        let text = self.selected_text();
        if let Err(err) = self.clipboard.copy(&text) {
            emit_log(LogLevel::Warn, &format!("copy failed: {err}"));
        }
    }

    /// Map an input event to a command and apply it.
    pub fn handle_event(&mut self, event: &Event) -> Effects {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(paste) => {
                self.apply(EditCommand::PasteText(paste.content().to_string()))
            }
        }
    }

    /// Apply the default binding for a key, if it has one.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Effects {
        EditCommand::from_key(key).map_or(Effects::empty(), |cmd| self.apply(cmd))
    }

    /// Apply a mouse event given in screen coordinates.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> Effects {
        let area = self.area;
        let inside = area.contains(mouse.x, mouse.y);
        let x = mouse.x.saturating_sub(area.x);
        let y = mouse.y.saturating_sub(area.y);
        match (mouse.kind, mouse.button) {
            (MouseEventKind::Press, MouseButton::Left) if inside => {
                self.dragging = true;
                self.apply(EditCommand::Click {
                    x,
                    y,
                    extend: mouse.shift(),
                })
            }
            (MouseEventKind::Move, MouseButton::Left) if self.dragging => {
                let x = x.min(area.width.saturating_sub(1));
                self.apply(EditCommand::Drag { x, y })
            }
            (MouseEventKind::Release, _) => {
                self.dragging = false;
                Effects::empty()
            }
            (MouseEventKind::ScrollUp, _) if inside => self.apply(EditCommand::ScrollUp),
            (MouseEventKind::ScrollDown, _) if inside => self.apply(EditCommand::ScrollDown),
            (MouseEventKind::ScrollLeft, _) if inside => self.apply(EditCommand::ScrollLeft),
            (MouseEventKind::ScrollRight, _) if inside => self.apply(EditCommand::ScrollRight),
            _ => Effects::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    fn area(text: &str) -> TextArea {
        TextArea::with_text(text)
    }

    fn type_str(area: &mut TextArea, text: &str) {
        for c in text.chars() {
            area.apply(EditCommand::Insert(c.to_string()));
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TextAreaConfig::default().with_tab_size(0);
        assert!(TextArea::new("x", config).is_err());
    }

    #[test]
    fn test_typing_is_one_undo_step() {
        let mut area = area("");
        type_str(&mut area, "hello");
        assert_eq!(area.text(), "hello");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "");
        area.apply(EditCommand::Redo);
        assert_eq!(area.text(), "hello");
    }

    #[test]
    fn test_typing_then_backspace_is_two_steps() {
        let mut area = area("");
        type_str(&mut area, "hi ");
        area.apply(EditCommand::Backspace);
        assert_eq!(area.text(), "hi");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "hi ");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "");
    }

    #[test]
    fn test_motion_breaks_coalescing() {
        let mut area = area("");
        type_str(&mut area, "ab");
        area.apply(EditCommand::Left { extend: false, word: false });
        area.apply(EditCommand::Right { extend: false, word: false });
        type_str(&mut area, "cd");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_selection_typed_over() {
        let mut area = area("hello");
        area.select(2, 4);
        assert_eq!(area.selected_text(), "ll");
        area.apply(EditCommand::Insert("X".into()));
        assert_eq!(area.text(), "heXo");

        let mut area = TextArea::with_text("hello");
        area.select(2, 5);
        area.apply(EditCommand::Insert("X".into()));
        assert_eq!(area.text(), "heX");
        assert!(!area.has_selection());
    }

    #[test]
    fn test_reversed_selection_orders_bounds() {
        let mut area = area("hello");
        area.select(4, 1);
        assert_eq!(area.selection_range(), 1..4);
        assert_eq!(area.selected_text(), "ell");
        assert_eq!(area.cursor_position(), (0, 1));
    }

    #[test]
    fn test_max_length_rejects_typing() {
        let config = TextAreaConfig::default().with_max_length(5);
        let mut area = TextArea::new("abcde", config).unwrap();
        area.apply(EditCommand::DocumentEnd { extend: false });
        let effects = area.apply(EditCommand::Insert("f".into()));
        assert!(!effects.contains(Effects::TEXT_CHANGED));
        assert_eq!(area.text(), "abcde");
    }

    #[test]
    fn test_read_only_ignores_edits_but_copies() {
        let config = TextAreaConfig::default().with_read_only(true);
        let mut area = TextArea::new("hello", config).unwrap();
        assert!(area.apply(EditCommand::Insert("x".into())).is_empty());
        area.apply(EditCommand::SelectAll);
        area.apply(EditCommand::Cut);
        assert_eq!(area.text(), "hello");
        area.set_read_only(false);
        area.apply(EditCommand::DocumentEnd { extend: false });
        area.apply(EditCommand::Paste);
        assert_eq!(area.text(), "hellohello");
    }

    #[test]
    fn test_key_bindings() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL);
        assert_eq!(EditCommand::from_key(&ctrl('z')), Some(EditCommand::Undo));
        assert_eq!(EditCommand::from_key(&ctrl('w')), Some(EditCommand::DeleteWordBack));
        assert_eq!(
            EditCommand::from_key(&KeyEvent::new(
                KeyCode::Left,
                KeyModifiers::SHIFT | KeyModifiers::ALT
            )),
            Some(EditCommand::Left {
                extend: true,
                word: true
            })
        );
        assert_eq!(
            EditCommand::from_key(&KeyEvent::new(KeyCode::Home, KeyModifiers::CTRL)),
            Some(EditCommand::DocumentStart { extend: false })
        );
        assert_eq!(
            EditCommand::from_key(&KeyEvent::key(KeyCode::Char('a'))),
            Some(EditCommand::Insert("a".into()))
        );
        assert_eq!(
            EditCommand::from_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(EditCommand::from_key(&KeyEvent::key(KeyCode::Esc)), None);
    }

    #[test]
    fn test_effects() {
        let mut area = area("abc");
        let effects = area.apply(EditCommand::Right { extend: false, word: false });
        assert_eq!(effects, Effects::CURSOR_MOVED);
        let effects = area.apply(EditCommand::Insert("x".into()));
        assert!(effects.contains(Effects::TEXT_CHANGED | Effects::CURSOR_MOVED));
        let effects = area.apply(EditCommand::Left { extend: false, word: false });
        assert!(!effects.contains(Effects::TEXT_CHANGED));
    }

    #[test]
    fn test_kill_to_line_end() {
        let mut area = area("abc\ndef");
        area.apply(EditCommand::Right { extend: false, word: false });
        area.apply(EditCommand::KillToLineEnd);
        assert_eq!(area.text(), "a\ndef");
        area.apply(EditCommand::KillToLineEnd);
        assert_eq!(area.text(), "adef");
    }

    #[test]
    fn test_kill_line() {
        let mut area = area("one\ntwo\nthree");
        area.apply(EditCommand::Down { extend: false });
        area.apply(EditCommand::Right { extend: false, word: false });
        area.apply(EditCommand::KillLine);
        assert_eq!(area.text(), "one\nthree");
        assert_eq!(area.cursor_position(), (1, 0));
    }

    #[test]
    fn test_delete_word_back() {
        let mut area = area("foo bar  ");
        area.apply(EditCommand::DocumentEnd { extend: false });
        area.apply(EditCommand::DeleteWordBack);
        assert_eq!(area.text(), "foo ");
        area.apply(EditCommand::DeleteWordBack);
        assert_eq!(area.text(), "");
    }

    #[test]
    fn test_multi_cluster_insert_is_own_step() {
        let mut area = area("");
        type_str(&mut area, "ab");
        area.apply(EditCommand::Insert("cd ef".into()));
        type_str(&mut area, "g");
        assert_eq!(area.text(), "abcd efg");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "abcd ef");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_replace_range_is_one_step() {
        let mut area = area("hello world");
        area.replace_range(6, 11, "there");
        assert_eq!(area.text(), "hello there");
        assert_eq!(area.cursor_position(), (0, 11));
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "hello world");
    }

    #[test]
    fn test_paste_event_is_one_step() {
        let mut area = area("");
        type_str(&mut area, "a");
        area.handle_event(&Event::Paste(crate::input::PasteEvent::new("bc def")));
        assert_eq!(area.text(), "abc def");
        area.apply(EditCommand::Undo);
        assert_eq!(area.text(), "a");
    }

    #[test]
    fn test_set_text_resets() {
        let mut area = area("abc");
        type_str(&mut area, "x");
        area.set_text("new\ntext", true);
        assert_eq!(area.text(), "new\ntext");
        assert!(!area.can_undo());
        assert_eq!(area.cursor_position(), (1, 4));
    }

    #[test]
    fn test_scrolling_lays_out_only_nearby_rows() {
        let text = "line\n".repeat(10_000);
        let config = TextAreaConfig::default().with_wrap(WrapMode::None);
        let mut area = TextArea::new(&text, config).unwrap();
        area.set_size(10, 5);
        area.apply(EditCommand::PageDown { extend: false });
        assert_eq!(area.cursor_position(), (5, 0));
        area.apply(EditCommand::ScrollDown);
        area.apply(EditCommand::ScrollDown);
        area.apply(EditCommand::ScrollRight);
        assert_eq!(area.offset(), (7, 0));
        area.set_offset(40, 3);
        assert_eq!(area.offset(), (40, 0));
        assert!(area.layout.known_rows() < 100);
        assert!(!area.layout.is_exhausted());

        area.set_offset(usize::MAX, 0);
        assert_eq!(area.offset().0, 10_001 - 5);
    }
}
