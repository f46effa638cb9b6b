//! Cursor placement, motion and viewport clamping.
//!
//! A cursor is a chain position plus its screen row and column. Edits and
//! relayouts forget the row; it is recovered lazily by scanning rows from a
//! hint, since a row index alone is meaningless once rows move.

use crate::event::{LogLevel, emit_log};
use crate::unicode::ClusterClass;

use super::chain::Position;
use super::layout::WrapMode;
use super::stepper::{Boundaries, Stepper};
use super::textarea::TextArea;

/// Columns kept visible left of the cursor when scrolling horizontally.
const MIN_CURSOR_PREFIX: usize = 5;
/// Columns kept visible right of the cursor when scrolling horizontally.
const MIN_CURSOR_SUFFIX: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    /// Row, if known.
    pub row: Option<usize>,
    /// Column the cursor would like to be at; kept across up/down moves.
    pub column: usize,
    /// Column the cursor is actually at.
    pub actual_column: usize,
    pub pos: Position,
}

impl Cursor {
    pub(crate) fn at(pos: Position) -> Self {
        Self {
            row: None,
            column: 0,
            actual_column: 0,
            pos,
        }
    }
}

/// Row and column of a position, with the position snapped to a cluster
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Located {
    pub row: usize,
    pub column: usize,
    pub pos: Position,
}

impl Located {
    pub(crate) fn into_cursor(self) -> Cursor {
        Cursor {
            row: Some(self.row),
            column: self.column,
            actual_column: self.column,
            pos: self.pos,
        }
    }
}

impl TextArea {
    pub(crate) fn extend_lines(&mut self, through_row: usize) {
        self.layout.extend(&self.chain, through_row);
    }

    /// Largest row offset that keeps a full page in view, laying out only
    /// through one page past `row`. Until the text is exhausted the bound
    /// is what the known rows allow, which always admits `row`.
    pub(crate) fn max_row_offset(&mut self, row: usize) -> usize {
        let page = self.height.max(1);
        self.extend_lines(row.saturating_add(page));
        self.layout.known_rows().saturating_sub(page)
    }

    /// Number of rows, laying out the whole text.
    pub(crate) fn row_count(&mut self) -> usize {
        self.layout.extend_all(&self.chain);
        self.layout.known_rows()
    }

    fn row_bounds(&mut self, row: usize) -> (Position, Position, bool) {
        self.extend_lines(row);
        let start = self
            .layout
            .row_start(row)
            .unwrap_or_else(|| self.chain.first());
        let is_last = self.layout.row_start(row + 1).is_none();
        (start, self.layout.row_end(row), is_last)
    }

    /// Column of `pos` within `row`, if the row contains it.
    fn column_in_row(&mut self, row: usize, pos: Position) -> Option<(usize, Position)> {
        let (start, end, is_last) = self.row_bounds(row);
        let distance = self.chain.distance_bounded(start, pos, end)?;
        if pos == end && !is_last {
            return None;
        }
        let mut bytes = 0;
        let mut column = 0;
        let mut snapped = start;
        for step in Stepper::new(&self.chain, start, self.layout.options()) {
            if bytes == distance || bytes + step.cluster.len() > distance {
                break;
            }
            bytes += step.cluster.len();
            column += step.width;
            snapped = step.end;
        }
        Some((column, snapped))
    }

    /// Find the row and column of a position, scanning rows from `hint`.
    pub(crate) fn locate(&mut self, pos: Position, hint: usize) -> Located {
        let pos = self.chain.normalize(pos);
        let mut row = hint;
        let mut restarted = hint == 0;
        loop {
            self.extend_lines(row);
            if row >= self.layout.known_rows() {
                if restarted {
                    break;
                }
                row = 0;
                restarted = true;
                continue;
            }
            if let Some((column, snapped)) = self.column_in_row(row, pos) {
                return Located {
                    row,
                    column,
                    pos: snapped,
                };
            }
            row += 1;
        }

        emit_log(
            LogLevel::Error,
            &format!("text area: position {pos:?} is not on any row"),
        );
        debug_assert!(self.chain.is_linked(pos.span), "position off the chain");
        let last = self.row_count().saturating_sub(1);
        self.end_of_row(last)
    }

    fn end_of_row(&mut self, row: usize) -> Located {
        self.move_cursor(row, None);
        Located {
            row: self.cursor.row.unwrap_or(row),
            column: self.cursor.actual_column,
            pos: self.cursor.pos,
        }
    }

    /// Make sure the cursor row is known.
    pub(crate) fn find_cursor(&mut self, hint: usize) {
        if self.cursor.row.is_none() {
            self.cursor = self.locate(self.cursor.pos, hint).into_cursor();
        }
    }

    /// Make sure the selection start row is known.
    pub(crate) fn find_selection_start(&mut self, hint: usize) {
        if self.selection_start.row.is_none() {
            self.selection_start = self.locate(self.selection_start.pos, hint).into_cursor();
        }
    }

    /// Cursor for a byte offset, snapped to a cluster boundary.
    pub(crate) fn cursor_at_offset(&mut self, offset: usize) -> Cursor {
        let pos = self.chain.position_at(offset);
        self.locate(pos, 0).into_cursor()
    }

    /// Move the cursor to `column` of `row`, or to the row's end if `column`
    /// is `None`. Rows past the end clamp to the end of text.
    ///
    /// The cursor never lands after the last cluster of a row that has a
    /// successor: that position belongs to the next row.
    pub(crate) fn move_cursor(&mut self, row: usize, column: Option<usize>) {
        self.extend_lines(row);
        let rows = self.layout.known_rows();
        let (row, column) = if row >= rows {
            (rows.saturating_sub(1), None)
        } else {
            (row, column)
        };
        let (start, end, is_last) = self.row_bounds(row);

        let mut actual = 0;
        let mut pos = start;
        for step in Stepper::new(&self.chain, start, self.layout.options()) {
            if column.is_some_and(|c| actual >= c) {
                break;
            }
            if step.end == end && !is_last {
                break;
            }
            if column.is_some_and(|c| actual + step.width > c) {
                break;
            }
            actual += step.width;
            pos = step.end;
            if pos == end {
                break;
            }
        }
        self.cursor.row = Some(row);
        self.cursor.actual_column = actual;
        self.cursor.pos = pos;
    }

    /// Place the cursor at a position, recovering its row from `hint`.
    pub(crate) fn set_cursor_pos(&mut self, pos: Position, hint: usize) {
        self.cursor = self.locate(pos, hint).into_cursor();
    }

    /// Adjust the scroll offsets so the cursor is visible.
    pub(crate) fn clamp_to_cursor(&mut self, hint: usize) {
        self.find_cursor(hint);
        let Some(mut row) = self.cursor.row else {
            return;
        };
        let width = self.layout.width();
        if self.layout.wrap() != WrapMode::None && width > 0 && self.cursor.actual_column >= width
        {
            row += 1;
        }
        if self.height > 0 {
            if row >= self.row_offset + self.height {
                self.row_offset = row + 1 - self.height;
            } else if row < self.row_offset {
                self.row_offset = row;
            }
        }
        if self.layout.wrap() != WrapMode::None {
            self.column_offset = 0;
        } else if width > 0 {
            let prefix = MIN_CURSOR_PREFIX.min(width / 2);
            let suffix = MIN_CURSOR_SUFFIX.min(width - 1);
            let actual = self.cursor.actual_column;
            if actual < self.column_offset + prefix {
                self.column_offset = actual.saturating_sub(prefix);
            } else if actual + suffix >= self.column_offset + width {
                self.column_offset = actual + suffix + 1 - width;
            }
        }
    }

    pub(crate) fn cursor_row(&mut self) -> usize {
        self.find_cursor(self.row_offset);
        self.cursor.row.unwrap_or(0)
    }

    /// Start of the cluster before the cursor and the row it is on.
    pub(crate) fn prev_cluster_start(&mut self) -> Option<(Position, usize)> {
        let row = self.cursor_row();
        let target = self.cursor.pos;
        let (start, end, _) = self.row_bounds(row);
        if target != start {
            let mut last = None;
            for step in Stepper::new(&self.chain, start, self.layout.options()) {
                if step.start == target || step.start == end {
                    break;
                }
                last = Some(step.start);
            }
            return last.map(|pos| (pos, row));
        }
        if row == 0 {
            return None;
        }
        let (start, end, _) = self.row_bounds(row - 1);
        let last = Stepper::new(&self.chain, start, self.layout.options())
            .take_while(|step| step.start != end)
            .last()?;
        Some((last.start, row - 1))
    }

    /// End of the cluster at the cursor.
    pub(crate) fn next_cluster_end(&self) -> Option<Position> {
        Stepper::new(&self.chain, self.cursor.pos, self.layout.options())
            .next()
            .map(|step| step.end)
    }

    pub(crate) fn cursor_left(&mut self) {
        let row = self.cursor_row();
        if self.cursor.actual_column > 0 {
            self.move_cursor(row, Some(self.cursor.actual_column - 1));
        } else if let Some((pos, row)) = self.prev_cluster_start() {
            self.set_cursor_pos(pos, row);
        }
        self.cursor.column = self.cursor.actual_column;
    }

    pub(crate) fn cursor_right(&mut self) {
        let row = self.cursor_row();
        if let Some(end) = self.next_cluster_end() {
            self.set_cursor_pos(end, row);
        }
        self.cursor.column = self.cursor.actual_column;
    }

    pub(crate) fn cursor_up(&mut self) {
        let row = self.cursor_row();
        if row == 0 {
            self.move_cursor(0, Some(0));
        } else {
            self.move_cursor(row - 1, Some(self.cursor.column));
        }
    }

    pub(crate) fn cursor_down(&mut self) {
        let row = self.cursor_row();
        self.move_cursor(row + 1, Some(self.cursor.column));
    }

    pub(crate) fn cursor_home(&mut self) {
        let row = self.cursor_row();
        self.move_cursor(row, Some(0));
        self.cursor.column = 0;
    }

    pub(crate) fn cursor_end(&mut self) {
        let row = self.cursor_row();
        self.move_cursor(row, None);
        self.cursor.column = self.cursor.actual_column;
    }

    pub(crate) fn page_up(&mut self) {
        let row = self.cursor_row();
        let page = self.height.max(1);
        self.row_offset = self.row_offset.saturating_sub(page);
        self.move_cursor(row.saturating_sub(page), Some(self.cursor.column));
    }

    pub(crate) fn page_down(&mut self) {
        let row = self.cursor_row();
        let page = self.height.max(1);
        let target = self.row_offset + page;
        self.row_offset = target.min(self.max_row_offset(target));
        self.move_cursor(row + page, Some(self.cursor.column));
    }

    pub(crate) fn document_start(&mut self) {
        self.move_cursor(0, Some(0));
        self.cursor.column = 0;
    }

    pub(crate) fn document_end(&mut self) {
        self.move_cursor(usize::MAX, None);
        self.cursor.column = self.cursor.actual_column;
    }

    /// Where a word-left motion from `from` (on `from_row`) lands: the start
    /// of the nearest word beginning before `from`, or the start of text.
    pub(crate) fn word_left_target(
        &mut self,
        from: Position,
        from_row: usize,
    ) -> (Position, usize) {
        let mut row = from_row;
        let mut target = Some(from);
        loop {
            let (start, end, _) = self.row_bounds(row);
            let mut previous = start.state;
            let mut candidate = None;
            for step in Stepper::new(&self.chain, start, self.layout.options()) {
                if Some(step.start) == target || step.start == end {
                    break;
                }
                if step.class.is_word() && !previous.is_word() {
                    candidate = Some(step.start);
                }
                previous = step.class;
            }
            if let Some(pos) = candidate {
                return (pos, row);
            }
            if row == 0 {
                return (start, 0);
            }
            row -= 1;
            target = None;
        }
    }

    /// Where a word-right motion from `from` lands: just past the next word.
    pub(crate) fn word_right_target(&self, from: Position) -> Position {
        let mut seen_word = false;
        let mut pos = from;
        for step in Stepper::new(&self.chain, from, self.layout.options()) {
            if step.class.is_word() {
                seen_word = true;
            } else if seen_word {
                break;
            }
            pos = step.end;
        }
        pos
    }

    pub(crate) fn word_left(&mut self) {
        let row = self.cursor_row();
        let (pos, row) = self.word_left_target(self.cursor.pos, row);
        self.set_cursor_pos(pos, row);
        self.cursor.column = self.cursor.actual_column;
    }

    pub(crate) fn word_right(&mut self) {
        let row = self.cursor_row();
        let pos = self.word_right_target(self.cursor.pos);
        self.set_cursor_pos(pos, row);
        self.cursor.column = self.cursor.actual_column;
    }

    /// Bounds of the word (or single non-word cluster) at `pos`.
    pub(crate) fn word_bounds(&mut self, pos: Position, row: usize) -> (Position, Position) {
        let mut steps = Stepper::new(&self.chain, pos, self.layout.options());
        let Some(first) = steps.next() else {
            return (pos, pos);
        };
        if !first.class.is_word() {
            return (first.start, first.end);
        }
        let mut end = first.end;
        for step in steps {
            if !step.class.is_word() {
                break;
            }
            end = step.end;
        }
        let after_first = self.locate(first.end, row);
        let (start, _) = self.word_left_target(after_first.pos, after_first.row);
        (start, end)
    }

    /// Start of the hard line containing `row`.
    pub(crate) fn hard_line_start(&mut self, row: usize) -> (Position, usize) {
        let mut row = row;
        loop {
            let (start, _, _) = self.row_bounds(row);
            if row == 0 || start.state == ClusterClass::Newline {
                return (start, row);
            }
            row -= 1;
        }
    }

    /// Positions before and after the hard break ending the line at `from`.
    ///
    /// Both are the end of text if the line has no hard break.
    pub(crate) fn hard_line_end(&self, from: Position) -> (Position, Position) {
        let mut before = from;
        for step in Stepper::new(&self.chain, from, self.layout.options()) {
            if step.boundaries.contains(Boundaries::LINE_MUST) {
                return (before, step.end);
            }
            before = step.end;
        }
        (before, before)
    }
}
