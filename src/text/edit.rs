//! Replace and undo/redo on the piece chain.
//!
//! Every edit goes through [`PieceChain::replace`]. An edit unlinks the spans
//! covering the deleted range and links fresh spans for the kept prefix, the
//! inserted text and the kept suffix. Before doing so it snapshots the two
//! spans bordering the range into new arena slots. Undo swaps the snapshots
//! with the live spans, which relinks the old range; redo swaps them back.
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::text::PieceChain;
//!
//! let mut chain = PieceChain::new("hello world");
//! let start = chain.position_at(5);
//! let end = chain.position_at(11);
//! chain.replace(start, end, ", there", false, start);
//! assert_eq!(chain.text(), "hello, there");
//!
//! chain.undo(end);
//! assert_eq!(chain.text(), "hello world");
//! ```

use std::mem;

use crate::event::{LogLevel, emit_log};
use crate::unicode::{ClusterClass, graphemes};

use super::chain::{PieceChain, Position, Span, SpanIndex, TAIL};
use super::store::Source;

#[derive(Clone, Copy, Debug)]
struct UndoItem {
    // Arena slots holding the snapshots.
    before: SpanIndex,
    after: SpanIndex,
    // Live spans the snapshots were taken from.
    original_before: SpanIndex,
    original_after: SpanIndex,
    pos: Position,
    length: usize,
    continuation: bool,
}

/// Undo stack: entries below `next` can be undone, the rest redone.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    items: Vec<UndoItem>,
    next: usize,
}

/// Line starts inside a span that `replace` unlinked must move to the copy
/// of its kept prefix; starts at or past `below` are gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Redirect {
    pub from: SpanIndex,
    pub to: SpanIndex,
    pub below: usize,
}

impl PieceChain {
    /// Delete `[start, end)` and insert `insert` in its place.
    ///
    /// Returns the position just after the inserted text. The edit is a
    /// no-op if it changes nothing or the resulting length would exceed the
    /// maximum length. With `continuation` set, the edit joins the previous
    /// undo step, and a single-cluster insert directly after the most
    /// recently appended edit text extends that span in place. Every other
    /// edit pushes an undo entry that records `cursor` for restoration.
    pub fn replace(
        &mut self,
        start: Position,
        end: Position,
        insert: &str,
        continuation: bool,
        cursor: Position,
    ) -> Position {
        let (end, _) = self.replace_tracked(start, end, insert, continuation, cursor);
        end
    }

    pub(crate) fn replace_tracked(
        &mut self,
        start: Position,
        end: Position,
        insert: &str,
        continuation: bool,
        cursor: Position,
    ) -> (Position, Option<Redirect>) {
        let start = self.normalize(start);
        let end = self.normalize(end);
        if start == end && insert.is_empty() {
            return (end, None);
        }
        let deleted = self.distance(start, end);
        debug_assert!(deleted.is_some(), "replace range is reversed");
        let Some(deleted) = deleted else {
            emit_log(
                LogLevel::Error,
                &format!("replace: range end {end:?} does not follow start {start:?}"),
            );
            return (end, None);
        };
        let new_len = self.len - deleted + insert.len();
        if self.max_length > 0 && new_len > self.max_length {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "replace rejected: length {new_len} exceeds maximum {}",
                    self.max_length
                ),
            );
            return (end, None);
        }

        let end_state = graphemes(insert)
            .last()
            .map_or(start.state, ClusterClass::of);

        // Typing fast path: grow the span holding the previous keystroke.
        let single_cluster = graphemes(insert).nth(1).is_none();
        if continuation && single_cluster && deleted == 0 && end.offset == 0 {
            let previous = self.prev(end.span);
            let span = self.spans[previous];
            if previous > TAIL
                && span.source == Source::Edit
                && span.offset + span.len == self.store.edits_len()
            {
                self.store.append(insert);
                self.spans[previous].len += insert.len();
                self.len = new_len;
                self.bump_revision();
                return (end.with_state(end_state), None);
            }
        }

        let before = self.prev(start.span);
        let after = if end.offset > 0 {
            self.next(end.span)
        } else {
            end.span
        };

        self.history.items.truncate(self.history.next);
        let snapshot_before = self.spans.len();
        self.spans.push(self.spans[before]);
        let snapshot_after = self.spans.len();
        self.spans.push(self.spans[after]);
        self.history.items.push(UndoItem {
            before: snapshot_before,
            after: snapshot_after,
            original_before: before,
            original_after: after,
            pos: cursor,
            length: self.len,
            continuation,
        });
        self.history.next += 1;

        self.spans[before].next = Some(after);
        self.spans[after].previous = Some(before);

        let mut left = before;
        let mut redirect = None;
        if start.offset > 0 {
            let span = self.spans[start.span];
            left = self.link_between(
                left,
                after,
                Span {
                    len: start.offset,
                    ..span
                },
            );
            redirect = Some(Redirect {
                from: start.span,
                to: left,
                below: start.offset,
            });
        }
        if !insert.is_empty() {
            let offset = self.store.append(insert);
            left = self.link_between(
                left,
                after,
                Span {
                    previous: None,
                    next: None,
                    source: Source::Edit,
                    offset,
                    len: insert.len(),
                },
            );
        }
        let mut new_end = Position::new(after, 0);
        if end.offset > 0 {
            let span = self.spans[end.span];
            let suffix = self.link_between(
                left,
                after,
                Span {
                    offset: span.offset + end.offset,
                    len: span.len - end.offset,
                    ..span
                },
            );
            new_end = Position::new(suffix, 0);
        }

        self.len = new_len;
        self.bump_revision();
        debug_assert_eq!(self.checked_length(), self.len);
        (new_end.with_state(end_state), redirect)
    }

    /// Check if there is an edit to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.next > 0
    }

    /// Check if there is an undone edit to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.next < self.history.items.len()
    }

    /// Undo the most recent step, including the run of continuation entries
    /// that make it up.
    ///
    /// `cursor` is stored for redo; the cursor position recorded when the
    /// step was made is returned.
    pub fn undo(&mut self, cursor: Position) -> Option<Position> {
        if !self.can_undo() {
            return None;
        }
        let mut cursor = cursor;
        while self.history.next > 0 {
            self.history.next -= 1;
            let item = &mut self.history.items[self.history.next];
            self.spans.swap(item.original_before, item.before);
            self.spans.swap(item.original_after, item.after);
            mem::swap(&mut item.pos, &mut cursor);
            mem::swap(&mut item.length, &mut self.len);
            if !item.continuation {
                break;
            }
        }
        self.bump_revision();
        debug_assert_eq!(self.checked_length(), self.len);
        Some(cursor)
    }

    /// Redo the most recently undone step.
    pub fn redo(&mut self, cursor: Position) -> Option<Position> {
        if !self.can_redo() {
            return None;
        }
        let mut cursor = cursor;
        while self.history.next < self.history.items.len() {
            let item = &mut self.history.items[self.history.next];
            self.spans.swap(item.original_before, item.before);
            self.spans.swap(item.original_after, item.after);
            mem::swap(&mut item.pos, &mut cursor);
            mem::swap(&mut item.length, &mut self.len);
            self.history.next += 1;
            match self.history.items.get(self.history.next) {
                Some(next) if next.continuation => {}
                _ => break,
            }
        }
        self.bump_revision();
        debug_assert_eq!(self.checked_length(), self.len);
        Some(cursor)
    }

    /// Replace the whole text, discarding undo history.
    pub fn reset(&mut self, text: &str) {
        let max_length = self.max_length;
        let revision = self.revision();
        *self = Self::new(text);
        self.max_length = max_length;
        while self.revision() <= revision {
            self.bump_revision();
        }
    }

    /// Number of undo entries (steps may span several entries).
    #[must_use]
    pub fn undo_entries(&self) -> usize {
        self.history.next
    }
}
