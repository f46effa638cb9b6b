//! Piece chain: the document as a linked list of spans over two buffers.
//!
//! Spans live in an append-only arena and are linked by index. Slot 0 is the
//! head sentinel and slot 1 the tail sentinel; neither holds text. Removing a
//! span only unlinks it, so old slots remain valid targets for undo.
//!
//! ```text
//!  HEAD <-> [initial 0..5] <-> [edit 0..3] <-> [initial 5..9] <-> TAIL
//! ```

use crate::unicode::ClusterClass;

use super::edit::History;
use super::store::{BufferStore, Source};

/// Index of a span in the arena.
pub type SpanIndex = usize;

/// Head sentinel index.
pub const HEAD: SpanIndex = 0;
/// Tail sentinel index. The end-of-text position is `(TAIL, 0)`.
pub const TAIL: SpanIndex = 1;

/// One run of text in either backing buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Previous span on the chain (`None` for the head sentinel).
    pub previous: Option<SpanIndex>,
    /// Next span on the chain (`None` for the tail sentinel).
    pub next: Option<SpanIndex>,
    /// Buffer the text lives in.
    pub source: Source,
    /// Byte offset into the buffer.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Span {
    const fn sentinel(previous: Option<SpanIndex>, next: Option<SpanIndex>) -> Self {
        Self {
            previous,
            next,
            source: Source::Initial,
            offset: 0,
            len: 0,
        }
    }
}

/// A location in the chain: a byte offset inside a span.
///
/// `state` is the class of the cluster just before the position. It lets a
/// forward scan resume mid-text; it does not take part in equality.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub span: SpanIndex,
    pub offset: usize,
    pub state: ClusterClass,
}

impl Position {
    /// Create a position with no preceding-cluster context.
    #[must_use]
    pub const fn new(span: SpanIndex, offset: usize) -> Self {
        Self {
            span,
            offset,
            state: ClusterClass::Start,
        }
    }

    /// The end-of-text position.
    #[must_use]
    pub const fn end() -> Self {
        Self::new(TAIL, 0)
    }

    /// Check if this is the end-of-text position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.span == TAIL
    }

    #[must_use]
    pub(crate) const fn with_state(self, state: ClusterClass) -> Self {
        Self { state, ..self }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::end()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.offset == other.offset
    }
}

impl Eq for Position {}

/// The piece chain and its backing buffers.
#[derive(Clone, Debug)]
pub struct PieceChain {
    pub(crate) spans: Vec<Span>,
    pub(crate) store: BufferStore,
    pub(crate) len: usize,
    pub(crate) history: History,
    pub(crate) max_length: usize,
    revision: u64,
}

impl PieceChain {
    /// Create a chain holding `text` as a single span (none if empty).
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut chain = Self {
            spans: vec![Span::sentinel(None, Some(TAIL)), Span::sentinel(Some(HEAD), None)],
            store: BufferStore::new(text),
            len: 0,
            history: History::default(),
            max_length: 0,
            revision: 0,
        };
        if !text.is_empty() {
            chain.link_between(
                HEAD,
                TAIL,
                Span {
                    previous: None,
                    next: None,
                    source: Source::Initial,
                    offset: 0,
                    len: text.len(),
                },
            );
            chain.len = text.len();
        }
        chain
    }

    /// Total length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the chain holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Counter bumped on every text mutation, including undo and redo.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Maximum length in bytes accepted by [`replace`](Self::replace) (0 = unlimited).
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Set the maximum length; existing text is not truncated.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length;
    }

    /// Get a span by index.
    #[must_use]
    pub fn span(&self, index: SpanIndex) -> Option<&Span> {
        self.spans.get(index)
    }

    /// Number of arena slots, linked or not.
    #[must_use]
    pub fn arena_len(&self) -> usize {
        self.spans.len()
    }

    /// Next span on the chain; the tail sentinel past the end.
    #[must_use]
    pub fn next(&self, index: SpanIndex) -> SpanIndex {
        self.spans.get(index).and_then(|s| s.next).unwrap_or(TAIL)
    }

    /// Previous span on the chain; the head sentinel past the start.
    #[must_use]
    pub fn prev(&self, index: SpanIndex) -> SpanIndex {
        self.spans.get(index).and_then(|s| s.previous).unwrap_or(HEAD)
    }

    /// Position of the first byte of text (the end position if empty).
    #[must_use]
    pub fn first(&self) -> Position {
        Position::new(self.next(HEAD), 0)
    }

    fn span_len(&self, index: SpanIndex) -> usize {
        self.spans.get(index).map_or(0, |s| s.len)
    }

    /// Text of one span. Sentinels and invalid indices yield `""`.
    #[must_use]
    pub fn span_text(&self, index: SpanIndex) -> &str {
        match self.spans.get(index) {
            Some(span) if index > TAIL => self.store.slice(span.source, span.offset, span.len),
            _ => "",
        }
    }

    /// Link `span` between `previous` and `next`, returning its new index.
    pub(crate) fn link_between(
        &mut self,
        previous: SpanIndex,
        next: SpanIndex,
        mut span: Span,
    ) -> SpanIndex {
        let index = self.spans.len();
        span.previous = Some(previous);
        span.next = Some(next);
        self.spans.push(span);
        self.spans[previous].next = Some(index);
        self.spans[next].previous = Some(index);
        index
    }

    /// Append `text` to the edit buffer and link a new span for it before
    /// `before`.
    ///
    /// Returns the new span's index, or `before` unchanged if `text` is
    /// empty or `before` is the head sentinel or out of range.
    pub fn insert_span(&mut self, text: &str, before: SpanIndex) -> SpanIndex {
        if text.is_empty() || before == HEAD || before >= self.spans.len() {
            return before;
        }
        debug_assert!(self.is_linked(before), "span {before} is not on the chain");
        let offset = self.store.append(text);
        let previous = self.prev(before);
        let index = self.link_between(
            previous,
            before,
            Span {
                previous: None,
                next: None,
                source: Source::Edit,
                offset,
                len: text.len(),
            },
        );
        self.len += text.len();
        self.bump_revision();
        index
    }

    /// Split a span at `offset`, returning the index of the trailing part.
    ///
    /// The total length is unchanged. Returns `index` unchanged when the
    /// index is a sentinel or out of range, or `offset` is not strictly
    /// inside the span on a char boundary.
    pub fn split_span(&mut self, index: SpanIndex, offset: usize) -> SpanIndex {
        if index <= TAIL || index >= self.spans.len() {
            return index;
        }
        let span = self.spans[index];
        if offset == 0 || offset >= span.len || !self.span_text(index).is_char_boundary(offset) {
            return index;
        }
        let next = self.next(index);
        let trailing = self.link_between(
            index,
            next,
            Span {
                offset: span.offset + offset,
                len: span.len - offset,
                ..span
            },
        );
        self.spans[index].len = offset;
        trailing
    }

    /// Unlink a span, returning the index of the span that followed it.
    ///
    /// Sentinels and invalid indices are no-ops returning `index`.
    pub fn delete_span(&mut self, index: SpanIndex) -> SpanIndex {
        if index <= TAIL || index >= self.spans.len() {
            return index;
        }
        let previous = self.prev(index);
        let next = self.next(index);
        self.spans[previous].next = Some(next);
        self.spans[next].previous = Some(previous);
        self.len -= self.spans[index].len;
        self.bump_revision();
        next
    }

    /// Iterate over the indices of the linked, non-sentinel spans.
    pub fn iter_spans(&self) -> impl Iterator<Item = SpanIndex> + '_ {
        std::iter::successors(Some(self.next(HEAD)), |&i| Some(self.next(i)))
            .take_while(|&i| i != TAIL)
    }

    /// Check whether a span is reachable from the head sentinel.
    #[must_use]
    pub fn is_linked(&self, index: SpanIndex) -> bool {
        index == HEAD || index == TAIL || self.iter_spans().any(|i| i == index)
    }

    /// Sum of span lengths along the chain; equals [`len`](Self::len).
    #[must_use]
    pub fn checked_length(&self) -> usize {
        self.iter_spans().map(|i| self.span_len(i)).sum()
    }

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for index in self.iter_spans() {
            out.push_str(self.span_text(index));
        }
        out
    }

    /// Text of the half-open range `[from, to)`.
    ///
    /// If `to` does not follow `from` on the chain, the text runs to the end.
    #[must_use]
    pub fn text_between(&self, from: Position, to: Position) -> String {
        let from = self.normalize(from);
        let to = self.normalize(to);
        let mut out = String::new();
        let mut span = from.span;
        let mut start = from.offset;
        while span != TAIL {
            let text = self.span_text(span);
            if span == to.span && to.offset >= start {
                out.push_str(text.get(start..to.offset).unwrap_or(""));
                break;
            }
            out.push_str(text.get(start..).unwrap_or(""));
            span = self.next(span);
            start = 0;
        }
        out
    }

    /// Canonical form of a position: offset strictly inside its span, or the
    /// end position.
    #[must_use]
    pub fn normalize(&self, pos: Position) -> Position {
        if pos.span >= self.spans.len() {
            return Position::end();
        }
        let mut span = pos.span;
        let mut offset = pos.offset;
        if span == HEAD {
            span = self.next(HEAD);
            offset = 0;
        }
        while span != TAIL && offset >= self.span_len(span) {
            offset -= self.span_len(span);
            span = self.next(span);
        }
        if span == TAIL {
            offset = 0;
        }
        Position {
            span,
            offset,
            state: pos.state,
        }
    }

    /// Move a position forward by `bytes`, stopping at the end of text.
    #[must_use]
    pub fn advance(&self, pos: Position, bytes: usize) -> Position {
        self.normalize(Position {
            offset: pos.offset + bytes,
            ..pos
        })
    }

    /// Bytes from `from` to `to`, if `to` is reached before passing `limit`.
    ///
    /// `to == limit` counts as reached.
    #[must_use]
    pub fn distance_bounded(&self, from: Position, to: Position, limit: Position) -> Option<usize> {
        let mut span = from.span;
        let mut low = from.offset;
        let mut acc = 0;
        loop {
            if to.span == span && to.offset >= low {
                if limit.span == span && limit.offset >= low && limit.offset < to.offset {
                    return None;
                }
                return Some(acc + to.offset - low);
            }
            if span == TAIL || (limit.span == span && limit.offset >= low) {
                return None;
            }
            acc += self.span_len(span).saturating_sub(low);
            span = self.next(span);
            low = 0;
        }
    }

    /// Bytes from `from` to `to`, or `None` if `to` does not follow `from`.
    #[must_use]
    pub fn distance(&self, from: Position, to: Position) -> Option<usize> {
        self.distance_bounded(self.normalize(from), self.normalize(to), Position::end())
    }

    /// Byte offset of a position from the start of text.
    #[must_use]
    pub fn offset_of(&self, pos: Position) -> usize {
        let pos = self.normalize(pos);
        let found = self.distance(self.first(), pos);
        debug_assert!(found.is_some(), "position {pos:?} is not on the chain");
        found.unwrap_or(self.len)
    }

    /// Position of a byte offset, clamped to the text and snapped down to a
    /// char boundary.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let mut remaining = offset.min(self.len);
        for index in self.iter_spans() {
            let text = self.span_text(index);
            if remaining < text.len() {
                while !text.is_char_boundary(remaining) {
                    remaining -= 1;
                }
                return Position::new(index, remaining);
            }
            remaining -= text.len();
        }
        Position::end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(chain: &PieceChain) {
        assert_eq!(chain.checked_length(), chain.len());
        let mut index = HEAD;
        while index != TAIL {
            let next = chain.next(index);
            assert_eq!(chain.prev(next), index, "broken back link at {next}");
            index = next;
        }
    }

    #[test]
    fn test_new_chain() {
        let chain = PieceChain::new("hello");
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.text(), "hello");
        assert_eq!(chain.arena_len(), 3);
        assert_consistent(&chain);

        let empty = PieceChain::new("");
        assert!(empty.is_empty());
        assert_eq!(empty.first(), Position::end());
        assert_eq!(empty.arena_len(), 2);
    }

    #[test]
    fn test_insert_span() {
        let mut chain = PieceChain::new("world");
        let first = chain.next(HEAD);
        let index = chain.insert_span("hello ", first);
        assert_eq!(chain.text(), "hello world");
        assert_eq!(chain.next(index), first);
        let tail = chain.insert_span("!", TAIL);
        assert_eq!(chain.text(), "hello world!");
        assert_eq!(chain.next(tail), TAIL);
        assert_consistent(&chain);
    }

    #[test]
    fn test_insert_span_invalid() {
        let mut chain = PieceChain::new("abc");
        assert_eq!(chain.insert_span("x", HEAD), HEAD);
        assert_eq!(chain.insert_span("x", 99), 99);
        assert_eq!(chain.insert_span("", TAIL), TAIL);
        assert_eq!(chain.text(), "abc");
    }

    #[test]
    fn test_split_span() {
        let mut chain = PieceChain::new("abcdef");
        let first = chain.next(HEAD);
        let trailing = chain.split_span(first, 2);
        assert_ne!(trailing, first);
        assert_eq!(chain.span_text(first), "ab");
        assert_eq!(chain.span_text(trailing), "cdef");
        assert_eq!(chain.text(), "abcdef");
        assert_eq!(chain.len(), 6);
        assert_consistent(&chain);
    }

    #[test]
    fn test_split_span_noop_cases() {
        let mut chain = PieceChain::new("héllo");
        let first = chain.next(HEAD);
        assert_eq!(chain.split_span(first, 0), first);
        assert_eq!(chain.split_span(first, 6), first);
        assert_eq!(chain.split_span(first, 2), first); // inside 'é'
        assert_eq!(chain.split_span(HEAD, 1), HEAD);
        assert_eq!(chain.split_span(TAIL, 1), TAIL);
        assert_eq!(chain.split_span(42, 1), 42);
        assert_eq!(chain.arena_len(), 3);
    }

    #[test]
    fn test_delete_span() {
        let mut chain = PieceChain::new("abcdef");
        let first = chain.next(HEAD);
        let trailing = chain.split_span(first, 3);
        assert_eq!(chain.delete_span(first), trailing);
        assert_eq!(chain.text(), "def");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.delete_span(HEAD), HEAD);
        assert_eq!(chain.delete_span(TAIL), TAIL);
        assert_eq!(chain.delete_span(77), 77);
        assert!(!chain.is_linked(first));
        assert_consistent(&chain);
    }

    #[test]
    fn test_positions() {
        let mut chain = PieceChain::new("abc");
        let first = chain.next(HEAD);
        let second = chain.insert_span("de", TAIL);
        assert_eq!(chain.normalize(Position::new(first, 3)), Position::new(second, 0));
        assert_eq!(chain.normalize(Position::new(second, 2)), Position::end());
        assert_eq!(chain.advance(Position::new(first, 1), 3), Position::new(second, 1));
        assert_eq!(chain.offset_of(Position::new(second, 1)), 4);
        assert_eq!(chain.offset_of(Position::end()), 5);
        assert_eq!(chain.position_at(4), Position::new(second, 1));
        assert_eq!(chain.position_at(100), Position::end());
    }

    #[test]
    fn test_position_at_snaps_to_char_boundary() {
        let chain = PieceChain::new("aé");
        let first = chain.next(HEAD);
        assert_eq!(chain.position_at(2), Position::new(first, 1));
    }

    #[test]
    fn test_position_equality_ignores_state() {
        let a = Position::new(3, 1);
        let b = a.with_state(ClusterClass::Word);
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_between_and_distance() {
        let mut chain = PieceChain::new("hello");
        chain.insert_span(" world", TAIL);
        let from = chain.position_at(3);
        let to = chain.position_at(8);
        assert_eq!(chain.text_between(from, to), "lo wo");
        assert_eq!(chain.distance(from, to), Some(5));
        assert_eq!(chain.distance(to, from), None);
        assert_eq!(chain.text_between(from, Position::end()), "lo world");
        assert_eq!(chain.distance_bounded(from, to, chain.position_at(6)), None);
        assert_eq!(chain.distance_bounded(from, to, to), Some(5));
    }
}
