//! Two-buffer backing store for the piece chain.
//!
//! The initial text is never modified. Every inserted string is appended to
//! the edit buffer and never removed, so any span ever created stays
//! resolvable; this is what lets undo restore old spans without copying text.

/// Which buffer a span reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The text the chain was created with.
    Initial,
    /// The append-only edit buffer.
    Edit,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct BufferStore {
    initial: String,
    edits: String,
}

impl BufferStore {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            initial: initial.to_owned(),
            edits: String::new(),
        }
    }

    /// Append to the edit buffer, returning the offset the text starts at.
    pub(crate) fn append(&mut self, text: &str) -> usize {
        let offset = self.edits.len();
        self.edits.push_str(text);
        offset
    }

    /// Length of the edit buffer.
    pub(crate) fn edits_len(&self) -> usize {
        self.edits.len()
    }

    /// Text of `len` bytes at `offset` in `source`.
    ///
    /// Out-of-range requests yield an empty string.
    pub(crate) fn slice(&self, source: Source, offset: usize, len: usize) -> &str {
        let buf = match source {
            Source::Initial => &self.initial,
            Source::Edit => &self.edits,
        };
        offset
            .checked_add(len)
            .and_then(|end| buf.get(offset..end))
            .unwrap_or("")
    }
}
