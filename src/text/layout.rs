//! Incremental line-start table.
//!
//! Row `i` of the text area spans from `starts[i]` to `starts[i + 1]` (the
//! last row runs to the end of text). The table is built lazily, only as far
//! as callers ask, and truncated when an edit invalidates the rows after it.

use super::chain::{PieceChain, Position};
use super::edit::Redirect;
use super::stepper::{Boundaries, StepOptions, Stepper};
use crate::unicode::ClusterClass;

/// How rows wrap at the viewport width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// No wrapping: rows end only at hard line breaks.
    None,
    /// Wrap before the cluster that would overflow.
    Char,
    /// Wrap at the last break opportunity, falling back to char wrap.
    #[default]
    Word,
}

/// Line-start table for one wrap width.
#[derive(Clone, Debug)]
pub struct Layout {
    starts: Vec<Position>,
    widest_line: usize,
    exhausted: bool,
    wrap: WrapMode,
    width: usize,
    opts: StepOptions,
}

impl Layout {
    /// Create an empty table.
    #[must_use]
    pub fn new(wrap: WrapMode, width: usize, opts: StepOptions) -> Self {
        Self {
            starts: Vec::new(),
            widest_line: 0,
            exhausted: false,
            wrap,
            width,
            opts,
        }
    }

    /// Wrap mode in effect.
    #[must_use]
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Wrap width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Step options used for widths.
    #[must_use]
    pub fn options(&self) -> StepOptions {
        self.opts
    }

    /// Change the wrap width. Returns true (and discards every row) if the
    /// width actually changed and affects wrapping.
    pub fn set_width(&mut self, width: usize) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        if self.wrap == WrapMode::None {
            return false;
        }
        self.truncate(0);
        true
    }

    /// Change the wrap mode, discarding every row.
    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
        self.truncate(0);
    }

    /// Change widths (tab size, width method), discarding every row.
    pub fn set_options(&mut self, opts: StepOptions) {
        self.opts = opts;
        self.truncate(0);
    }

    /// Keep only the first `rows` line starts.
    pub fn truncate(&mut self, rows: usize) {
        if rows < self.starts.len() || rows == 0 {
            self.starts.truncate(rows);
            self.exhausted = false;
        }
        if rows == 0 {
            self.widest_line = 0;
        }
    }

    /// Move line starts off a span that an edit unlinked.
    pub(crate) fn redirect(&mut self, redirect: Redirect) {
        for row in 0..self.starts.len() {
            let start = &mut self.starts[row];
            if start.span != redirect.from {
                continue;
            }
            if start.offset >= redirect.below {
                self.truncate(row);
                break;
            }
            start.span = redirect.to;
        }
    }

    /// Widest row seen so far, in columns.
    #[must_use]
    pub fn widest_line(&self) -> usize {
        self.widest_line
    }

    /// Check if the table reaches the end of text.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of rows computed so far.
    #[must_use]
    pub fn known_rows(&self) -> usize {
        self.starts.len()
    }

    /// Start of a computed row.
    #[must_use]
    pub fn row_start(&self, row: usize) -> Option<Position> {
        self.starts.get(row).copied()
    }

    /// End of a computed row: the next row's start, or the end of text for
    /// the last row.
    #[must_use]
    pub fn row_end(&self, row: usize) -> Position {
        self.starts.get(row + 1).copied().unwrap_or_else(Position::end)
    }

    /// Check if `row` is known to be the last row.
    #[must_use]
    pub fn is_last_row(&self, row: usize) -> bool {
        self.exhausted && row + 1 >= self.starts.len()
    }

    /// Extend the table until row `through_row` is bounded or the text ends.
    pub fn extend(&mut self, chain: &PieceChain, through_row: usize) {
        if self.starts.is_empty() {
            self.starts.push(chain.first().with_state(ClusterClass::Start));
            self.exhausted = false;
        }
        if self.exhausted || self.starts.len() > through_row.saturating_add(1) {
            return;
        }
        let width = self.width.max(1);
        let Some(&start) = self.starts.last() else {
            return;
        };

        let mut line_width = 0;
        let mut width_since_break = 0;
        let mut last_cluster_break: Option<Position> = None;
        let mut last_line_break: Option<Position> = None;
        let mut finished = true;

        for step in Stepper::new(chain, start, self.opts) {
            line_width += step.width;
            width_since_break += step.width;

            let overflow = self.wrap != WrapMode::None
                && step.width > 0
                && line_width > width
                && !(self.wrap == WrapMode::Word && step.class == ClusterClass::Space);
            if !overflow {
                if step.boundaries.contains(Boundaries::LINE_MUST) {
                    self.push_row(step.end, line_width);
                    line_width = 0;
                    width_since_break = 0;
                    last_cluster_break = None;
                    last_line_break = None;
                    if self.starts.len() > through_row.saturating_add(1) {
                        finished = false;
                        break;
                    }
                    continue;
                }
            } else {
                match (self.wrap, last_line_break) {
                    (WrapMode::Word, Some(brk)) => {
                        self.push_row(brk, line_width - width_since_break);
                        line_width = width_since_break;
                        // The carried word plus this cluster may still not fit.
                        let cluster_brk = last_cluster_break.filter(|&b| b != brk);
                        if let (true, Some(cluster_brk)) = (line_width > width, cluster_brk) {
                            self.push_row(cluster_brk, line_width - step.width);
                            line_width = step.width;
                        }
                    }
                    _ => {
                        if let Some(brk) = last_cluster_break {
                            self.push_row(brk, line_width - step.width);
                            line_width = step.width;
                        }
                    }
                }
                last_line_break = None;
            }

            if step.boundaries.contains(Boundaries::LINE_CAN) {
                last_line_break = Some(step.end);
                width_since_break = 0;
            }
            last_cluster_break = Some(step.end);

            if self.starts.len() > through_row.saturating_add(1) {
                finished = false;
                break;
            }
        }

        if finished {
            self.exhausted = true;
            self.widest_line = self.widest_line.max(line_width);
        }
    }

    /// Extend the table to the end of text.
    pub fn extend_all(&mut self, chain: &PieceChain) {
        self.extend(chain, usize::MAX);
    }

    fn push_row(&mut self, start: Position, previous_width: usize) {
        self.starts.push(start);
        self.widest_line = self.widest_line.max(previous_width);
    }
}
