//! Cluster-by-cluster iteration over the piece chain.
//!
//! Grapheme clusters may straddle span boundaries, so the stepper keeps a
//! small look-ahead buffer filled from consecutive spans and segments that
//! buffer.
//! The look-ahead always covers the current cluster and the one after it,
//! which is what the boundary flags need.

use bitflags::bitflags;

use crate::unicode::{
    ClusterClass, MAX_CLUSTER_BYTES, WidthMethod, can_break_between, cluster_width, graphemes,
    is_hard_break,
};

use super::chain::{PieceChain, Position, TAIL};

const LOOKAHEAD_BYTES: usize = 2 * MAX_CLUSTER_BYTES;

bitflags! {
    /// Break opportunities after a cluster.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Boundaries: u8 {
        /// The cluster is a hard line break.
        const LINE_MUST = 0b001;
        /// A soft wrap may occur after the cluster.
        const LINE_CAN  = 0b010;
        /// The next cluster starts or ends a word (or there is none).
        const WORD      = 0b100;
    }
}

/// Settings that affect cluster widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOptions {
    pub tab_size: usize,
    pub width_method: WidthMethod,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            width_method: WidthMethod::default(),
        }
    }
}

/// One cluster produced by the [`Stepper`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub cluster: String,
    pub class: ClusterClass,
    /// Display width in columns.
    pub width: usize,
    pub boundaries: Boundaries,
    /// Position of the cluster's first byte.
    pub start: Position,
    /// Position just past the cluster.
    pub end: Position,
}

/// Iterator over the clusters of a chain from a given position.
#[derive(Debug)]
pub struct Stepper<'a> {
    chain: &'a PieceChain,
    opts: StepOptions,
    pending: String,
    // Next chain byte not yet copied into `pending`.
    fill: Position,
    // Chain position of the first byte of `pending`.
    pos: Position,
}

impl<'a> Stepper<'a> {
    /// Start stepping at `pos`.
    #[must_use]
    pub fn new(chain: &'a PieceChain, pos: Position, opts: StepOptions) -> Self {
        let pos = chain.normalize(pos);
        Self {
            chain,
            opts,
            pending: String::with_capacity(LOOKAHEAD_BYTES + 4),
            fill: pos,
            pos,
        }
    }

    /// Position of the next cluster.
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    fn refill(&mut self) {
        while self.pending.len() < LOOKAHEAD_BYTES && self.fill.span != TAIL {
            let text = self.chain.span_text(self.fill.span);
            let Some(rest) = text.get(self.fill.offset..) else {
                crate::event::emit_log(
                    crate::event::LogLevel::Error,
                    &format!("stepper: {:?} is not on a char boundary", self.fill),
                );
                self.fill = Position::end();
                break;
            };
            let mut take = rest.len().min(LOOKAHEAD_BYTES - self.pending.len());
            while !rest.is_char_boundary(take) {
                take += 1;
            }
            self.pending.push_str(&rest[..take]);
            self.fill = self.chain.advance(self.fill, take);
        }
    }
}

impl Iterator for Stepper<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.refill();
        // Owned, so the segmenter's borrow of `pending` ends before the drain.
        let (cluster, next) = {
            let mut clusters = graphemes(&self.pending);
            let cluster = clusters.next()?.to_owned();
            (cluster, clusters.next().map(str::to_owned))
        };

        let class = ClusterClass::of(&cluster);
        let mut boundaries = Boundaries::empty();
        if is_hard_break(&cluster) {
            boundaries |= Boundaries::LINE_MUST;
        }
        match next.as_deref() {
            Some(next) => {
                if can_break_between(&cluster, next) {
                    boundaries |= Boundaries::LINE_CAN;
                }
                if class.is_word() != ClusterClass::of(next).is_word() {
                    boundaries |= Boundaries::WORD;
                }
            }
            None => boundaries |= Boundaries::WORD,
        }

        let width = cluster_width(&cluster, self.opts.tab_size, self.opts.width_method);
        self.pending.drain(..cluster.len());
        let start = self.pos;
        self.pos = self
            .chain
            .advance(self.pos, cluster.len())
            .with_state(class);
        Some(Step {
            cluster,
            class,
            width,
            boundaries,
            start,
            end: self.pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::chain::HEAD;

    fn clusters(chain: &PieceChain) -> Vec<String> {
        Stepper::new(chain, chain.first(), StepOptions::default())
            .map(|s| s.cluster)
            .collect()
    }

    #[test]
    fn test_steps_ascii() {
        let chain = PieceChain::new("ab c");
        let steps: Vec<_> = Stepper::new(&chain, chain.first(), StepOptions::default()).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].cluster, "a");
        assert_eq!(steps[0].width, 1);
        assert_eq!(steps[0].start, chain.first());
        assert_eq!(steps[3].end, Position::end());
        assert!(steps[1].boundaries.contains(Boundaries::WORD));
        assert!(!steps[0].boundaries.contains(Boundaries::WORD));
        assert!(steps[2].boundaries.contains(Boundaries::LINE_CAN));
        assert_eq!(steps[3].start.state, ClusterClass::Space);
    }

    #[test]
    fn test_cluster_across_spans() {
        // "e" and the combining accent live in different spans.
        let mut chain = PieceChain::new("e");
        chain.insert_span("\u{301}x", crate::text::chain::TAIL);
        let got = clusters(&chain);
        assert_eq!(got, vec!["e\u{301}".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_crlf_across_spans() {
        let mut chain = PieceChain::new("a\r");
        chain.insert_span("\nb", crate::text::chain::TAIL);
        let steps: Vec<_> = Stepper::new(&chain, chain.first(), StepOptions::default()).collect();
        assert_eq!(steps[1].cluster, "\r\n");
        assert_eq!(steps[1].width, 0);
        assert!(steps[1].boundaries.contains(Boundaries::LINE_MUST));
        assert_eq!(steps[2].start.state, ClusterClass::Newline);
    }

    #[test]
    fn test_boundaries_see_next_span() {
        let mut chain = PieceChain::new("ab");
        chain.insert_span("-c", crate::text::chain::TAIL);
        let steps: Vec<_> = Stepper::new(&chain, chain.first(), StepOptions::default()).collect();
        let flags: Vec<_> = steps.iter().map(|s| s.boundaries).collect();
        assert_eq!(
            flags,
            vec![
                Boundaries::empty(),
                Boundaries::WORD,
                Boundaries::LINE_CAN | Boundaries::WORD,
                Boundaries::WORD,
            ]
        );
    }

    #[test]
    fn test_widths() {
        let chain = PieceChain::new("中\tx");
        let opts = StepOptions {
            tab_size: 3,
            ..StepOptions::default()
        };
        let widths: Vec<_> = Stepper::new(&chain, chain.first(), opts)
            .map(|s| s.width)
            .collect();
        assert_eq!(widths, vec![2, 3, 1]);
    }

    #[test]
    fn test_long_text_is_fully_stepped() {
        let text = "word ".repeat(200);
        let chain = PieceChain::new(&text);
        assert_eq!(clusters(&chain).concat(), text);
    }

    #[test]
    fn test_empty_chain_yields_nothing() {
        let chain = PieceChain::new("");
        assert!(Stepper::new(&chain, chain.first(), StepOptions::default())
            .next()
            .is_none());
        assert_eq!(chain.next(HEAD), crate::text::chain::TAIL);
    }
}
