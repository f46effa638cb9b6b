//! Grapheme cluster classification and line-break opportunities.
//!
//! Segmentation itself comes from `unicode-segmentation`; this module decides
//! what a cluster means to the editor: a hard line break, part of a word,
//! whitespace, and where a soft wrap may happen between two clusters.

use unicode_segmentation::UnicodeSegmentation;

/// Upper bound, in bytes, on the look-ahead used to find one cluster.
///
/// Longer clusters (hundreds of stacked combining marks) are split at this
/// bound rather than buffered whole.
pub const MAX_CLUSTER_BYTES: usize = 64;

/// Class of a grapheme cluster.
///
/// Positions carry the class of the cluster that precedes them so that a
/// forward scan can resume mid-text with the right word context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClusterClass {
    /// Nothing precedes (start of text).
    #[default]
    Start,
    /// Alphanumeric or underscore.
    Word,
    /// Whitespace other than a hard line break.
    Space,
    /// Hard line break.
    Newline,
    /// Anything else (punctuation, symbols).
    Other,
}

impl ClusterClass {
    /// Classify a cluster by its first char.
    #[must_use]
    pub fn of(cluster: &str) -> Self {
        match cluster.chars().next() {
            None => Self::Start,
            Some(_) if is_hard_break(cluster) => Self::Newline,
            Some(c) if c.is_alphanumeric() || c == '_' => Self::Word,
            Some(c) if c.is_whitespace() => Self::Space,
            Some(_) => Self::Other,
        }
    }

    /// Check if this class is part of a word.
    #[must_use]
    pub fn is_word(self) -> bool {
        self == Self::Word
    }
}

/// Check if a cluster is a mandatory line break.
///
/// Covers LF, CR LF, lone CR, VT, FF, NEL, LINE SEPARATOR and PARAGRAPH
/// SEPARATOR.
#[must_use]
pub fn is_hard_break(cluster: &str) -> bool {
    matches!(
        cluster,
        "\n" | "\r\n" | "\r" | "\u{0B}" | "\u{0C}" | "\u{85}" | "\u{2028}" | "\u{2029}"
    )
}

/// Check if a cluster is a word character cluster.
#[must_use]
pub fn is_word_cluster(cluster: &str) -> bool {
    ClusterClass::of(cluster).is_word()
}

fn is_hyphen(c: char) -> bool {
    matches!(c, '-' | '\u{2010}' | '\u{2013}' | '\u{2014}')
}

/// Ideographic scripts that may wrap between any two characters.
fn is_ideographic(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF01..=0xFF60
        | 0x20000..=0x3FFFD
    )
}

/// Check whether a soft wrap may occur between `before` and `after`.
///
/// A simplified line-break rule set: break after whitespace when the next
/// cluster is not whitespace, after a hyphen that is followed by a word
/// character, and on either side of an ideograph. Hard breaks are reported
/// separately and never count here.
#[must_use]
pub fn can_break_between(before: &str, after: &str) -> bool {
    let (Some(b), Some(a)) = (before.chars().next(), after.chars().next()) else {
        return false;
    };
    if is_hard_break(before) || is_hard_break(after) {
        return false;
    }
    if b.is_whitespace() {
        return !a.is_whitespace();
    }
    if a.is_whitespace() {
        return false;
    }
    if is_hyphen(b) {
        return a.is_alphanumeric();
    }
    is_ideographic(b) || is_ideographic(a)
}

/// Iterate over the extended grapheme clusters of a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_breaks() {
        for brk in ["\n", "\r\n", "\r", "\u{0B}", "\u{0C}", "\u{85}", "\u{2028}", "\u{2029}"] {
            assert!(is_hard_break(brk), "{brk:?}");
        }
        assert!(!is_hard_break(" "));
        assert!(!is_hard_break("\t"));
        assert!(!is_hard_break("\n\n"));
    }

    #[test]
    fn test_crlf_is_one_cluster() {
        let clusters: Vec<_> = graphemes("a\r\nb").collect();
        assert_eq!(clusters, vec!["a", "\r\n", "b"]);
    }

    #[test]
    fn test_classes() {
        assert_eq!(ClusterClass::of("a"), ClusterClass::Word);
        assert_eq!(ClusterClass::of("_"), ClusterClass::Word);
        assert_eq!(ClusterClass::of("7"), ClusterClass::Word);
        assert_eq!(ClusterClass::of("é"), ClusterClass::Word);
        assert_eq!(ClusterClass::of(" "), ClusterClass::Space);
        assert_eq!(ClusterClass::of("\t"), ClusterClass::Space);
        assert_eq!(ClusterClass::of("\n"), ClusterClass::Newline);
        assert_eq!(ClusterClass::of("."), ClusterClass::Other);
        assert_eq!(ClusterClass::of(""), ClusterClass::Start);
        assert!(is_word_cluster("x"));
        assert!(!is_word_cluster("-"));
    }

    #[test]
    fn test_break_opportunities() {
        assert!(can_break_between(" ", "b"));
        assert!(!can_break_between(" ", " "));
        assert!(!can_break_between("a", " "));
        assert!(!can_break_between("a", "b"));
        assert!(can_break_between("-", "b"));
        assert!(!can_break_between("-", "."));
        assert!(can_break_between("中", "文"));
        assert!(can_break_between("a", "中"));
        assert!(!can_break_between("\n", "a"));
        assert!(!can_break_between("a", ""));
    }
}
