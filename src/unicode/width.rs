//! Display width calculation for terminal rendering.
//!
//! The width method is a per-text-area setting carried by the configuration;
//! there is no process-wide default to mutate.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::grapheme::is_hard_break;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the display width of a string in terminal columns using a specific method.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Get the display width of a character in terminal columns using a specific method.
#[must_use]
pub fn display_width_char_with_method(c: char, method: WidthMethod) -> usize {
    if c.is_control() {
        return 0;
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Width of one grapheme cluster as laid out in a text area.
///
/// Hard line breaks and other control clusters take no columns; a tab takes
/// `tab_size` columns.
#[must_use]
pub fn cluster_width(cluster: &str, tab_size: usize, method: WidthMethod) -> usize {
    if cluster == "\t" {
        return tab_size;
    }
    match cluster.chars().next() {
        None => 0,
        Some(_) if is_hard_break(cluster) => 0,
        Some(c) if c.is_control() => 0,
        // Clamp at 2: ZWJ sequences report the sum of their parts.
        Some(_) => display_width_with_method(cluster, method).min(2),
    }
}
