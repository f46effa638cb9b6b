//! Unicode utilities for cluster classification and display width.

mod grapheme;
mod width;

pub use grapheme::{
    ClusterClass, MAX_CLUSTER_BYTES, can_break_between, graphemes, is_hard_break,
    is_word_cluster,
};
pub use width::{
    WidthMethod, cluster_width, display_width_char_with_method, display_width_with_method,
};
