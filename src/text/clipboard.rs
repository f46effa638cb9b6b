//! Clipboard seam for copy, cut and paste.

use crate::error::Result;

/// Where copied text goes and pasted text comes from.
///
/// Hosts with access to a system clipboard provide their own implementation
/// through [`TextArea::with_clipboard`](crate::TextArea::with_clipboard).
pub trait Clipboard: Send {
    /// Store `text`.
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Fetch the stored text.
    fn paste(&mut self) -> Result<String>;
}

/// Clipboard private to one text area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternalClipboard {
    contents: String,
}

impl InternalClipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for InternalClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        text.clone_into(&mut self.contents);
        Ok(())
    }

    fn paste(&mut self) -> Result<String> {
        Ok(self.contents.clone())
    }
}
