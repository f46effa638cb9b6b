//! Text-area configuration.
//!
//! # Examples
//!
//! ```
//! use opentui_textarea::{Style, TextAreaConfig, WrapMode};
//!
//! let config = TextAreaConfig::default()
//!     .with_wrap(WrapMode::Char)
//!     .with_max_length(280)
//!     .with_placeholder("What's happening?")
//!     .with_selected_style(Style::inverse());
//! assert!(config.validate().is_ok());
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::Style;
use crate::unicode::WidthMethod;

use super::layout::WrapMode;
use super::stepper::StepOptions;

/// Configuration for a [`TextArea`](crate::TextArea).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextAreaConfig {
    /// Text inserted by the Enter key. Must be non-empty.
    pub newline: String,
    /// Spaces inserted by the Tab key, and the width of a literal tab.
    pub tab_size: usize,
    /// Maximum text length in bytes (0 = unlimited).
    pub max_length: usize,
    /// Wrapping at the viewport width.
    pub wrap: WrapMode,
    /// How ambiguous-width characters are measured.
    pub width_method: WidthMethod,
    /// Text shown while the text area is empty.
    pub placeholder: String,
    /// Style of the placeholder text.
    pub placeholder_style: Style,
    /// Style of unselected text and empty cells.
    pub text_style: Style,
    /// Style of selected text.
    pub selected_style: Style,
    /// Ignore commands that change the text.
    pub read_only: bool,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            newline: "\n".to_string(),
            tab_size: 4,
            max_length: 0,
            wrap: WrapMode::Word,
            width_method: WidthMethod::WcWidth,
            placeholder: String::new(),
            placeholder_style: Style::fg(Rgba::GRAY),
            text_style: Style::NONE,
            selected_style: Style::inverse(),
            read_only: false,
        }
    }
}

impl TextAreaConfig {
    /// Set the text inserted by Enter.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Set the tab size.
    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set the maximum length in bytes (0 = unlimited).
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the wrap mode.
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the width method.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the placeholder style.
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Set the text style.
    #[must_use]
    pub fn with_text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// Set the selection style.
    #[must_use]
    pub fn with_selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    /// Make the text area read-only.
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.newline.is_empty() {
            return Err(Error::InvalidConfig {
                field: "newline",
                reason: "must not be empty".to_string(),
            });
        }
        if self.tab_size == 0 {
            return Err(Error::InvalidConfig {
                field: "tab_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn step_options(&self) -> StepOptions {
        StepOptions {
            tab_size: self.tab_size,
            width_method: self.width_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TextAreaConfig::default();
        assert_eq!(config.newline, "\n");
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.max_length, 0);
        assert_eq!(config.wrap, WrapMode::Word);
        assert!(!config.read_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_newline() {
        let err = TextAreaConfig::default()
            .with_newline("")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "newline", .. }));
    }

    #[test]
    fn test_validate_rejects_zero_tab_size() {
        let err = TextAreaConfig::default()
            .with_tab_size(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "tab_size", .. }));
    }

    #[test]
    fn test_builders() {
        let config = TextAreaConfig::default()
            .with_newline("\r\n")
            .with_width_method(WidthMethod::Unicode)
            .with_read_only(true);
        assert_eq!(config.newline, "\r\n");
        assert_eq!(config.step_options().width_method, WidthMethod::Unicode);
        assert!(config.read_only);
    }
}
