//! Cell styles for the text area.
//!
//! The text area paints with three styles taken from its configuration:
//! plain text, selected text and the placeholder. A [`Style`] is a plain
//! value, copied into every cell it paints.
//!
//! ```
//! use opentui_textarea::{Rgba, Style, TextAttributes};
//!
//! let selected = Style::builder()
//!     .fg(Rgba::BLACK)
//!     .bg(Rgba::from_hex("#FFD700").unwrap())
//!     .bold()
//!     .build();
//! assert!(selected.attributes.contains(TextAttributes::BOLD));
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Attributes a host may map onto SGR codes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        const BOLD          = 0x01;
        const DIM           = 0x02;
        const ITALIC        = 0x04;
        const UNDERLINE     = 0x08;
        /// Swapped foreground and background; the default selection look.
        const INVERSE       = 0x20;
        const STRIKETHROUGH = 0x80;
    }
}

/// Colors plus attributes. A `None` color leaves the host's default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Option<Rgba>,
    pub bg: Option<Rgba>,
    pub attributes: TextAttributes,
}

impl Style {
    /// Host defaults, no attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    #[must_use]
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self {
            fg: Some(color),
            ..Self::NONE
        }
    }

    /// Swapped colors, used for selections when nothing else is configured.
    #[must_use]
    pub const fn inverse() -> Self {
        Self {
            attributes: TextAttributes::INVERSE,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn with_bg(self, color: Rgba) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }
}

/// Fluent construction of a [`Style`].
#[derive(Clone, Debug, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    #[must_use]
    pub fn fg(mut self, color: Rgba) -> Self {
        self.style.fg = Some(color);
        self
    }

    #[must_use]
    pub fn bg(mut self, color: Rgba) -> Self {
        self.style.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.style.attributes |= TextAttributes::BOLD;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.style.attributes |= TextAttributes::UNDERLINE;
        self
    }

    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_attributes() {
        let style = Style::builder()
            .fg(Rgba::RED)
            .bg(Rgba::BLACK)
            .bold()
            .underline()
            .build();
        assert_eq!(style.fg, Some(Rgba::RED));
        assert_eq!(style.bg, Some(Rgba::BLACK));
        assert_eq!(
            style.attributes,
            TextAttributes::BOLD | TextAttributes::UNDERLINE
        );
    }

    #[test]
    fn test_with_bg_keeps_foreground() {
        let style = Style::fg(Rgba::WHITE).with_bg(Rgba::BLUE);
        assert_eq!(style.fg, Some(Rgba::WHITE));
        assert_eq!(style.bg, Some(Rgba::BLUE));
        assert!(style.attributes.is_empty());
    }

    #[test]
    fn test_default_selection_is_inverse() {
        assert_eq!(Style::inverse().attributes, TextAttributes::INVERSE);
        assert_eq!(Style::default(), Style::NONE);
    }
}
