//! Error types for the text-area engine.
//!
//! Editing and navigation never fail: out-of-range input is clamped. Errors
//! only surface from configuration validation and clipboard back-ends.

use std::fmt;
use std::io;

/// Result type alias for fallible text-area operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for text-area operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from an external clipboard back-end.
    Io(io::Error),
    /// A configuration value is out of its valid range.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// A clipboard back-end refused a copy or paste.
    Clipboard(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid text area config `{field}`: {reason}")
            }
            Self::Clipboard(msg) => write!(f, "clipboard error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfig {
            field: "tab_size",
            reason: "must be at least 1".to_string(),
        };
        assert!(err.to_string().contains("`tab_size`"));
        assert!(err.to_string().contains("at least 1"));

        let err = Error::Clipboard("no display".to_string());
        assert_eq!(err.to_string(), "clipboard error: no display");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "xclip");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
