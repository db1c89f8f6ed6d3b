//! Error types for the Autoanki core library.

use thiserror::Error;

use super::markup::ParseError;
use super::shape::ShapeError;

/// All errors that can occur within the Autoanki core library.
#[derive(Debug, Error)]
pub enum AutoankiError {
    /// The field text could not be parsed as delimited markup.
    #[error(
        "Field '{field_name}' is not well-formed markup: {reason}\n\
         Raw field text:\n{raw}"
    )]
    MalformedField {
        field_name: String,
        raw: String,
        reason: ParseError,
    },

    /// The field text parsed, but its tree does not match the Autoanki field layout.
    #[error(
        "Field '{field_name}' does not match the Autoanki field layout:\n{reason}\n\
         Raw field text:\n{raw}\n\
         Parsed tree:\n{tree}"
    )]
    InvalidFieldShape {
        field_name: String,
        raw: String,
        /// The parsed tree rendered as pretty JSON.
        tree: String,
        reason: ShapeError,
    },

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`AutoankiError`].
pub type Result<T> = std::result::Result<T, AutoankiError>;

impl AutoankiError {
    /// Returns `true` when the error means "this field cannot be trusted as
    /// an Autoanki field", whether it failed to parse or to validate.
    #[must_use]
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, Self::MalformedField { .. } | Self::InvalidFieldShape { .. })
    }

    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedField { field_name, .. } => {
                format!("Field '{field_name}' is corrupted and could not be read")
            }
            Self::InvalidFieldShape { field_name, .. } => {
                format!("Field '{field_name}' was modified outside Autoanki and no longer has the expected layout")
            }
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::ShapeViolation;

    fn shape_error() -> AutoankiError {
        AutoankiError::InvalidFieldShape {
            field_name: "Front".into(),
            raw: "<a></a>".into(),
            tree: "[]".into(),
            reason: ShapeError::new(vec![ShapeViolation::new("$", "expected 3 regions, found 1")]),
        }
    }

    #[test]
    fn test_invalid_field_covers_both_decode_failures() {
        let parse = AutoankiError::MalformedField {
            field_name: "Front".into(),
            raw: "<a".into(),
            reason: ParseError::new(1, 3, "unterminated tag"),
        };
        assert!(parse.is_invalid_field());
        assert!(shape_error().is_invalid_field());

        let io = AutoankiError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_invalid_field());
    }

    #[test]
    fn test_shape_error_message_is_multi_line_and_carries_diagnostics() {
        let msg = shape_error().to_string();
        assert!(msg.contains("Front"));
        assert!(msg.contains("expected 3 regions"));
        assert!(msg.contains("Raw field text:\n<a></a>"));
        assert!(msg.contains("Parsed tree:\n[]"));
        assert!(msg.lines().count() > 3);
    }

    #[test]
    fn test_user_message_names_field() {
        assert!(shape_error().user_message().contains("'Front'"));
    }
}
