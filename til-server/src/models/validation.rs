//! Validation error types

use std::fmt;

/// Validation error for request payloads and path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field was not supplied at all
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Value doesn't have the expected shape (e.g. not a UUID)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason } => write!(f, "malformed request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap a required text field, rejecting absent and blank values.
///
/// The value is kept as sent; only whitespace-only input counts as empty.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(v) if v.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Missing { field: "short" };
        assert_eq!(err.to_string(), "short is required");

        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "invalid UUID format",
        };
        assert_eq!(err.to_string(), "id: invalid UUID format");
    }

    #[test]
    fn required_text_rules() {
        assert_eq!(
            required_text("name", Some("Alice".into())),
            Ok("Alice".to_string())
        );
        assert_eq!(
            required_text("name", None),
            Err(ValidationError::Missing { field: "name" })
        );
        assert_eq!(
            required_text("name", Some("   ".into())),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn required_text_keeps_inner_whitespace() {
        let long = required_text("long", Some("Oh My God".into())).unwrap();
        assert_eq!(long, "Oh My God");
    }
}
