//! # Book Store Errors
//!
//! Error types for book catalog operations.

use thiserror::Error;

/// Result type for book store operations
pub type BookResult<T> = Result<T, BookError>;

/// Book catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// One or more required fields failed validation
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// An update carried none of the recognised fields
    #[error("No fields provided for update")]
    NoUpdateFields,

    /// No book with the given id
    #[error("No book found with ID: {0}")]
    NotFound(String),

    /// The store itself is unusable (e.g. a poisoned lock)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookError {
    /// Single-message validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        BookError::Validation(vec![message.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = BookError::Validation(vec![
            "Title is required".to_string(),
            "Author is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Title is required, Author is required"
        );
    }

    #[test]
    fn test_invalid_wraps_single_message() {
        assert_eq!(
            BookError::invalid("Title is required"),
            BookError::Validation(vec!["Title is required".to_string()])
        );
    }
}
