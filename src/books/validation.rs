//! # Book Validation
//!
//! Required-field checks run before any mutation of the store.

use super::errors::{BookError, BookResult};
use super::model::{BookPatch, NewBook};

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

/// Validate a create request, reporting every failing field at once
pub fn validate_new_book(book: &NewBook) -> BookResult<()> {
    let mut errors = Vec::new();

    if is_blank(book.title.as_deref()) {
        errors.push("Title is required".to_string());
    }
    if is_blank(book.author.as_deref()) {
        errors.push("Author is required".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BookError::Validation(errors))
    }
}

/// Validate an update request
///
/// Title and author may be omitted, but when supplied they must not be blank.
pub fn validate_patch(patch: &BookPatch) -> BookResult<()> {
    if patch.is_empty() {
        return Err(BookError::NoUpdateFields);
    }

    let mut errors = Vec::new();

    if patch.title.is_some() && is_blank(patch.title.as_deref()) {
        errors.push("Title cannot be empty".to_string());
    }
    if patch.author.is_some() && is_blank(patch.author.as_deref()) {
        errors.push("Author cannot be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BookError::Validation(errors))
    }
}
