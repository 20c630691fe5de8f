//! # Book Model
//!
//! The stored record plus the request shapes used to create and patch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned by the store and never changed
    pub id: String,

    /// Trimmed, non-empty title
    pub title: String,

    /// Trimmed, non-empty author
    pub author: String,

    /// Publication year
    pub year: Option<i32>,

    pub genre: Option<String>,

    /// When the book entered the store
    pub created_at: DateTime<Utc>,

    /// Last successful update, absent until the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Build a fresh record from an already validated request
    pub fn from_new(new: NewBook) -> Self {
        Self {
            id: generate_id(),
            title: new.title.unwrap_or_default().trim().to_string(),
            author: new.author.unwrap_or_default().trim().to_string(),
            year: new.year,
            genre: new.genre,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Apply an already validated patch, leaving unsupplied fields alone
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(author) = patch.author {
            self.author = author.trim().to_string();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }

        // Timestamps are strictly increasing per record even when the
        // clock has not moved since the previous write.
        let last = self.updated_at.unwrap_or(self.created_at);
        let now = Utc::now();
        self.updated_at = Some(if now > last {
            now
        } else {
            last + chrono::Duration::microseconds(1)
        });
    }
}

/// Generate a fresh opaque book id
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Body of a create request
///
/// `title` and `author` are optional at the decode level so that a
/// missing field is reported as a validation message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

/// Body of an update request
///
/// For `year` and `genre` the outer option is presence and the inner
/// option is the value, so `null` clears the field while an absent key
/// leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Option<String>>,
}

impl BookPatch {
    /// True when no recognised field was supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none() && self.genre.is_none()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = Some(year);
        self
    }

    pub fn genre(mut self, genre: Option<String>) -> Self {
        self.genre = Some(genre);
        self
    }
}

/// Marks a key as present, whether its value is `null` or not
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_new_trims_and_assigns_id() {
        let book = Book::from_new(NewBook::new("  Dune ", " Frank Herbert").year(1965));
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, Some(1965));
        assert_eq!(book.genre, None);
        assert!(!book.id.is_empty());
        assert!(book.updated_at.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let book = Book::from_new(NewBook::new("Dune", "Frank Herbert"));
        let value = serde_json::to_value(&book).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_none());
        assert_eq!(value["year"], serde_json::Value::Null);
        assert_eq!(value["genre"], serde_json::Value::Null);
    }

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: BookPatch = serde_json::from_value(json!({"year": null})).unwrap();
        assert_eq!(patch.year, Some(None));
        assert_eq!(patch.genre, None);
        assert!(!patch.is_empty());

        let patch: BookPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch: BookPatch = serde_json::from_value(json!({"isbn": "123"})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut book = Book::from_new(NewBook::new("Dune", "Frank Herbert").genre("SF"));
        book.apply(BookPatch::default().year(Some(0)));

        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.genre.as_deref(), Some("SF"));
        assert_eq!(book.year, Some(0));
        assert!(book.updated_at.unwrap() > book.created_at);
    }

    #[test]
    fn test_apply_advances_updated_at() {
        let mut book = Book::from_new(NewBook::new("Dune", "Frank Herbert"));
        book.apply(BookPatch::default().title("Dune Messiah"));
        let first = book.updated_at.unwrap();
        book.apply(BookPatch::default().genre(None));
        assert!(book.updated_at.unwrap() > first);
    }
}
