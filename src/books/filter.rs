//! # Book Filters
//!
//! List filtering from query parameters. Filters compose with AND; `limit`
//! truncates after filtering.

use std::collections::HashMap;

use super::model::Book;

/// Parsed list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Lowercased author substring
    pub author: Option<String>,

    /// Lowercased genre substring
    pub genre: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl BookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = normalize(author);
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = normalize(genre);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build a filter from raw query parameters
    ///
    /// Blank `author`/`genre` values and a `limit` that is not a
    /// non-negative integer are ignored, as are unknown keys.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            author: params.get("author").and_then(|s| normalize(s)),
            genre: params.get("genre").and_then(|s| normalize(s)),
            limit: params.get("limit").and_then(|s| s.trim().parse::<usize>().ok()),
        }
    }

    /// Check a single book against the author and genre filters
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(author) = &self.author {
            if !book.author.to_lowercase().contains(author.as_str()) {
                return false;
            }
        }

        if let Some(genre) = &self.genre {
            match &book.genre {
                Some(g) if g.to_lowercase().contains(genre.as_str()) => {}
                _ => return false,
            }
        }

        true
    }

    /// Filter then truncate, preserving input order
    pub fn apply<'a, I>(&self, books: I) -> Vec<Book>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        books
            .into_iter()
            .filter(|b| self.matches(b))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

fn normalize(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}
