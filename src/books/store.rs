//! # Book Store
//!
//! The insertion-ordered book collection behind the REST API.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Serialize;

use super::errors::{BookError, BookResult};
use super::filter::BookFilter;
use super::model::{generate_id, Book, BookPatch, NewBook};
use super::validation::{validate_new_book, validate_patch};

/// Aggregate figures over the whole catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_books: usize,
    pub unique_authors: usize,
    pub unique_genres: usize,
}

/// Book store trait
///
/// Abstracts the collection so the HTTP layer can be handed any backing store.
pub trait BookStore: Send + Sync {
    /// List books matching `filter`, in insertion order
    fn list(&self, filter: &BookFilter) -> BookResult<Vec<Book>>;

    /// Get a single book by id
    fn get(&self, id: &str) -> BookResult<Book>;

    /// Validate and append a new book
    fn create(&self, new: NewBook) -> BookResult<Book>;

    /// Merge the supplied fields into an existing book
    fn update(&self, id: &str, patch: BookPatch) -> BookResult<Book>;

    /// Remove a book, returning it
    fn delete(&self, id: &str) -> BookResult<Book>;

    /// Remove every book, returning how many there were
    fn delete_all(&self) -> BookResult<usize>;

    /// Number of books currently held
    fn len(&self) -> BookResult<usize>;

    fn is_empty(&self) -> BookResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Catalog statistics
    fn stats(&self) -> BookResult<CatalogStats>;
}

/// In-memory book store
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo catalog
    pub fn with_seed_catalog() -> Self {
        Self::with_books(seed_catalog())
    }

    /// Store preloaded with the given books, kept in order
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    fn read(&self) -> BookResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books
            .read()
            .map_err(|_| BookError::Internal("Book store lock poisoned".to_string()))
    }

    fn write(&self) -> BookResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books
            .write()
            .map_err(|_| BookError::Internal("Book store lock poisoned".to_string()))
    }
}

impl BookStore for InMemoryBookStore {
    fn list(&self, filter: &BookFilter) -> BookResult<Vec<Book>> {
        let books = self.read()?;
        let result = filter.apply(books.iter());
        tracing::debug!(total = books.len(), matched = result.len(), ?filter, "listed books");
        Ok(result)
    }

    fn get(&self, id: &str) -> BookResult<Book> {
        let books = self.read()?;
        books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    fn create(&self, new: NewBook) -> BookResult<Book> {
        validate_new_book(&new)?;

        let mut books = self.write()?;
        let mut book = Book::from_new(new);
        while books.iter().any(|b| b.id == book.id) {
            book.id = generate_id();
        }

        books.push(book.clone());
        tracing::info!(id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    fn update(&self, id: &str, patch: BookPatch) -> BookResult<Book> {
        let mut books = self.write()?;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        validate_patch(&patch)?;
        book.apply(patch);

        tracing::info!(id = %book.id, "book updated");
        Ok(book.clone())
    }

    fn delete(&self, id: &str) -> BookResult<Book> {
        let mut books = self.write()?;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        let removed = books.remove(index);
        tracing::info!(id = %removed.id, "book deleted");
        Ok(removed)
    }

    fn delete_all(&self) -> BookResult<usize> {
        let mut books = self.write()?;
        let count = books.len();
        books.clear();
        tracing::info!(count, "all books deleted");
        Ok(count)
    }

    fn len(&self) -> BookResult<usize> {
        Ok(self.read()?.len())
    }

    fn stats(&self) -> BookResult<CatalogStats> {
        let books = self.read()?;
        let authors: HashSet<&str> = books.iter().map(|b| b.author.as_str()).collect();
        let genres: HashSet<&str> = books
            .iter()
            .filter_map(|b| b.genre.as_deref())
            .filter(|g| !g.is_empty())
            .collect();

        Ok(CatalogStats {
            total_books: books.len(),
            unique_authors: authors.len(),
            unique_genres: genres.len(),
        })
    }
}

/// The three demo books a fresh server starts with
pub fn seed_catalog() -> Vec<Book> {
    let now = Utc::now();
    [
        ("1", "The Great Gatsby", "F. Scott Fitzgerald", 1925, "Fiction"),
        ("2", "To Kill a Mockingbird", "Harper Lee", 1960, "Fiction"),
        ("3", "1984", "George Orwell", 1949, "Dystopian"),
    ]
    .into_iter()
    .map(|(id, title, author, year, genre)| Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        year: Some(year),
        genre: Some(genre.to_string()),
        created_at: now,
        updated_at: None,
    })
    .collect()
}
