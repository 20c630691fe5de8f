//! # Book Catalog
//!
//! The book record, its validation rules, list filtering and the
//! in-memory store the HTTP layer is built on.

pub mod errors;
pub mod filter;
pub mod model;
pub mod store;
pub mod validation;

pub use errors::{BookError, BookResult};
pub use filter::BookFilter;
pub use model::{Book, BookPatch, NewBook};
pub use store::{BookStore, CatalogStats, InMemoryBookStore};
