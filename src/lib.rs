//! bookshelf - An in-memory books catalog served over a JSON REST API

pub mod books;
pub mod cli;
pub mod http_server;
pub mod observability;

/// Crate version, reported by `/` and `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
