//! # Books HTTP Server Module
//!
//! This module exposes the book store over a JSON REST API.
//! It combines all endpoint routers into a unified Axum server.
//!
//! # Endpoints
//!
//! - `/` - API metadata
//! - `/health` - Health check
//! - `/books` - Collection operations (list, create, delete all)
//! - `/books/stats` - Catalog statistics
//! - `/books/:id` - Single book operations (get, update, delete)
//!
//! Every response body is a JSON envelope with a `success` flag.

pub mod book_routes;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod meta_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use envelope::{Envelope, ErrorEnvelope};
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
