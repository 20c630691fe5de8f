//! # HTTP Server
//!
//! Main HTTP server combining the metadata and book routers.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::books::{BookStore, InMemoryBookStore};

use super::book_routes::book_routes;
use super::config::HttpServerConfig;
use super::errors::ApiError;
use super::meta_routes::{meta_routes, route_not_found};

/// HTTP server for the books API
pub struct HttpServer<S: BookStore + 'static = InMemoryBookStore> {
    config: HttpServerConfig,
    store: Arc<S>,
}

impl HttpServer<InMemoryBookStore> {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server with its own in-memory store, seeded per `config`
    pub fn with_config(config: HttpServerConfig) -> Self {
        let store = if config.seed_catalog {
            InMemoryBookStore::with_seed_catalog()
        } else {
            InMemoryBookStore::new()
        };
        Self::with_store(config, Arc::new(store))
    }
}

impl<S: BookStore + 'static> HttpServer<S> {
    /// Create a server around an existing store
    pub fn with_store(config: HttpServerConfig, store: Arc<S>) -> Self {
        Self { config, store }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared handle to the backing store
    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Get the router (for testing)
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.store), &self.config)
    }

    /// Start the HTTP server, returning once a shutdown signal is received
    pub async fn start(self) -> Result<(), std::io::Error> {
        let router = self.router();
        let addr = self.socket_addr();

        let listener = TcpListener::bind(addr.as_str()).await?;
        let local = listener.local_addr()?;

        tracing::info!(%local, "Books REST API listening");
        tracing::info!("API documentation: http://{}/", local);
        match self.store.len() {
            Ok(count) => tracing::info!(count, "books in memory"),
            Err(e) => tracing::warn!(error = %e, "could not count books"),
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

impl Default for HttpServer<InMemoryBookStore> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the combined router with all endpoints and middleware
pub fn build_router<S: BookStore + 'static>(store: Arc<S>, config: &HttpServerConfig) -> Router {
    Router::new()
        .merge(meta_routes())
        .merge(book_routes(store))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(cors::Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Turn a handler panic into a 500 envelope carrying the panic message
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    ApiError::Internal(message).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down server gracefully");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
        assert_eq!(server.store().len().unwrap(), 3);
    }

    #[test]
    fn test_server_without_seed() {
        let config = HttpServerConfig {
            seed_catalog: false,
            ..HttpServerConfig::with_port(8080)
        };
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
        assert!(server.store().is_empty().unwrap());
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config).router();
    }

    #[test]
    fn test_panic_response_is_internal_error() {
        let response = panic_response(Box::new("store exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("formatted")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
