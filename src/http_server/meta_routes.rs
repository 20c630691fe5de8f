//! Metadata HTTP Routes
//!
//! API description at `/`, a health check, and the catch-all for unknown routes.

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::errors::ApiError;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create metadata routes
pub fn meta_routes() -> Router {
    Router::new()
        .route("/", get(api_info_handler).fallback(route_not_found))
        .route("/health", get(health_handler).fallback(route_not_found))
}

/// API metadata handler
async fn api_info_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Books REST API",
        "version": crate::VERSION,
        "endpoints": {
            "GET /books": "Get all books",
            "GET /books/stats": "Get catalog statistics",
            "GET /books/:id": "Get a specific book",
            "POST /books": "Add a new book",
            "PUT /books/:id": "Update a book",
            "DELETE /books/:id": "Delete a book",
            "DELETE /books": "Delete all books"
        },
        "usage": {
            "Add a book": "POST /books with JSON body: {\"title\": \"Book Title\", \"author\": \"Author Name\"}",
            "Update a book": "PUT /books/:id with JSON body: {\"title\": \"New Title\"}",
            "Filter books": "GET /books?author=authorName&genre=fiction&limit=5"
        }
    }))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Fallback for any method/path pair without a handler
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    ApiError::RouteNotFound {
        method: method.to_string(),
        path,
    }
}
