//! Book HTTP Routes
//!
//! CRUD endpoints for the book catalog. The store is injected by the caller.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;

use crate::books::{Book, BookFilter, BookPatch, BookStore, CatalogStats, NewBook};

use super::envelope::Envelope;
use super::errors::{ApiError, ApiResult};
use super::meta_routes::route_not_found;

/// Create book routes backed by `store`
pub fn book_routes<S: BookStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route(
            "/books",
            get(list_handler::<S>)
                .post(create_handler::<S>)
                .delete(delete_all_handler::<S>)
                .fallback(route_not_found),
        )
        .route(
            "/books/stats",
            get(stats_handler::<S>).fallback(route_not_found),
        )
        .route(
            "/books/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>)
                .fallback(route_not_found),
        )
        .with_state(store)
}

/// Decode a JSON request body
///
/// A missing or blank body decodes as `{}`, so it reaches validation like
/// any other request without fields.
fn decode_body<T>(body: Result<Bytes, BytesRejection>) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    Json::<T>::from_bytes(&bytes)
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

// ==================
// Handlers
// ==================

/// List books, optionally filtered by `author`, `genre` and `limit`
async fn list_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Envelope<Vec<Book>>>> {
    let filter = BookFilter::from_params(&params);

    let books = store.list(&filter)?;
    Ok(Json(Envelope::list(books)))
}

/// Catalog statistics
async fn stats_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
) -> ApiResult<Json<Envelope<CatalogStats>>> {
    Ok(Json(Envelope::data(store.stats()?)))
}

async fn get_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Book>>> {
    Ok(Json(Envelope::data(store.get(&id)?)))
}

async fn create_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Book>>)> {
    let new: NewBook = decode_body(body)?;
    let book = store.create(new)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(book).with_message("Book created successfully")),
    ))
}

async fn update_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Envelope<Book>>> {
    let patch: BookPatch = decode_body(body)?;
    let book = store.update(&id, patch)?;

    Ok(Json(
        Envelope::data(book).with_message("Book updated successfully"),
    ))
}

async fn delete_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Book>>> {
    let book = store.delete(&id)?;

    Ok(Json(
        Envelope::data(book).with_message("Book deleted successfully"),
    ))
}

async fn delete_all_handler<S: BookStore + 'static>(
    State(store): State<Arc<S>>,
) -> ApiResult<Json<Envelope<()>>> {
    let count = store.delete_all()?;
    Ok(Json(Envelope::deleted_all(count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::InMemoryBookStore;

    #[test]
    fn test_router_builds() {
        let store = Arc::new(InMemoryBookStore::with_seed_catalog());
        let _router = book_routes(store);
    }

    #[test]
    fn test_decode_body_reads_json() {
        let patch: BookPatch = decode_body(Ok(Bytes::from_static(br#"{"title": "Emma"}"#))).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Emma"));
    }

    #[test]
    fn test_decode_blank_body_as_empty_object() {
        let patch: BookPatch = decode_body(Ok(Bytes::new())).unwrap();
        assert!(patch.is_empty());

        let new: NewBook = decode_body(Ok(Bytes::from_static(b" \n"))).unwrap();
        assert!(new.title.is_none() && new.author.is_none());
    }

    #[test]
    fn test_decode_malformed_body_is_invalid() {
        let result: ApiResult<BookPatch> = decode_body(Ok(Bytes::from_static(b"{\"title\":")));
        assert!(matches!(result, Err(ApiError::InvalidBody(_))));
    }
}
