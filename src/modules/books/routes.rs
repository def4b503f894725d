use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bookshelf_db::{Book, BookId, EntityStore, StoreError};
use bookshelf_http::error::AppError;

use super::models::{BookSearchQuery, CreateBook, UpdateBook};
use crate::modules::store_failure;
use crate::search::{SearchDispatcher, SearchResult};

/// Shared state of the book endpoints
#[derive(Clone)]
pub struct BookState {
    pub store: Arc<dyn EntityStore>,
    pub search: Arc<SearchDispatcher<Book>>,
}

pub fn router(state: BookState) -> Router {
    Router::new()
        .route("/book", post(create_book).get(list_books))
        .route("/book/search", get(search_books))
        .route("/book/{id}", get(get_book).put(update_book))
        .with_state(state)
}

#[tracing::instrument(skip_all)]
async fn create_book(
    State(state): State<BookState>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let book = state
        .store
        .insert_book(request.into_new_book())
        .await
        .map_err(|err| match err {
            StoreError::UnknownAuthor(id) => AppError::not_found(format!(
                "Cannot create book for non-existent author with id: {id}"
            )),
            other => store_failure(other),
        })?;

    tracing::info!(book_id = book.id, author_id = book.author_id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

#[tracing::instrument(skip_all)]
async fn list_books(State(state): State<BookState>) -> Result<Json<Vec<Book>>, AppError> {
    let books = state.store.list_books().await.map_err(store_failure)?;
    Ok(Json(books))
}

#[tracing::instrument(skip_all, fields(book_id = tracing::field::Empty))]
async fn get_book(
    State(state): State<BookState>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    tracing::Span::current().record("book_id", id);
    state
        .store
        .find_book(id)
        .await
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Book not found with id: {id}")))
}

#[tracing::instrument(skip_all, fields(book_id = tracing::field::Empty))]
async fn update_book(
    State(state): State<BookState>,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    tracing::Span::current().record("book_id", id);
    let Json(request) = payload?;
    request.validate()?;

    let book = state
        .store
        .update_book(id, request.into_changes())
        .await
        .map_err(store_failure)?
        .ok_or_else(|| AppError::not_found(format!("Book not found with id: {id}")))?;

    tracing::info!(book_id = book.id, "book updated");
    Ok(Json(book))
}

#[tracing::instrument(skip_all, fields(query = tracing::field::Empty))]
async fn search_books(
    State(state): State<BookState>,
    query: Result<Query<BookSearchQuery>, QueryRejection>,
) -> Result<Json<SearchResult<Book>>, AppError> {
    let Query(query) = query?;
    tracing::Span::current().record("query", query.query.as_str());
    let result = state.search.dispatch(&query.query, &query.params()).await?;
    Ok(Json(result))
}
