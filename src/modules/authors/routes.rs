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
use bookshelf_db::{Author, AuthorId, EntityStore};
use bookshelf_http::error::AppError;

use super::models::{AuthorRequest, AuthorSearchQuery};
use crate::modules::store_failure;
use crate::search::{SearchDispatcher, SearchParams, SearchResult};

/// Shared state of the author endpoints
#[derive(Clone)]
pub struct AuthorState {
    pub store: Arc<dyn EntityStore>,
    pub search: Arc<SearchDispatcher<Author>>,
}

pub fn router(state: AuthorState) -> Router {
    Router::new()
        .route("/author", post(create_author).get(list_authors))
        .route("/author/search", get(search_authors))
        .route("/author/{id}", get(get_author).put(update_author))
        .with_state(state)
}

#[tracing::instrument(skip_all)]
async fn create_author(
    State(state): State<AuthorState>,
    payload: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let author = state
        .store
        .insert_author(request.name)
        .await
        .map_err(store_failure)?;

    tracing::info!(author_id = author.id, "author created");
    Ok((StatusCode::CREATED, Json(author)))
}

#[tracing::instrument(skip_all)]
async fn list_authors(State(state): State<AuthorState>) -> Result<Json<Vec<Author>>, AppError> {
    let authors = state.store.list_authors().await.map_err(store_failure)?;
    Ok(Json(authors))
}

#[tracing::instrument(skip_all, fields(author_id = tracing::field::Empty))]
async fn get_author(
    State(state): State<AuthorState>,
    id: Result<Path<AuthorId>, PathRejection>,
) -> Result<Json<Author>, AppError> {
    let Path(id) = id?;
    tracing::Span::current().record("author_id", id);
    state
        .store
        .find_author(id)
        .await
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Author not found with id: {id}")))
}

#[tracing::instrument(skip_all, fields(author_id = tracing::field::Empty))]
async fn update_author(
    State(state): State<AuthorState>,
    id: Result<Path<AuthorId>, PathRejection>,
    payload: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    let Path(id) = id?;
    tracing::Span::current().record("author_id", id);
    let Json(request) = payload?;
    request.validate()?;

    let author = state
        .store
        .update_author(id, request.name)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| AppError::not_found(format!("Author not found with id: {id}")))?;

    tracing::info!(author_id = author.id, "author updated");
    Ok(Json(author))
}

#[tracing::instrument(skip_all, fields(query = tracing::field::Empty))]
async fn search_authors(
    State(state): State<AuthorState>,
    query: Result<Query<AuthorSearchQuery>, QueryRejection>,
) -> Result<Json<SearchResult<Author>>, AppError> {
    let Query(AuthorSearchQuery { query }) = query?;
    tracing::Span::current().record("query", query.as_str());
    let result = state
        .search
        .dispatch(&query, &SearchParams::default())
        .await?;
    Ok(Json(result))
}
