use axum::{
    extract::{Path, State},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use crate::server::AppState;
use crate::storage::DbStats;
use crate::{Author, Book};
use std::sync::Arc;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: crate::Error) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))
}

fn not_found(what: &str, id: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: format!("{} not found: {}", what, id) }))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<DbStats>, ApiError> {
    let store = state.store.lock().await;
    let stats = store.stats().map_err(internal)?;
    Ok(Json(stats))
}

pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    let store = state.store.lock().await;
    store
        .get_author(&id)
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("author", &id))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let store = state.store.lock().await;
    store
        .get_book(&id)
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("book", &id))
}
