use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::models::{CreateTodoRequest, Todo};
use crate::state::AppState;

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store().list_todos().await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store().create_todo(input.text).await?;
    Ok(Json(todo))
}

/// Marks the record complete, regardless of its prior value; a repeat call is
/// a no-op. An unknown id responds 200 with a JSON `null` body.
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Todo>>, ApiError> {
    let todo = state.store().complete_todo(&id).await?;
    Ok(Json(todo))
}

/// Deleting an id that does not exist still responds 204.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_todo(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the metrics snapshot for scraping.
pub async fn render_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics()
        .gather()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
