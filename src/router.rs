//! Axum router wiring.
//!
//! All routes (and the fallback) sit behind the metrics middleware, so the
//! request counter increments before any handler runs.

use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{middleware, Router};

use crate::metrics;
use crate::{handlers, state::AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            put(handlers::complete_todo).delete(handlers::delete_todo),
        )
        .route("/metrics", get(handlers::render_metrics))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::track_requests,
        ))
        .with_state(state)
}

async fn fallback() -> StatusCode {
    StatusCode::NOT_FOUND
}
