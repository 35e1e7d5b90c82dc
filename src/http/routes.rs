use std::path::Path;

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    errors::AppError,
    http::handlers::{
        create_feedback_handler, delete_feedback_handler, get_all_feedback_handler,
        health_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/feedback",
            get(get_all_feedback_handler).post(create_feedback_handler),
        )
        .route("/feedback/{id}", delete(delete_feedback_handler))
        .fallback(not_found);

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Serves the web client build; unknown paths get `index.html` so client routes resolve.
pub fn create_static_routes(static_dir: &Path) -> Router {
    tracing::info!("Serving web client from {}", static_dir.display());

    let index = ServeFile::new(static_dir.join("index.html"));
    Router::new().fallback_service(ServeDir::new(static_dir).fallback(index))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}
