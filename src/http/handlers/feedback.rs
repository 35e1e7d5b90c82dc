use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    errors::AppError,
    models::{CreateFeedbackPayload, Feedback, NewFeedback},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub async fn create_feedback_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!("Rejected feedback body: {}", rejection.body_text());
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let new_feedback = CreateFeedbackPayload::from_json(body)
        .and_then(NewFeedback::try_from)
        .inspect_err(|err| {
            tracing::warn!("Invalid feedback submission: {}", err);
        })?;

    match state.store.insert(new_feedback).await {
        Ok(feedback) => {
            tracing::info!(
                "Feedback created for {} (ID: {})",
                feedback.course_code,
                feedback.id
            );
            Ok((StatusCode::CREATED, Json(feedback)))
        }
        Err(err) => {
            tracing::error!("Error creating feedback: {}", err);
            Err(err)
        }
    }
}

pub async fn get_all_feedback_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let feedback = state.store.list().await.map_err(|e| {
        tracing::error!("Error retrieving feedback: {}", e);
        e
    })?;

    tracing::info!("Retrieved {} feedback records", feedback.len());

    Ok(Json(feedback))
}

pub async fn delete_feedback_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = raw_id
        .ok()
        .and_then(|Path(raw_id)| raw_id.parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("Invalid ID".into()))?;

    let deleted = state.store.delete(id).await.map_err(|e| {
        tracing::error!("Error deleting feedback {}: {}", id, e);
        e
    })?;

    if deleted == 0 {
        return Err(AppError::NotFound("Feedback not found".into()));
    }

    tracing::info!("Feedback deleted (ID: {})", id);

    Ok(Json(DeleteResponse {
        message: "Feedback deleted successfully".into(),
    }))
}
