use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// One stored feedback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub student_name: String,
    pub course_code: String,
    pub comments: Option<String>,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// A submission that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub student_name: String,
    pub course_code: String,
    pub comments: Option<String>,
    pub rating: i32,
}

// The web client's <select> posts the rating as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(serde_json::Number),
    Text(String),
}

impl RatingInput {
    fn as_rating(&self) -> Option<i64> {
        match self {
            RatingInput::Number(n) => n.as_i64(),
            RatingInput::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackPayload {
    pub student_name: Option<String>,
    pub course_code: Option<String>,
    pub comments: Option<String>,
    pub rating: Option<RatingInput>,
}

impl CreateFeedbackPayload {
    /// Reads a payload from a request body, which must be a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, AppError> {
        if !value.is_object() {
            return Err(AppError::BadRequest(
                "Invalid request body: expected a JSON object".into(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
    }
}

impl TryFrom<CreateFeedbackPayload> for NewFeedback {
    type Error = AppError;

    fn try_from(payload: CreateFeedbackPayload) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();

        let student_name = payload.student_name.unwrap_or_default();
        if student_name.trim().is_empty() {
            violations.push("studentName is required".to_string());
        }

        let course_code = payload.course_code.unwrap_or_default();
        if course_code.trim().is_empty() {
            violations.push("courseCode is required".to_string());
        }

        let rating = match payload.rating.as_ref() {
            None => {
                violations.push("rating is required".to_string());
                None
            }
            Some(input) => match input.as_rating() {
                Some(r) if (MIN_RATING as i64..=MAX_RATING as i64).contains(&r) => Some(r as i32),
                _ => {
                    violations.push(format!(
                        "rating must be a whole number between {MIN_RATING} and {MAX_RATING}"
                    ));
                    None
                }
            },
        };

        match rating {
            Some(rating) if violations.is_empty() => Ok(NewFeedback {
                student_name,
                course_code,
                comments: payload.comments,
                rating,
            }),
            _ => Err(AppError::BadRequest(format!(
                "Invalid input: {}",
                violations.join("; ")
            ))),
        }
    }
}
