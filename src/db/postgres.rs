use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::FeedbackStore,
    errors::AppError,
    models::{Feedback, NewFeedback},
};

// Quoted columns keep the camelCase names postgres would otherwise fold.
const CREATE_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS feedback (
    id BIGSERIAL PRIMARY KEY,
    "studentName" TEXT NOT NULL,
    "courseCode" TEXT NOT NULL,
    comments TEXT,
    rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT NOW()
)"#;

pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect to postgres: {}", e)))?;

        tracing::info!("Connected to PostgreSQL database");

        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let created = sqlx::query_as::<_, Feedback>(
            r#"INSERT INTO feedback ("studentName", "courseCode", comments, rating, "createdAt")
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, "studentName", "courseCode", comments, rating, "createdAt""#,
        )
        .bind(&feedback.student_name)
        .bind(&feedback.course_code)
        .bind(&feedback.comments)
        .bind(feedback.rating)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert feedback: {}", e)))?;

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Feedback>, AppError> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"SELECT id, "studentName", "courseCode", comments, rating, "createdAt"
            FROM feedback
            ORDER BY "createdAt" DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch feedback: {}", e)))?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete feedback: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
