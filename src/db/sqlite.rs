use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    db::FeedbackStore,
    errors::AppError,
    models::{Feedback, NewFeedback},
};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS Feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    studentName TEXT NOT NULL,
    courseCode TEXT NOT NULL,
    comments TEXT,
    rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
    createdAt DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

pub struct SqliteFeedbackStore {
    pool: SqlitePool,
}

impl SqliteFeedbackStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::EnvError(format!("Invalid sqlite url: {}", e)))?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        if !in_memory {
            if let Some(dir) = options.get_filename().parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    tokio::fs::create_dir_all(dir).await?;
                    tracing::info!("Created database directory: {}", dir.display());
                }
            }
        }

        // An in-memory database lives only as long as its connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to open sqlite: {}", e)))?;

        tracing::info!("Connected to SQLite database at: {}", database_url);

        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let created = sqlx::query_as::<_, Feedback>(
            "INSERT INTO Feedback (studentName, courseCode, comments, rating, createdAt)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, studentName, courseCode, comments, rating, createdAt",
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
            "SELECT id, studentName, courseCode, comments, rating, createdAt
            FROM Feedback
            ORDER BY createdAt DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch feedback: {}", e)))?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM Feedback WHERE id = ?")
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
        "sqlite"
    }
}
