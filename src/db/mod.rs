pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::AppError,
    models::{Feedback, NewFeedback},
};

pub use postgres::PgFeedbackStore;
pub use sqlite::SqliteFeedbackStore;

/// Storage for feedback records. Every operation is a single statement.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Creates the `Feedback` table if it does not exist yet.
    async fn migrate(&self) -> Result<(), AppError>;

    /// Inserts a record and returns it with its id and creation time.
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, AppError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<Feedback>, AppError>;

    /// Deletes by id and returns the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, AppError>;

    async fn close(&self);

    fn backend(&self) -> &'static str;
}

pub type SharedStore = Arc<dyn FeedbackStore>;

/// Opens the store named by `database_url` and makes sure the schema exists.
pub async fn connect(database_url: &str) -> Result<SharedStore, AppError> {
    let store: SharedStore = match database_url.split_once(':').map(|(scheme, _)| scheme) {
        Some("sqlite") => Arc::new(SqliteFeedbackStore::connect(database_url).await?),
        Some("postgres") | Some("postgresql") => {
            Arc::new(PgFeedbackStore::connect(database_url).await?)
        }
        _ => {
            return Err(AppError::EnvError(format!(
                "Unsupported DATABASE_URL scheme: {}",
                database_url
            )));
        }
    };

    store.migrate().await?;
    tracing::info!("{} feedback store ready", store.backend());

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("mysql://localhost/feedback").await;
        assert!(matches!(result, Err(AppError::EnvError(_))));
    }

    #[tokio::test]
    async fn test_connect_in_memory_sqlite() {
        let store = connect("sqlite::memory:").await.unwrap();
        assert_eq!(store.backend(), "sqlite");
        assert!(store.list().await.unwrap().is_empty());
        store.close().await;
    }
}
