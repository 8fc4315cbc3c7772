use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{ProgressRecord, ProgressRepository, StorageError};
use tracker_core::model::{CompletionMap, ProblemKey, UserId};

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, StorageError> {
        let document = sqlx::query(
            r"
            SELECT updated_at
            FROM progress_documents
            WHERE user_id = ?1
            ",
        )
        .bind(user.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(document) = document else {
            return Ok(None);
        };
        let updated_at: DateTime<Utc> = document
            .try_get("updated_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        let rows = sqlx::query(
            r"
            SELECT problem_key, completed
            FROM progress_entries
            WHERE user_id = ?1
            ",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let mut entries = CompletionMap::new();
        for row in rows {
            let raw_key: String = row
                .try_get("problem_key")
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            let completed: bool = row
                .try_get("completed")
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            let key = raw_key
                .parse::<ProblemKey>()
                .map_err(|err| StorageError::Serialization(err.to_string()))?;
            entries.set(key, completed);
        }

        Ok(Some(ProgressRecord {
            entries,
            updated_at,
        }))
    }

    async fn merge_progress(
        &self,
        user: &UserId,
        entries: &CompletionMap,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO progress_documents (user_id, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            ON CONFLICT(user_id) DO UPDATE SET
                updated_at = excluded.updated_at
            ",
        )
        .bind(user.as_str())
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        for (key, completed) in entries.iter() {
            sqlx::query(
                r"
                INSERT INTO progress_entries (user_id, problem_key, completed)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(user_id, problem_key) DO UPDATE SET
                    completed = excluded.completed
                ",
            )
            .bind(user.as_str())
            .bind(key.to_string())
            .bind(completed)
            .execute(&mut *tx)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(user = %user, entries = entries.len(), "merged progress");
        Ok(())
    }
}
