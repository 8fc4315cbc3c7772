use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracker_core::model::{CompletionMap, UserId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted progress document for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub entries: CompletionMap,
    pub updated_at: DateTime<Utc>,
}

/// Per-user completion document store.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the progress document for `user`.
    ///
    /// Returns `Ok(None)` when the user has never written progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, StorageError>;

    /// Merge `entries` into the user's document, creating it if needed.
    ///
    /// Only keys present in `entries` are written; other stored keys are kept.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn merge_progress(
        &self,
        user: &UserId,
        entries: &CompletionMap,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    documents: Arc<Mutex<HashMap<UserId, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user).cloned())
    }

    async fn merge_progress(
        &self,
        user: &UserId,
        entries: &CompletionMap,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let record = guard.entry(user.clone()).or_insert_with(|| ProgressRecord {
            entries: CompletionMap::new(),
            updated_at: at,
        });
        record.entries.merge_from(entries);
        record.updated_at = at;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
