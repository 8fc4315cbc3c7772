//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tracker_core::session::SessionStateError;

/// Failure to fetch or parse the curriculum document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurriculumLoadError {
    #[error("curriculum request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read curriculum file: {0}")]
    Io(#[from] std::io::Error),
    #[error("curriculum is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sign-in or sign-out failure reported by the identity provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("no profile is configured for sign-in")]
    NoProfile,
}

/// Read or write failure against the progress store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressSyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by session-level progress operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Sync(#[from] ProgressSyncError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
