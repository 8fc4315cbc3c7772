use std::sync::Arc;

use tracing::{debug, warn};

use storage::repository::ProgressRepository;
use tracker_core::model::{CompletionMap, ProblemKey, UserId};
use tracker_core::session::{LoadTicket, SessionState, SessionStateError};

use crate::error::{ProgressSyncError, SessionError};
use crate::progress::writer::ProgressWriter;

/// Loads a user's completion map and persists local toggles.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
    writer: ProgressWriter,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>, writer: ProgressWriter) -> Self {
        Self { repo, writer }
    }

    /// Fetch the persisted map for `user`; empty when nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressSyncError` if the store cannot be read.
    pub async fn load(&self, user: &UserId) -> Result<CompletionMap, ProgressSyncError> {
        let record = self.repo.get_progress(user).await?;
        Ok(match record {
            Some(record) => {
                debug!(user = %user, updated_at = %record.updated_at, "progress loaded");
                record.entries
            }
            None => CompletionMap::new(),
        })
    }

    /// Load for the sign-in identified by `ticket` and install the result.
    ///
    /// On failure the session keeps its current map. Returns whether the result
    /// was applied; a ticket outdated by a later sign-in or sign-out is dropped.
    pub async fn load_into(
        &self,
        user: &UserId,
        ticket: LoadTicket,
        apply: impl FnOnce(LoadTicket, CompletionMap) -> bool,
    ) -> bool {
        match self.load(user).await {
            Ok(map) => {
                let applied = apply(ticket, map);
                if !applied {
                    debug!(user = %user, "discarded progress load for stale session");
                }
                applied
            }
            Err(err) => {
                warn!(user = %user, error = %err, "failed to load progress");
                false
            }
        }
    }

    /// Set one flag locally, then queue a merge-write of the whole map.
    ///
    /// The local update is immediate; the write happens in the background and is
    /// not rolled back if it fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` when no user is signed in.
    pub fn toggle(
        &self,
        session: &mut SessionState,
        key: ProblemKey,
        completed: bool,
    ) -> Result<(), SessionError> {
        let user = session
            .identity()
            .map(|identity| identity.id().clone())
            .ok_or(SessionStateError::NotSignedIn)?;
        let snapshot = session.set_completed(key, completed)?.clone();
        debug!(user = %user, key = %key, completed, "toggled problem");
        self.writer.submit(user, snapshot);
        Ok(())
    }

    #[must_use]
    pub fn writer(&self) -> &ProgressWriter {
        &self.writer
    }
}
