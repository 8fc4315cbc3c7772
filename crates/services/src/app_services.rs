use std::sync::Arc;

use tokio::runtime::Handle;

use storage::repository::Storage;

use crate::auth::{IdentityProvider, LocalIdentityProvider};
use crate::config::TrackerConfig;
use crate::curriculum::CurriculumService;
use crate::error::AppServicesError;
use crate::progress::{ProgressService, ProgressWriter};
use crate::Clock;

/// Assembles app-facing services from configuration and storage.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    curriculum: Arc<CurriculumService>,
    progress: Arc<ProgressService>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage at `config.db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        config: &TrackerConfig,
        bundled_curriculum: &'static str,
        clock: Clock,
        runtime: Handle,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Ok(Self::new(config, storage, bundled_curriculum, clock, runtime))
    }

    /// Build services over an existing storage backend.
    #[must_use]
    pub fn new(
        config: &TrackerConfig,
        storage: Storage,
        bundled_curriculum: &'static str,
        clock: Clock,
        runtime: Handle,
    ) -> Self {
        let curriculum = Arc::new(CurriculumService::new(
            config.curriculum_source(bundled_curriculum),
        ));
        let writer = ProgressWriter::new(clock, Arc::clone(&storage.progress), runtime);
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.progress),
            writer,
        ));
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::new(config.profile()));

        Self {
            clock,
            curriculum,
            progress,
            identity,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<CurriculumService> {
        Arc::clone(&self.curriculum)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }
}
