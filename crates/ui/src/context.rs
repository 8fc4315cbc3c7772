use std::sync::Arc;

use services::{Clock, CurriculumService, IdentityProvider, ProgressService};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn curriculum(&self) -> Arc<CurriculumService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn identity(&self) -> Arc<dyn IdentityProvider>;
}

impl UiApp for services::AppServices {
    fn clock(&self) -> Clock {
        services::AppServices::clock(self)
    }

    fn curriculum(&self) -> Arc<CurriculumService> {
        services::AppServices::curriculum(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        services::AppServices::progress(self)
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        services::AppServices::identity(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    curriculum: Arc<CurriculumService>,
    progress: Arc<ProgressService>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            curriculum: app.curriculum(),
            progress: app.progress(),
            identity: app.identity(),
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
