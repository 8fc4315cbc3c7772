#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod progress;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use auth::{IdentityProvider, IdentitySubscription, LocalIdentityProvider};
pub use config::TrackerConfig;
pub use curriculum::{CurriculumService, CurriculumSource};
pub use error::{AppServicesError, AuthError, CurriculumLoadError, ProgressSyncError, SessionError};
pub use progress::{ProgressService, ProgressWriter};
