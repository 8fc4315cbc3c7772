use std::env;

use tracing::{info, warn};
use tracker_core::model::{UserId, UserIdentity};

use crate::curriculum::CurriculumSource;

pub const DEFAULT_DB_URL: &str = "sqlite:tracker.sqlite3";
pub const DEFAULT_USER_ID: &str = "local";

/// Runtime configuration, read from the environment and overridable by flags.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub db_url: String,
    /// `None` means the bundled curriculum.
    pub curriculum: Option<String>,
    pub user_id: String,
    pub user_name: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.to_owned(),
            curriculum: None,
            user_id: DEFAULT_USER_ID.to_owned(),
            user_name: None,
        }
    }
}

impl TrackerConfig {
    /// Reads `TRACKER_DB_URL`, `TRACKER_CURRICULUM`, `TRACKER_USER_ID` and
    /// `TRACKER_USER_NAME`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_url: var("TRACKER_DB_URL").unwrap_or_else(|| {
                info!("TRACKER_DB_URL not set, using default: {}", defaults.db_url);
                defaults.db_url
            }),
            curriculum: var("TRACKER_CURRICULUM"),
            user_id: var("TRACKER_USER_ID").unwrap_or(defaults.user_id),
            user_name: var("TRACKER_USER_NAME").or_else(|| var("USER")),
        }
    }

    /// Where the curriculum is loaded from.
    #[must_use]
    pub fn curriculum_source(&self, bundled: &'static str) -> CurriculumSource {
        match self.curriculum.as_deref() {
            None => CurriculumSource::Bundled(bundled),
            Some(raw) => CurriculumSource::parse(raw).unwrap_or_else(|| {
                warn!("TRACKER_CURRICULUM {raw:?} is not usable, falling back to bundled data");
                CurriculumSource::Bundled(bundled)
            }),
        }
    }

    /// The local profile offered by the desktop identity provider.
    #[must_use]
    pub fn profile(&self) -> Option<UserIdentity> {
        match UserId::new(self.user_id.clone()) {
            Ok(id) => Some(UserIdentity::new(id, self.user_name.clone())),
            Err(err) => {
                warn!("invalid user id {:?}: {err}", self.user_id);
                None
            }
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
