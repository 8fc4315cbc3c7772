use std::path::PathBuf;

use reqwest::Client;
use tracing::{debug, info};
use tracker_core::model::Curriculum;
use url::Url;

use crate::error::CurriculumLoadError;

/// Where the read-only curriculum document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurriculumSource {
    /// JSON compiled into the binary.
    Bundled(&'static str),
    File(PathBuf),
    Remote(Url),
}

impl CurriculumSource {
    /// `http(s)://` URLs are fetched remotely; anything else is a file path.
    ///
    /// Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok().map(Self::File),
            _ => Some(Self::File(PathBuf::from(raw))),
        }
    }

    fn describe(&self) -> String {
        match self {
            CurriculumSource::Bundled(_) => "bundled".to_owned(),
            CurriculumSource::File(path) => path.display().to_string(),
            CurriculumSource::Remote(url) => url.to_string(),
        }
    }
}

/// Fetches and parses the curriculum. Each call performs a fresh load.
#[derive(Clone)]
pub struct CurriculumService {
    client: Client,
    source: CurriculumSource,
}

impl CurriculumService {
    #[must_use]
    pub fn new(source: CurriculumSource) -> Self {
        Self {
            client: Client::new(),
            source,
        }
    }

    /// Load the curriculum. The document's shape is the only thing checked.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumLoadError` when the source cannot be read or the body
    /// is not a JSON array of steps.
    pub async fn load(&self) -> Result<Curriculum, CurriculumLoadError> {
        debug!(source = %self.source.describe(), "loading curriculum");
        let curriculum = match &self.source {
            CurriculumSource::Bundled(raw) => parse(raw)?,
            CurriculumSource::File(path) => {
                let raw = tokio::fs::read_to_string(path).await?;
                parse(&raw)?
            }
            CurriculumSource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(CurriculumLoadError::HttpStatus(response.status()));
                }
                let raw = response.text().await?;
                parse(&raw)?
            }
        };
        info!(
            steps = curriculum.len(),
            problems = curriculum.total_problems(),
            "curriculum loaded"
        );
        Ok(curriculum)
    }
}

/// Parse a curriculum document.
///
/// # Errors
///
/// Returns `CurriculumLoadError::Parse` if the JSON does not match the step shape.
pub fn parse(raw: &str) -> Result<Curriculum, CurriculumLoadError> {
    Ok(serde_json::from_str(raw)?)
}
