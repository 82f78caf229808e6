use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::job::JobDescription;

#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("job description file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("job description file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-record JSON persistence for the single saved job description.
/// Written pretty-printed, UTF-8, with non-ASCII characters kept as-is.
#[derive(Debug, Clone)]
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` if nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<JobDescription>, JobStoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    /// Replaces the stored record. Writes a sibling temp file then renames it
    /// over the target so readers never see a half-written file.
    pub async fn save(&self, job: &JobDescription) -> Result<(), JobStoreError> {
        let mut body = serde_json::to_string_pretty(job)?;
        body.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(path = %self.path.display(), "job description saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> JobStoreError {
        JobStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
