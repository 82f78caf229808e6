//! Dataset Loader: turns an uploaded JSON array or CSV file into profiles.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::profile::Profile;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON dataset must be an array of profile records")]
    NotAnArray,

    #[error("invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses a dataset body.
///
/// Content starting with `[` is a JSON array of records; `{` is rejected as a
/// non-array JSON document; anything else is CSV with a header row. Blank
/// input is an empty dataset.
pub fn parse_profiles(raw: &[u8]) -> Result<Vec<Profile>, DatasetError> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let first = raw.iter().find(|b| !b.is_ascii_whitespace());

    let profiles = match first {
        None => Vec::new(),
        Some(&b'[') => serde_json::from_slice::<Vec<Profile>>(raw)?,
        Some(&b'{') => return Err(DatasetError::NotAnArray),
        Some(_) => parse_csv(raw)?,
    };
    Ok(profiles)
}

fn parse_csv(raw: &[u8]) -> Result<Vec<Profile>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw);
    let headers = reader.headers()?.clone();

    let mut profiles = Vec::new();
    for record in reader.records() {
        let mut record = record?;
        // Short rows are padded with empty cells so missing trailing columns
        // read as missing values instead of failing the file.
        while record.len() < headers.len() {
            record.push_field("");
        }
        profiles.push(record.deserialize(Some(&headers))?);
    }
    Ok(profiles)
}

/// Reads and parses a dataset file from disk.
pub async fn load_profiles_file(path: &Path) -> Result<Vec<Profile>, DatasetError> {
    let raw = tokio::fs::read(path).await.map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles = parse_profiles(&raw)?;
    info!(path = %path.display(), profiles = profiles.len(), "dataset loaded");
    Ok(profiles)
}
