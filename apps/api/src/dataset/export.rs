//! Export of a ranked run as CSV or JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::ranking::RankedProfile;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export buffer error: {0}")]
    Buffer(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "ranking.csv",
            ExportFormat::Json => "ranking.json",
        }
    }
}

/// Flat CSV row; column order is the header order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    rank: usize,
    url: &'a str,
    nome: &'a str,
    score: u32,
    education: u32,
    experience: u32,
    required_skills: u32,
    preferred_skills: u32,
    similarity: u32,
    reasons: String,
}

impl<'a> From<&'a RankedProfile> for ExportRow<'a> {
    fn from(entry: &'a RankedProfile) -> Self {
        let b = &entry.result.breakdown;
        ExportRow {
            rank: entry.rank,
            url: &entry.profile.url,
            nome: &entry.profile.name,
            score: entry.result.score,
            education: b.education,
            experience: b.experience,
            required_skills: b.required_skills,
            preferred_skills: b.preferred_skills,
            similarity: b.similarity,
            reasons: entry.result.reasons.join(" | "),
        }
    }
}

pub fn export_csv(ranked: &[RankedProfile]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in ranked {
        writer.serialize(ExportRow::from(entry))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

pub fn export_json(ranked: &[RankedProfile]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(ranked)?)
}

pub fn export(ranked: &[RankedProfile], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => export_csv(ranked),
        ExportFormat::Json => export_json(ranked),
    }
}
