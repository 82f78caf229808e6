//! Axum route handlers for the Ranking API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::dataset::export::{export, ExportFormat};
use crate::dataset::loader::{load_profiles_file, parse_profiles};
use crate::errors::AppError;
use crate::models::job::JobDescription;
use crate::models::profile::Profile;
use crate::scoring::ranking::{rank_profiles, RankedProfile, RankedRun};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RankRequest {
    /// Inline job description; falls back to the saved one.
    pub job: Option<JobDescription>,
    /// Inline profiles; falls back to the example dataset when `use_example`.
    pub profiles: Option<Vec<Profile>>,
    #[serde(default)]
    pub use_example: bool,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TopNQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub run_id: Uuid,
    pub scored_at: DateTime<Utc>,
    pub scorer_backend: String,
    pub total: usize,
    pub top: Vec<RankedProfile>,
    pub ranked: Vec<RankedProfile>,
}

impl RankResponse {
    fn from_run(run: RankedRun, top_n: usize) -> Self {
        let top = run.top(top_n).to_vec();
        RankResponse {
            run_id: run.run_id,
            scored_at: run.scored_at,
            scorer_backend: run.scorer_backend,
            total: run.ranked.len(),
            top,
            ranked: run.ranked,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input resolution
// ────────────────────────────────────────────────────────────────────────────

async fn resolve_job(
    state: &AppState,
    inline: Option<JobDescription>,
) -> Result<JobDescription, AppError> {
    if let Some(job) = inline {
        return Ok(job);
    }
    state.job_store.load().await?.ok_or_else(|| {
        AppError::UnprocessableEntity(
            "No job description supplied or saved; PUT /api/v1/job first".to_string(),
        )
    })
}

async fn resolve_profiles(
    state: &AppState,
    inline: Option<Vec<Profile>>,
    use_example: bool,
) -> Result<Vec<Profile>, AppError> {
    if let Some(profiles) = inline {
        return Ok(profiles);
    }
    if !use_example {
        return Ok(Vec::new());
    }

    let path = &state.config.example_dataset_path;
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        warn!(path = %path.display(), "example dataset not found");
        return Err(AppError::NotFound(format!(
            "Example dataset not found at {}; upload a CSV or JSON dataset instead",
            path.display()
        )));
    }
    Ok(load_profiles_file(path).await?)
}

async fn run_ranking(state: &AppState, request: RankRequest) -> Result<RankedRun, AppError> {
    let job = resolve_job(state, request.job).await?;
    let profiles = resolve_profiles(state, request.profiles, request.use_example).await?;
    Ok(rank_profiles(state.scorer.as_ref(), &job, profiles))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Scores every profile against the job and returns the ranked batch plus
/// the top-N slice for display.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let top_n = request.top_n.unwrap_or(state.config.default_top_n);
    let run = run_ranking(&state, request).await?;
    Ok(Json(RankResponse::from_run(run, top_n)))
}

/// POST /api/v1/rank/dataset
///
/// Body is a raw CSV or JSON dataset; scored against the saved job.
pub async fn handle_rank_dataset(
    State(state): State<AppState>,
    Query(query): Query<TopNQuery>,
    body: Bytes,
) -> Result<Json<RankResponse>, AppError> {
    let profiles = parse_profiles(&body)?;
    let request = RankRequest {
        profiles: Some(profiles),
        ..Default::default()
    };
    let top_n = query.top_n.unwrap_or(state.config.default_top_n);
    let run = run_ranking(&state, request).await?;
    Ok(Json(RankResponse::from_run(run, top_n)))
}

/// POST /api/v1/rank/export?format=csv|json
///
/// Same input as `/rank`; returns the full ranked list as a download.
pub async fn handle_rank_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(request): Json<RankRequest>,
) -> Result<Response, AppError> {
    let run = run_ranking(&state, request).await?;
    let body = export(&run.ranked, query.format)?;

    Ok((
        [
            (header::CONTENT_TYPE, query.format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", query.format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}
