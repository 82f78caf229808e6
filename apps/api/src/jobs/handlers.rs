//! Axum route handlers for the saved job description.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::job::JobDescription;
use crate::state::AppState;

/// GET /api/v1/job
pub async fn handle_get_job(
    State(state): State<AppState>,
) -> Result<Json<JobDescription>, AppError> {
    let job = state.job_store.load().await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "No job description saved at {}",
            state.job_store.path().display()
        ))
    })?;
    Ok(Json(job))
}

/// PUT /api/v1/job
///
/// Validates and replaces the saved job description.
pub async fn handle_put_job(
    State(state): State<AppState>,
    Json(job): Json<JobDescription>,
) -> Result<Json<JobDescription>, AppError> {
    job.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    state.job_store.save(&job).await?;
    Ok(Json(job))
}
