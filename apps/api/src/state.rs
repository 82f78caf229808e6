use std::sync::Arc;

use crate::config::Config;
use crate::jobs::store::JobStore;
use crate::scoring::engine::ProfileScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub job_store: JobStore,
    /// Pluggable profile scorer. Default: RubricScorer.
    pub scorer: Arc<dyn ProfileScorer>,
}
