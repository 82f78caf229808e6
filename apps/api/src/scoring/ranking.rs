use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::job::JobDescription;
use crate::models::profile::Profile;
use crate::scoring::engine::{ProfileScorer, ScoreResult};
use crate::scoring::vocabulary::build_vocabulary;

/// One profile's position in a ranked run. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    pub rank: usize,
    pub profile: Profile,
    pub result: ScoreResult,
}

/// A full scoring pass over one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRun {
    pub run_id: Uuid,
    pub scored_at: DateTime<Utc>,
    pub scorer_backend: String,
    pub ranked: Vec<RankedProfile>,
}

impl RankedRun {
    /// The first `n` entries, for detailed display.
    pub fn top(&self, n: usize) -> &[RankedProfile] {
        &self.ranked[..n.min(self.ranked.len())]
    }
}

/// Builds the vocabulary once for the whole batch, scores every profile with
/// it, then sorts descending by score. Ties keep input order.
pub fn rank_profiles(
    scorer: &dyn ProfileScorer,
    job: &JobDescription,
    profiles: Vec<Profile>,
) -> RankedRun {
    let run_id = Uuid::new_v4();
    let vocabulary = build_vocabulary(job, &profiles);

    let mut scored: Vec<(Profile, ScoreResult)> = profiles
        .into_iter()
        .map(|profile| {
            let result = scorer.score(&profile, job, &vocabulary);
            debug!(
                %run_id,
                profile = profile.display_name(),
                score = result.score,
                "profile scored"
            );
            (profile, result)
        })
        .collect();

    // `sort_by` is stable, so equal scores keep their input order.
    scored.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    let ranked: Vec<RankedProfile> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (profile, result))| RankedProfile {
            rank: i + 1,
            profile,
            result,
        })
        .collect();

    info!(
        %run_id,
        profiles = ranked.len(),
        vocabulary_terms = vocabulary.weights.len(),
        top_score = ranked.first().map(|r| r.result.score).unwrap_or(0),
        "ranking complete"
    );

    RankedRun {
        run_id,
        scored_at: Utc::now(),
        scorer_backend: scorer.backend().to_string(),
        ranked,
    }
}
