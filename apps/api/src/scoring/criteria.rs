//! The five scoring criteria. Each is a pure function returning the points
//! earned and one explanation line; the engine sums and clamps them.

use serde::{Deserialize, Serialize};

use crate::models::job::EducationLevel;
use crate::scoring::vocabulary::FittedVocabulary;

pub const EDUCATION_POINTS: u32 = 15;
pub const EXPERIENCE_POINTS: u32 = 15;
pub const REQUIRED_SKILL_POINTS: u32 = 10;
pub const REQUIRED_SKILLS_MAX: u32 = 30;
pub const PREFERRED_SKILL_POINTS: u32 = 2;
pub const PREFERRED_SKILLS_MAX: u32 = 10;
pub const SIMILARITY_MAX: u32 = 30;

/// Points earned on one criterion, with the reason shown to the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub points: u32,
    pub reason: String,
}

impl CriterionScore {
    fn new(points: u32, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: reason.into(),
        }
    }
}

/// 15 points iff the profile's education ranks at or above the job's.
pub fn score_education(profile_education: &str, required_education: &str) -> CriterionScore {
    let profile_rank = EducationLevel::rank_of(profile_education);
    let required_rank = EducationLevel::rank_of(required_education);
    let shown = |label: &str| {
        if label.trim().is_empty() {
            "not informed".to_string()
        } else {
            label.trim().to_string()
        }
    };

    if profile_rank >= required_rank {
        CriterionScore::new(
            EDUCATION_POINTS,
            format!(
                "Education {} meets required {}",
                shown(profile_education),
                shown(required_education)
            ),
        )
    } else {
        CriterionScore::new(
            0,
            format!(
                "Education {} is below required {}",
                shown(profile_education),
                shown(required_education)
            ),
        )
    }
}

/// 15 points iff the profile has at least the required years.
pub fn score_experience(years: i64, min_years: i64) -> CriterionScore {
    if years >= min_years {
        CriterionScore::new(
            EXPERIENCE_POINTS,
            format!("Experience: {years} years >= {min_years} required"),
        )
    } else {
        CriterionScore::new(
            0,
            format!(
                "Experience: {years} years < {min_years} required ({} short)",
                min_years.saturating_sub(years)
            ),
        )
    }
}

fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Job terms matched by any profile term. Matching is bidirectional
/// substring containment on lowercased, trimmed terms, so "python" matches
/// "python3" and "programação python". Single-letter terms match broadly.
///
/// `profile_terms` are expected already lowercased, as from
/// [`Profile::skill_terms`](crate::models::profile::Profile::skill_terms).
pub fn matched_terms(job_terms: &[String], profile_terms: &[String]) -> Vec<String> {
    normalize_terms(job_terms)
        .into_iter()
        .filter(|term| {
            profile_terms
                .iter()
                .any(|p| p.contains(term.as_str()) || term.contains(p.as_str()))
        })
        .collect()
}

/// min(30, 10 × matched required terms).
pub fn score_required_skills(required: &[String], profile_terms: &[String]) -> CriterionScore {
    if normalize_terms(required).is_empty() {
        return CriterionScore::new(0, "No required skills specified");
    }

    let matched = matched_terms(required, profile_terms);
    let points = (matched.len() as u32)
        .saturating_mul(REQUIRED_SKILL_POINTS)
        .min(REQUIRED_SKILLS_MAX);

    if matched.is_empty() {
        CriterionScore::new(0, "No required skills found")
    } else {
        CriterionScore::new(
            points,
            format!("Required skills found: {}", matched.join(", ")),
        )
    }
}

/// min(10, 2 × matched preferred terms).
pub fn score_preferred_skills(preferred: &[String], profile_terms: &[String]) -> CriterionScore {
    if normalize_terms(preferred).is_empty() {
        return CriterionScore::new(0, "No preferred skills specified");
    }

    let matched = matched_terms(preferred, profile_terms);
    let points = (matched.len() as u32)
        .saturating_mul(PREFERRED_SKILL_POINTS)
        .min(PREFERRED_SKILLS_MAX);

    if matched.is_empty() {
        CriterionScore::new(0, "No preferred skills found")
    } else {
        CriterionScore::new(
            points,
            format!("Preferred skills found: {}", matched.join(", ")),
        )
    }
}

/// trunc(cosine × 30) between the profile document and the job vector.
/// Blank documents are skipped; transform failures become the reason.
pub fn score_similarity(document: &str, vocabulary: &FittedVocabulary) -> CriterionScore {
    if document.trim().is_empty() {
        return CriterionScore::new(0, "Text similarity skipped: no summary or skills text");
    }

    match vocabulary.similarity(document) {
        Ok(similarity) => {
            let points = ((similarity * SIMILARITY_MAX as f64) as u32).min(SIMILARITY_MAX);
            CriterionScore::new(
                points,
                format!("Text similarity {similarity:.2} -> +{points} points"),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "similarity unavailable for profile");
            CriterionScore::new(0, format!("Text similarity unavailable: {e}"))
        }
    }
}
