//! Scoring Engine: pluggable, trait-based scorer for one profile against a job.
//!
//! Default: `RubricScorer` (five fixed criteria plus TF-IDF similarity).
//! `AppState` holds an `Arc<dyn ProfileScorer>` so the rubric can be swapped
//! without touching handlers or ranking.

use serde::{Deserialize, Serialize};

use crate::models::job::JobDescription;
use crate::models::profile::Profile;
use crate::scoring::criteria::{
    score_education, score_experience, score_preferred_skills, score_required_skills,
    score_similarity, CriterionScore,
};
use crate::scoring::vocabulary::FittedVocabulary;

pub const MAX_SCORE: u32 = 100;

/// Points earned per criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub education: u32,
    pub experience: u32,
    pub required_skills: u32,
    pub preferred_skills: u32,
    pub similarity: u32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> u32 {
        self.education + self.experience + self.required_skills + self.preferred_skills
            + self.similarity
    }
}

/// Result for one profile. `score == min(100, breakdown.sum())`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    /// education, experience, required skills, preferred skills, similarity
    pub reasons: Vec<String>,
}

/// Implement this to swap scoring backends without touching ranking or
/// handler code.
pub trait ProfileScorer: Send + Sync {
    fn score(
        &self,
        profile: &Profile,
        job: &JobDescription,
        vocabulary: &FittedVocabulary,
    ) -> ScoreResult;

    /// Label surfaced in API responses.
    fn backend(&self) -> &'static str;
}

/// The hand-tuned weighted rubric.
pub struct RubricScorer;

impl ProfileScorer for RubricScorer {
    fn score(
        &self,
        profile: &Profile,
        job: &JobDescription,
        vocabulary: &FittedVocabulary,
    ) -> ScoreResult {
        score_profile(profile, job, vocabulary)
    }

    fn backend(&self) -> &'static str {
        "rubric"
    }
}

/// Evaluates the five criteria in fixed order and clamps the total.
pub fn score_profile(
    profile: &Profile,
    job: &JobDescription,
    vocabulary: &FittedVocabulary,
) -> ScoreResult {
    let education = score_education(&profile.education, &job.required_education);
    let experience = score_experience(profile.years_experience, job.min_years_experience);
    let profile_terms = profile.skill_terms();
    let required = score_required_skills(&job.required_skills, &profile_terms);
    let preferred = score_preferred_skills(&job.preferred_skills, &profile_terms);
    let similarity = score_similarity(&profile.document(), vocabulary);

    let breakdown = ScoreBreakdown {
        education: education.points,
        experience: experience.points,
        required_skills: required.points,
        preferred_skills: preferred.points,
        similarity: similarity.points,
    };

    let reasons = [education, experience, required, preferred, similarity]
        .into_iter()
        .map(|CriterionScore { reason, .. }| reason)
        .collect();

    ScoreResult {
        score: breakdown.sum().min(MAX_SCORE),
        breakdown,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::vocabulary::build_vocabulary;

    fn analyst_job() -> JobDescription {
        JobDescription {
            required_education: "Superior".to_string(),
            required_skills: vec!["Python".to_string(), "Estatística".to_string()],
            preferred_skills: vec!["SQL".to_string()],
            min_years_experience: 2,
            notes: String::new(),
        }
    }

    fn profile_a() -> Profile {
        Profile {
            url: "https://linkedin.com/in/a".to_string(),
            name: "A".to_string(),
            skills: "Python, Estatística, SQL".to_string(),
            education: "Mestrado".to_string(),
            years_experience: 5,
            summary: String::new(),
        }
    }

    #[test]
    fn test_analyst_scenario_breakdown() {
        let job = analyst_job();
        let profiles = vec![profile_a()];
        let vocab = build_vocabulary(&job, &profiles);
        let result = score_profile(&profiles[0], &job, &vocab);

        assert_eq!(result.breakdown.education, 15);
        assert_eq!(result.breakdown.experience, 15);
        assert_eq!(result.breakdown.required_skills, 20);
        assert_eq!(result.breakdown.preferred_skills, 2);
        assert!(result.breakdown.similarity <= 30);
        assert_eq!(result.score, 52 + result.breakdown.similarity);
        // Skills text is present, so similarity is computed, not skipped.
        assert!(result.reasons[4].starts_with("Text similarity "));
        assert!(!result.reasons[4].contains("skipped"));
    }

    #[test]
    fn test_reasons_follow_evaluation_order() {
        let job = analyst_job();
        let vocab = build_vocabulary(&job, &[profile_a()]);
        let result = score_profile(&profile_a(), &job, &vocab);
        assert_eq!(result.reasons.len(), 5);
        assert!(result.reasons[0].starts_with("Education"));
        assert!(result.reasons[1].starts_with("Experience"));
        assert!(result.reasons[2].starts_with("Required skills"));
        assert!(result.reasons[3].starts_with("Preferred skills"));
        assert!(result.reasons[4].starts_with("Text similarity"));
    }

    #[test]
    fn test_missing_experience_cites_shortfall() {
        let job = analyst_job();
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "nome": "Sem experiência",
            "habilidades": "Python",
            "educacao": "Superior"
        }))
        .unwrap();
        let vocab = build_vocabulary(&job, std::slice::from_ref(&profile));
        let result = score_profile(&profile, &job, &vocab);
        assert_eq!(result.breakdown.experience, 0);
        assert!(result.reasons[1].contains("2 short"));
    }

    #[test]
    fn test_empty_required_list_is_not_an_error() {
        let job = JobDescription {
            required_skills: vec![],
            ..analyst_job()
        };
        let vocab = build_vocabulary(&job, &[profile_a()]);
        let result = score_profile(&profile_a(), &job, &vocab);
        assert_eq!(result.breakdown.required_skills, 0);
        assert_eq!(result.reasons[2], "No required skills specified");
    }

    #[test]
    fn test_blank_profile_text_has_zero_similarity() {
        let job = analyst_job();
        let profile = Profile {
            education: "Doutorado".to_string(),
            years_experience: 10,
            ..Default::default()
        };
        let vocab = build_vocabulary(&job, std::slice::from_ref(&profile));
        let result = score_profile(&profile, &job, &vocab);
        assert_eq!(result.breakdown.similarity, 0);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn test_total_is_clamped_to_100() {
        let job = JobDescription {
            required_education: "Fundamental".to_string(),
            required_skills: vec!["python".into(), "sql".into(), "rust".into()],
            preferred_skills: vec![
                "go".into(),
                "java".into(),
                "kotlin".into(),
                "scala".into(),
                "swift".into(),
            ],
            min_years_experience: 0,
            notes: String::new(),
        };
        let profile = Profile {
            skills: "python, sql, rust, go, java, kotlin, scala, swift".to_string(),
            education: "Doutorado".to_string(),
            years_experience: 20,
            ..Default::default()
        };
        let vocab = build_vocabulary(&job, std::slice::from_ref(&profile));
        let result = score_profile(&profile, &job, &vocab);
        assert!(result.breakdown.sum() > 70);
        assert_eq!(result.score, result.breakdown.sum().min(100));
        assert!(result.score <= 100);
    }

    #[test]
    fn test_rubric_scorer_delegates_to_score_profile() {
        let job = analyst_job();
        let vocab = build_vocabulary(&job, &[profile_a()]);
        let via_trait = RubricScorer.score(&profile_a(), &job, &vocab);
        assert_eq!(via_trait, score_profile(&profile_a(), &job, &vocab));
        assert_eq!(RubricScorer.backend(), "rubric");
    }
}
