use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::lenient;

/// Upper bound on the minimum-experience field, matching the job form.
pub const MAX_REQUIRED_YEARS: i64 = 50;

/// Fixed six-level education scale used for minimum-qualification checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    Fundamental,
    Medio,
    Superior,
    PosGraduacao,
    Mestrado,
    Doutorado,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::Fundamental,
        EducationLevel::Medio,
        EducationLevel::Superior,
        EducationLevel::PosGraduacao,
        EducationLevel::Mestrado,
        EducationLevel::Doutorado,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Fundamental => "Fundamental",
            EducationLevel::Medio => "Médio",
            EducationLevel::Superior => "Superior",
            EducationLevel::PosGraduacao => "Pós-graduação",
            EducationLevel::Mestrado => "Mestrado",
            EducationLevel::Doutorado => "Doutorado",
        }
    }

    /// Ordinal position on the scale, Fundamental = 0 … Doutorado = 5.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Matches a label, ignoring surrounding whitespace and case.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == wanted)
    }

    /// Rank of a free-text label; unrecognised labels rank lowest.
    pub fn rank_of(label: &str) -> u8 {
        Self::from_label(label).map(Self::rank).unwrap_or(0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum JobValidationError {
    #[error("grau_escolaridade '{0}' is not one of: Fundamental, Médio, Superior, Pós-graduação, Mestrado, Doutorado")]
    UnknownEducation(String),

    #[error("tempo_experiencia must be between 0 and 50, got {0}")]
    ExperienceOutOfRange(i64),
}

/// The job opening every profile in a run is scored against.
///
/// Field names on the wire follow the persisted `vaga.json` layout; English
/// aliases are accepted on input. Skill fields accept a list or a single
/// comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(
        rename = "grau_escolaridade",
        alias = "required_education",
        default,
        deserialize_with = "lenient::text"
    )]
    pub required_education: String,

    #[serde(
        rename = "conhecimentos_obrigatorios",
        alias = "required_skills",
        default,
        deserialize_with = "lenient::term_list"
    )]
    pub required_skills: Vec<String>,

    #[serde(
        rename = "conhecimentos_desejados",
        alias = "preferred_skills",
        default,
        deserialize_with = "lenient::term_list"
    )]
    pub preferred_skills: Vec<String>,

    #[serde(
        rename = "tempo_experiencia",
        alias = "min_years_experience",
        default,
        deserialize_with = "lenient::years"
    )]
    pub min_years_experience: i64,

    #[serde(
        rename = "outras_observacoes",
        alias = "notes",
        default,
        deserialize_with = "lenient::text"
    )]
    pub notes: String,
}

impl JobDescription {
    /// Text the job contributes to the term-weighting corpus:
    /// notes followed by preferred and required skill terms.
    pub fn document(&self) -> String {
        let terms: Vec<&str> = self
            .preferred_skills
            .iter()
            .chain(self.required_skills.iter())
            .map(String::as_str)
            .collect();
        format!("{} {}", self.notes, terms.join(" "))
    }

    /// Checks the constraints the job form enforces before a description is saved.
    pub fn validate(&self) -> Result<(), JobValidationError> {
        if EducationLevel::from_label(&self.required_education).is_none() {
            return Err(JobValidationError::UnknownEducation(
                self.required_education.clone(),
            ));
        }
        if !(0..=MAX_REQUIRED_YEARS).contains(&self.min_years_experience) {
            return Err(JobValidationError::ExperienceOutOfRange(
                self.min_years_experience,
            ));
        }
        Ok(())
    }
}
