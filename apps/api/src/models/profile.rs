use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// One candidate record from a dataset. Read-only input to scoring.
///
/// Wire names follow the dataset columns (`nome`, `habilidades`, …);
/// English aliases are accepted. Missing values normalise to empty / zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,

    #[serde(rename = "nome", alias = "name", default, deserialize_with = "lenient::text")]
    pub name: String,

    /// Comma-separated skill list.
    #[serde(
        rename = "habilidades",
        alias = "skills",
        default,
        deserialize_with = "lenient::text"
    )]
    pub skills: String,

    #[serde(
        rename = "educacao",
        alias = "education",
        default,
        deserialize_with = "lenient::text"
    )]
    pub education: String,

    #[serde(
        rename = "experiencia_anos",
        alias = "years_experience",
        default,
        deserialize_with = "lenient::years"
    )]
    pub years_experience: i64,

    #[serde(
        rename = "resumo",
        alias = "summary",
        default,
        deserialize_with = "lenient::text"
    )]
    pub summary: String,
}

impl Profile {
    /// Name if present, otherwise the profile URL.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.url
        } else {
            &self.name
        }
    }

    /// Skill terms, lowercased and trimmed.
    pub fn skill_terms(&self) -> Vec<String> {
        lenient::split_terms(&self.skills)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Text the profile contributes to the term-weighting corpus.
    pub fn document(&self) -> String {
        format!("{} {}", self.summary, self.skills)
    }
}
