//! Vocabulary Builder: TF-IDF term weighting over one batch of documents.
//!
//! The corpus is the job document followed by one document per profile.
//! Weights follow the classic vectoriser defaults:
//! - tokens: runs of ≥2 Unicode word characters, lowercased, stop-words removed
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - weight = raw count × idf, then L2-normalised per document
//!
//! A degenerate corpus (every document blank or only stop-words) yields an
//! empty vocabulary. That is not an error here; similarity degrades to 0
//! downstream.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::JobDescription;
use crate::models::profile::Profile;
use crate::scoring::stop_words::is_stop_word;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("empty vocabulary; the batch only contains stop-words or blank text")]
    EmptyVocabulary,

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Lowercases and splits text into vocabulary candidates.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Sparse, L2-normalised term vector. Entries are sorted by term index.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Cosine similarity, clamped to [0, 1]. Zero vectors score 0.
    pub fn cosine(&self, other: &TermVector) -> Result<f64, SimilarityError> {
        if self.dimension != other.dimension {
            return Err(SimilarityError::DimensionMismatch {
                expected: self.dimension,
                actual: other.dimension,
            });
        }

        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            return Ok(0.0);
        }

        let mut dot = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        Ok((dot / denominator).clamp(0.0, 1.0))
    }
}

/// Fitted term index and inverse-document-frequency weights.
#[derive(Debug, Clone, Default)]
pub struct TermWeights {
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TermWeights {
    /// Fits term weights over `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<BTreeSet<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()).into_iter().collect())
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &tokenized {
            for term in terms {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut index = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        // BTreeMap iteration gives sorted, deterministic term indices.
        for (position, (term, df)) in document_frequency.into_iter().enumerate() {
            index.insert(term.to_string(), position);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { index, idf }
    }

    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    #[cfg(test)]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index.get(term).map(|&i| self.idf[i])
    }

    /// Projects a document into the fitted space. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> Result<TermVector, SimilarityError> {
        if self.is_empty() {
            return Err(SimilarityError::EmptyVocabulary);
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&i) = self.index.get(&token) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = TermVector::zeros(self.len());
        vector.entries = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();

        let norm = vector.norm();
        if norm > 0.0 {
            for (_, w) in vector.entries.iter_mut() {
                *w /= norm;
            }
        }
        Ok(vector)
    }
}

/// Term weights fitted on one batch, plus the job document's vector.
#[derive(Debug, Clone)]
pub struct FittedVocabulary {
    pub weights: TermWeights,
    pub job_vector: TermVector,
}

impl FittedVocabulary {
    /// Cosine similarity between a profile document and the job document.
    pub fn similarity(&self, document: &str) -> Result<f64, SimilarityError> {
        let vector = self.weights.transform(document)?;
        self.job_vector.cosine(&vector)
    }
}

/// Builds the shared vocabulary for a batch. The job document is always
/// corpus entry 0. Never fails: an empty vocabulary yields a zero job vector.
pub fn build_vocabulary(job: &JobDescription, profiles: &[Profile]) -> FittedVocabulary {
    let mut corpus = Vec::with_capacity(profiles.len() + 1);
    corpus.push(job.document());
    corpus.extend(profiles.iter().map(Profile::document));

    let weights = TermWeights::fit(corpus.as_slice());
    let job_vector = weights
        .transform(&corpus[0])
        .unwrap_or_else(|_| TermVector::zeros(weights.len()));

    if job_vector.is_zero() {
        warn!(
            documents = corpus.len(),
            terms = weights.len(),
            "job document has no weighted terms; similarity will score 0"
        );
    } else {
        debug!(
            documents = corpus.len(),
            terms = weights.len(),
            "vocabulary fitted"
        );
    }

    FittedVocabulary {
        weights,
        job_vector,
    }
}
