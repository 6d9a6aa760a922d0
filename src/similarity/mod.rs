/*!
# Similarity Engine

Scores two code bodies along three dimensions and combines them:

- **text** - ratio over the raw character sequences
- **structural** - ratio over the structural fingerprints
- **normalized** - ratio over the normalizer outputs

`overall = round4(0.3 * text + 0.4 * structural + 0.3 * normalized)`.
A fingerprint that cannot be produced (syntax error) scores the structural
component 0 instead of failing the comparison.
*/

pub mod matcher;
pub mod normalizer;
pub mod structure;

pub use matcher::{matching_blocks, sequence_ratio, text_ratio, MatchingBlock, SequenceMatcher};
pub use normalizer::normalize;
pub use structure::{
    extract_structure, ExtractOutcome, ExtractorRegistry, Fingerprint, PythonStructureExtractor,
    StructuralExtractor,
};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Language;

pub const TEXT_WEIGHT: f64 = 0.3;
pub const STRUCTURAL_WEIGHT: f64 = 0.4;
pub const NORMALIZED_WEIGHT: f64 = 0.3;

/// Severity band of an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    NearIdentical,
}

impl SimilarityLevel {
    /// Band containing `score`; lower bounds are inclusive
    pub fn from_score(score: f64) -> Self {
        if score >= 0.90 {
            SimilarityLevel::NearIdentical
        } else if score >= 0.75 {
            SimilarityLevel::High
        } else if score >= 0.50 {
            SimilarityLevel::Moderate
        } else if score >= 0.30 {
            SimilarityLevel::Low
        } else {
            SimilarityLevel::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimilarityLevel::NearIdentical => "near-identical",
            SimilarityLevel::High => "high, possible plagiarism",
            SimilarityLevel::Moderate => "moderate, needs review",
            SimilarityLevel::Low => "low, acceptable",
            SimilarityLevel::VeryLow => "very low, original work",
        }
    }
}

impl fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Similarity between two submissions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub overall: f64,
    pub text_similarity: f64,
    pub structural_similarity: f64,
    pub normalized_similarity: f64,
    pub level: SimilarityLevel,
}

impl SimilarityScore {
    /// Combines components; each is clamped to [0, 1] first
    pub fn from_components(text: f64, structural: f64, normalized: f64) -> Self {
        let text = text.clamp(0.0, 1.0);
        let structural = structural.clamp(0.0, 1.0);
        let normalized = normalized.clamp(0.0, 1.0);
        let overall = round4(TEXT_WEIGHT * text + STRUCTURAL_WEIGHT * structural + NORMALIZED_WEIGHT * normalized);

        Self {
            overall,
            text_similarity: text,
            structural_similarity: structural,
            normalized_similarity: normalized,
            level: SimilarityLevel::from_score(overall),
        }
    }

    pub fn details(&self) -> &'static str {
        self.level.label()
    }
}

/// Rounds to 4 decimal digits
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Computes similarity scores using a set of structural extractors
#[derive(Clone, Default)]
pub struct SimilarityEngine {
    extractors: ExtractorRegistry,
}

impl SimilarityEngine {
    pub fn new() -> Self {
        Self {
            extractors: ExtractorRegistry::new(),
        }
    }

    pub fn with_extractors(extractors: ExtractorRegistry) -> Self {
        Self { extractors }
    }

    pub fn extractors(&self) -> &ExtractorRegistry {
        &self.extractors
    }

    /// Scores `code_a` against `code_b` under `language` rules
    pub fn similarity(&self, code_a: &str, code_b: &str, language: &Language) -> SimilarityScore {
        let text = text_ratio(code_a, code_b);
        let structural = self.structural_similarity(code_a, code_b, language);
        let normalized = text_ratio(&normalize(code_a, language), &normalize(code_b, language));

        let score = SimilarityScore::from_components(text, structural, normalized);
        tracing::debug!(
            language = %language,
            overall = score.overall,
            text = score.text_similarity,
            structural = score.structural_similarity,
            normalized = score.normalized_similarity,
            "similarity computed"
        );
        score
    }

    pub fn structural_similarity(&self, code_a: &str, code_b: &str, language: &Language) -> f64 {
        let fingerprint_a = self.extractors.extract(code_a, language);
        let fingerprint_b = self.extractors.extract(code_b, language);

        match (fingerprint_a, fingerprint_b) {
            (Ok(Fingerprint::Symbols(a)), Ok(Fingerprint::Symbols(b))) => text_ratio(&a.join("|"), &b.join("|")),
            (Ok(Fingerprint::Tokens(a)), Ok(Fingerprint::Tokens(b))) => sequence_ratio(&a, &b),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(language = %language, error = %e, "structural fingerprint unavailable, scoring 0");
                0.0
            }
            // one registry answers per language, so kinds only differ for
            // extractors that decline some inputs and accept others
            (Ok(a), Ok(b)) => {
                let a = fingerprint_items(a);
                let b = fingerprint_items(b);
                sequence_ratio(&a, &b)
            }
        }
    }

    /// Matched character blocks longer than `min_size`
    pub fn matching_blocks(&self, code_a: &str, code_b: &str, min_size: usize) -> Vec<MatchingBlock> {
        matching_blocks(code_a, code_b, min_size)
    }
}

fn fingerprint_items(fingerprint: Fingerprint) -> Vec<String> {
    match fingerprint {
        Fingerprint::Symbols(items) | Fingerprint::Tokens(items) => items,
    }
}

/// Similarity using the default extractors
pub fn similarity(code_a: &str, code_b: &str, language: &Language) -> SimilarityScore {
    SimilarityEngine::new().similarity(code_a, code_b, language)
}
