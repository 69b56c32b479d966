//! # Metric Engine: distance, similarity, surprise between two codes
//!
//! All functions are pure and operate on validated six-line [`Code`]s.
//!
//! ```text
//! position:   0     1     2     3     4     5
//!            ├── upper trigram ─┤├── lower trigram ─┤
//!                  ├──── nuclear window ────┤
//! weight:   0.03  0.07  0.15  0.20  0.25  0.30
//! ```
//!
//! # Distances
//!
//! | Metric  | Window            | Range  |
//! |---------|-------------------|--------|
//! | Hamming | all six lines     | 0..=6  |
//! | Trigram | upper + lower     | 0..=6  |
//! | Nuclear | positions 1..=4   | 0..=4  |
//!
//! Trigram distance always equals Hamming distance for six-line codes. It is
//! still computed from the two halves, because it is plotted as its own
//! series.
//!
//! # Pattern similarity
//!
//! Direction-sensitive: a line falling from `1` to `0` (read as `a → b`) costs
//! `0.7 × weight`, any other change costs the full weight. The line term is
//! blended 60/40 with nuclear agreement and clamped to `[0.1, 0.9]`.
//! Surprise is `-ln(similarity)`.

use serde::{Deserialize, Serialize};

use crate::model::code::line_mask;
use crate::model::{Code, TransitionDistances, LINES};
use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Per-position penalty for a differing line. Later lines weigh more.
pub const LINE_WEIGHTS: [f64; LINES] = [0.03, 0.07, 0.15, 0.20, 0.25, 0.30];

/// Multiplier applied to a line that changes `1 → 0`.
pub const FALLING_LINE_FACTOR: f64 = 0.7;

/// Share of the nuclear term in the blended similarity.
pub const NUCLEAR_WEIGHT: f64 = 0.4;

/// Hard lower bound for pattern similarity.
pub const SIMILARITY_FLOOR: f64 = 0.1;

/// Hard upper bound for pattern similarity.
pub const SIMILARITY_CEILING: f64 = 0.9;

/// Number of lines in the nuclear window.
pub const NUCLEAR_LINES: u32 = 4;

// ============================================================================
// Parameters
// ============================================================================

/// Coefficients of [`pattern_similarity_with`].
///
/// [`SimilarityParams::CANONICAL`] is the reference metric set; everything
/// that does not take explicit params uses it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityParams {
    pub line_weights: [f64; LINES],
    pub falling_line_factor: f64,
    pub nuclear_weight: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl SimilarityParams {
    pub const CANONICAL: Self = Self {
        line_weights: LINE_WEIGHTS,
        falling_line_factor: FALLING_LINE_FACTOR,
        nuclear_weight: NUCLEAR_WEIGHT,
        floor: SIMILARITY_FLOOR,
        ceiling: SIMILARITY_CEILING,
    };

    /// Reject parameter sets that would let surprise leave its domain or
    /// make the clamp meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.floor > 0.0 && self.floor.is_finite()) {
            return Err(Error::InvalidParams(format!(
                "floor must be finite and > 0, got {}",
                self.floor
            )));
        }
        if !(self.ceiling.is_finite() && self.floor <= self.ceiling) {
            return Err(Error::InvalidParams(format!(
                "floor {} must not exceed ceiling {}",
                self.floor, self.ceiling
            )));
        }
        if !(0.0..=1.0).contains(&self.nuclear_weight) {
            return Err(Error::InvalidParams(format!(
                "nuclear_weight must be in [0, 1], got {}",
                self.nuclear_weight
            )));
        }
        if self.line_weights.iter().any(|w| !w.is_finite())
            || !self.falling_line_factor.is_finite()
        {
            return Err(Error::InvalidParams("line weights must be finite".into()));
        }
        Ok(())
    }
}

impl Default for SimilarityParams {
    fn default() -> Self {
        Self::CANONICAL
    }
}

// ============================================================================
// Distances
// ============================================================================

/// Differing lines over all six positions.
#[inline]
pub fn hamming_distance(a: Code, b: Code) -> u32 {
    (a.bits() ^ b.bits()).count_ones()
}

/// Differing lines within the upper trigrams plus within the lower trigrams.
#[inline]
pub fn trigram_distance(a: Code, b: Code) -> u32 {
    let upper = (a.upper_trigram() ^ b.upper_trigram()).count_ones();
    let lower = (a.lower_trigram() ^ b.lower_trigram()).count_ones();
    upper + lower
}

/// Differing lines in the inner four positions (1..=4).
#[inline]
pub fn nuclear_distance(a: Code, b: Code) -> u32 {
    (a.nuclear() ^ b.nuclear()).count_ones()
}

/// Hamming, trigram and nuclear distance for `a → b`.
pub fn transition_metrics(a: Code, b: Code) -> TransitionDistances {
    TransitionDistances {
        hamming: hamming_distance(a, b),
        trigram: trigram_distance(a, b),
        nuclear: nuclear_distance(a, b),
    }
}

// ============================================================================
// Similarity
// ============================================================================

/// Intermediate terms of one similarity computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    /// Sum of per-line penalties.
    pub line_penalty: f64,
    /// `1 - line_penalty`.
    pub raw_similarity: f64,
    /// `1 - nuclear_distance / 4`.
    pub nuclear_similarity: f64,
    /// Blended value before clamping.
    pub unclamped: f64,
    /// Final value in `[floor, ceiling]`.
    pub similarity: f64,
}

impl SimilarityBreakdown {
    pub fn is_clamped(&self) -> bool {
        self.unclamped != self.similarity
    }
}

/// Penalty contributed by each differing line, summed in position order.
fn line_penalty(a: Code, b: Code, params: &SimilarityParams) -> f64 {
    let diff = a.bits() ^ b.bits();
    let mut penalty = 0.0;
    for (position, &weight) in params.line_weights.iter().enumerate() {
        let mask = line_mask(position);
        if diff & mask == 0 {
            continue;
        }
        let falling = a.bits() & mask != 0;
        penalty += if falling {
            params.falling_line_factor * weight
        } else {
            weight
        };
    }
    penalty
}

/// Full similarity computation with every intermediate term exposed.
pub fn similarity_breakdown(a: Code, b: Code, params: &SimilarityParams) -> SimilarityBreakdown {
    let line_penalty = line_penalty(a, b, params);
    let nuclear_similarity = 1.0 - (nuclear_distance(a, b) as f64 / NUCLEAR_LINES as f64);
    let raw_similarity = 1.0 - line_penalty;
    let unclamped =
        (1.0 - params.nuclear_weight) * raw_similarity + params.nuclear_weight * nuclear_similarity;
    // min/max rather than f64::clamp: clamp panics when floor > ceiling
    let similarity = unclamped.min(params.ceiling).max(params.floor);

    if similarity != unclamped {
        tracing::trace!(%a, %b, unclamped, similarity, "similarity clamped");
    }

    SimilarityBreakdown {
        line_penalty,
        raw_similarity,
        nuclear_similarity,
        unclamped,
        similarity,
    }
}

/// Direction-sensitive similarity of `a → b` in `[0.1, 0.9]`.
pub fn pattern_similarity(a: Code, b: Code) -> f64 {
    pattern_similarity_with(a, b, &SimilarityParams::CANONICAL)
}

/// [`pattern_similarity`] with explicit coefficients.
pub fn pattern_similarity_with(a: Code, b: Code, params: &SimilarityParams) -> f64 {
    similarity_breakdown(a, b, params).similarity
}

// ============================================================================
// Surprise
// ============================================================================

/// `-ln(similarity)`, refusing similarities outside the log's domain.
pub fn surprise_from_similarity(similarity: f64) -> Result<f64> {
    if !(similarity > 0.0 && similarity.is_finite()) {
        return Err(Error::LogDomain(similarity));
    }
    Ok(-similarity.ln())
}

/// Surprise of `a → b` under the canonical coefficients.
pub fn surprise(a: Code, b: Code) -> Result<f64> {
    surprise_with(a, b, &SimilarityParams::CANONICAL)
}

/// [`surprise`] with explicit coefficients.
pub fn surprise_with(a: Code, b: Code, params: &SimilarityParams) -> Result<f64> {
    surprise_from_similarity(pattern_similarity_with(a, b, params))
}

// ============================================================================
// Tests
// ============================================================================
