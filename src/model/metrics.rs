//! Metric records produced per transition, and their column-wise series.

use serde::{Deserialize, Serialize};

use super::Code;

/// The three integer distances between two codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionDistances {
    /// Differing lines over all six positions (0..=6).
    pub hamming: u32,
    /// Differing lines upper-vs-upper plus lower-vs-lower trigram (0..=6).
    pub trigram: u32,
    /// Differing lines in the inner four positions (0..=4).
    pub nuclear: u32,
}

impl TransitionDistances {
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.hamming, self.trigram, self.nuclear)
    }
}

/// Everything computed for one ordered pair `(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMetrics {
    /// Position of `from` in the source sequence.
    pub index: usize,
    pub from: Code,
    pub to: Code,
    pub hamming: u32,
    pub trigram: u32,
    pub nuclear: u32,
    /// Clamped pattern similarity in [floor, ceiling].
    pub similarity: f64,
    /// `-ln(similarity)`.
    pub surprise: f64,
}

impl TransitionMetrics {
    pub fn distances(&self) -> TransitionDistances {
        TransitionDistances {
            hamming: self.hamming,
            trigram: self.trigram,
            nuclear: self.nuclear,
        }
    }
}

/// Selects one column of a [`MetricSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Hamming,
    Trigram,
    Nuclear,
    Similarity,
    Surprise,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Hamming,
        Metric::Trigram,
        Metric::Nuclear,
        Metric::Similarity,
        Metric::Surprise,
    ];

    /// Column name, matching the serialized field of [`MetricSeries`].
    pub fn name(self) -> &'static str {
        match self {
            Metric::Hamming => "hamming_distances",
            Metric::Trigram => "trigram_distances",
            Metric::Nuclear => "nuclear_distances",
            Metric::Similarity => "pattern_similarities",
            Metric::Surprise => "surprises",
        }
    }
}

/// Five index-aligned sequences, one entry per transition.
///
/// This is the hand-off to the rendering collaborator: entry `i` of every
/// vector belongs to transition `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub hamming_distances: Vec<u32>,
    pub trigram_distances: Vec<u32>,
    pub nuclear_distances: Vec<u32>,
    pub pattern_similarities: Vec<f64>,
    pub surprises: Vec<f64>,
}

impl MetricSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hamming_distances: Vec::with_capacity(capacity),
            trigram_distances: Vec::with_capacity(capacity),
            nuclear_distances: Vec::with_capacity(capacity),
            pattern_similarities: Vec::with_capacity(capacity),
            surprises: Vec::with_capacity(capacity),
        }
    }

    /// Append one transition to every column.
    pub fn push(&mut self, m: &TransitionMetrics) {
        self.hamming_distances.push(m.hamming);
        self.trigram_distances.push(m.trigram);
        self.nuclear_distances.push(m.nuclear);
        self.pattern_similarities.push(m.similarity);
        self.surprises.push(m.surprise);
    }

    pub fn len(&self) -> usize {
        self.hamming_distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One column widened to `f64`, for plotting.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        match metric {
            Metric::Hamming => widen(&self.hamming_distances),
            Metric::Trigram => widen(&self.trigram_distances),
            Metric::Nuclear => widen(&self.nuclear_distances),
            Metric::Similarity => self.pattern_similarities.clone(),
            Metric::Surprise => self.surprises.clone(),
        }
    }
}

fn widen(xs: &[u32]) -> Vec<f64> {
    xs.iter().map(|&x| f64::from(x)).collect()
}

impl<'a> FromIterator<&'a TransitionMetrics> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = &'a TransitionMetrics>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut series = Self::with_capacity(iter.size_hint().0);
        for m in iter {
            series.push(m);
        }
        series
    }
}

impl FromIterator<TransitionMetrics> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = TransitionMetrics>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut series = Self::with_capacity(iter.size_hint().0);
        for m in iter {
            series.push(&m);
        }
        series
    }
}
