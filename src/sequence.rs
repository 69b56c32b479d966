//! King Wen sequence driver.
//!
//! Holds the canonical ordering of the 64 hexagrams and walks it pairwise,
//! collecting one [`TransitionMetrics`] per adjacent pair.
//!
//! ```text
//! codes:        c0 ── c1 ── c2 ── … ── c63
//! transitions:     t0    t1    …    t62
//! ```

use crate::engine::{self, SimilarityParams};
use crate::model::{Code, MetricSeries, TransitionMetrics};
use crate::Result;

// ============================================================================
// Canonical table
// ============================================================================

/// Number of hexagrams in the King Wen sequence.
pub const KING_WEN_LEN: usize = 64;

/// The King Wen sequence, one six-line literal per hexagram, in order.
pub static KING_WEN_TABLE: [&str; KING_WEN_LEN] = [
    "111111", "000000", "100010", "010001", "111010", "010111",
    "010000", "000010", "111011", "110111", "111000", "000111",
    "101111", "111101", "001000", "000100", "100110", "011001",
    "110000", "000011", "100101", "101001", "000001", "100000",
    "100111", "111001", "100001", "011110", "101000", "000101",
    "100011", "110100", "111100", "001111", "110001", "100011",
    "111110", "011111", "111100", "001100", "001011", "010100",
    "010110", "011010", "101101", "110110", "110101", "101011",
    "011011", "011000", "101010", "010101", "011001", "100110",
    "100010", "010001", "010011", "110010", "110011", "001110",
    "101111", "111101", "011011", "011000",
];

/// Parse [`KING_WEN_TABLE`] into codes.
pub fn king_wen_sequence() -> Result<Vec<Code>> {
    KING_WEN_TABLE.iter().map(|s| s.parse()).collect()
}

// ============================================================================
// Transitions
// ============================================================================

/// An ordered adjacent pair `(codes[index], codes[index + 1])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub index: usize,
    pub from: Code,
    pub to: Code,
}

/// Consecutive pairs of `codes`, in order. Empty for fewer than two codes.
pub fn transitions(codes: &[Code]) -> impl Iterator<Item = Transition> + '_ {
    codes.windows(2).enumerate().map(|(index, pair)| Transition {
        index,
        from: pair[0],
        to: pair[1],
    })
}

/// All metrics for one transition.
pub fn analyze_transition(t: Transition, params: &SimilarityParams) -> Result<TransitionMetrics> {
    let distances = engine::transition_metrics(t.from, t.to);
    let similarity = engine::pattern_similarity_with(t.from, t.to, params);
    let surprise = engine::surprise_from_similarity(similarity)?;

    tracing::debug!(
        index = t.index,
        from = %t.from,
        to = %t.to,
        hamming = distances.hamming,
        nuclear = distances.nuclear,
        similarity,
        surprise,
        "transition"
    );

    Ok(TransitionMetrics {
        index: t.index,
        from: t.from,
        to: t.to,
        hamming: distances.hamming,
        trigram: distances.trigram,
        nuclear: distances.nuclear,
        similarity,
        surprise,
    })
}

/// Per-transition records for `codes`, index-aligned with [`transitions`].
pub fn analyze_transitions(
    codes: &[Code],
    params: &SimilarityParams,
) -> Result<Vec<TransitionMetrics>> {
    params.validate()?;
    transitions(codes)
        .map(|t| analyze_transition(t, params))
        .collect()
}

// ============================================================================
// Series
// ============================================================================

/// Walk `codes` pairwise with the canonical coefficients.
pub fn analyze_sequence(codes: &[Code]) -> Result<MetricSeries> {
    analyze_sequence_with(codes, &SimilarityParams::CANONICAL)
}

/// Walk `codes` pairwise with explicit coefficients.
pub fn analyze_sequence_with(codes: &[Code], params: &SimilarityParams) -> Result<MetricSeries> {
    let records = analyze_transitions(codes, params)?;
    let series: MetricSeries = records.iter().collect();

    tracing::info!(
        codes = codes.len(),
        transitions = series.len(),
        clamped = clamped_count(&records, params),
        "sequence analyzed"
    );

    Ok(series)
}

/// Transitions whose similarity was moved by the floor or ceiling. A value
/// that lands exactly on a bound without clamping is not counted.
fn clamped_count(records: &[TransitionMetrics], params: &SimilarityParams) -> usize {
    records
        .iter()
        .filter(|m| engine::similarity_breakdown(m.from, m.to, params).is_clamped())
        .count()
}

/// The canonical run: every transition of the King Wen sequence.
pub fn analyze_king_wen() -> Result<MetricSeries> {
    analyze_sequence(&king_wen_sequence()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_parses_to_64_codes() {
        let codes = king_wen_sequence().unwrap();
        assert_eq!(codes.len(), KING_WEN_LEN);
        assert_eq!(codes[0].to_string(), "111111");
        assert_eq!(codes[1].to_string(), "000000");
        assert_eq!(codes[63].to_string(), "011000");
    }

    #[test]
    fn transitions_pair_neighbours() {
        let codes = king_wen_sequence().unwrap();
        let ts: Vec<_> = transitions(&codes).collect();
        assert_eq!(ts.len(), 63);
        assert_eq!(ts[0].from, codes[0]);
        assert_eq!(ts[0].to, codes[1]);
        assert_eq!(ts[62].index, 62);
        assert_eq!(ts[62].to, codes[63]);
    }

    #[test]
    fn short_inputs_have_no_transitions() {
        assert_eq!(transitions(&[]).count(), 0);
        assert_eq!(transitions(&[Code::from_bits(7)]).count(), 0);
        let series = analyze_sequence(&[Code::from_bits(7)]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn canonical_run_clamps_five_transitions_at_the_floor() {
        let codes = king_wen_sequence().unwrap();
        let params = SimilarityParams::CANONICAL;
        let records = analyze_transitions(&codes, &params).unwrap();
        assert_eq!(clamped_count(&records, &params), 5);
    }

    #[test]
    fn value_exactly_on_the_floor_is_not_clamped() {
        let (a, b) = (Code::from_bits(0b111111), Code::from_bits(0));
        let unclamped = engine::similarity_breakdown(a, b, &SimilarityParams::CANONICAL).unclamped;

        let on_floor = SimilarityParams { floor: unclamped, ..Default::default() };
        let records = analyze_transitions(&[a, b], &on_floor).unwrap();
        assert_eq!(records[0].similarity, on_floor.floor);
        assert_eq!(clamped_count(&records, &on_floor), 0);

        let above = SimilarityParams { floor: unclamped + 0.01, ..Default::default() };
        let records = analyze_transitions(&[a, b], &above).unwrap();
        assert_eq!(clamped_count(&records, &above), 1);
    }

    #[test]
    fn invalid_params_are_rejected_before_walking() {
        let codes = king_wen_sequence().unwrap();
        let params = SimilarityParams { floor: -1.0, ..Default::default() };
        assert!(analyze_sequence_with(&codes, &params).is_err());
    }
}
