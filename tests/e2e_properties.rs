//! Property tests for the metric engine over the full 64 × 64 code space.

use king_wen_metrics::engine::{
    hamming_distance, surprise_from_similarity, trigram_distance, SIMILARITY_CEILING,
    SIMILARITY_FLOOR,
};
use king_wen_metrics::{
    nuclear_distance, pattern_similarity, surprise, transition_metrics, Code,
};
use proptest::prelude::*;

/// Every ordered pair of codes, 4096 in all.
fn all_pairs() -> impl Iterator<Item = (Code, Code)> {
    (0u8..64).flat_map(|x| (0u8..64).map(move |y| (Code::from_bits(x), Code::from_bits(y))))
}

// ============================================================================
// Exhaustive: the code space is small enough to check every pair
// ============================================================================

#[test]
fn identity_has_zero_distance() {
    for a in (0u8..64).map(Code::from_bits) {
        assert_eq!(transition_metrics(a, a).as_tuple(), (0, 0, 0));
        assert_eq!(pattern_similarity(a, a), SIMILARITY_CEILING, "{a}");
    }
}

#[test]
fn distances_are_symmetric() {
    for (a, b) in all_pairs() {
        assert_eq!(nuclear_distance(a, b), nuclear_distance(b, a));
        assert_eq!(hamming_distance(a, b), hamming_distance(b, a));
    }
}

#[test]
fn trigram_distance_equals_hamming() {
    for (a, b) in all_pairs() {
        let d = transition_metrics(a, b);
        assert_eq!(d.trigram, d.hamming);
        assert_eq!(trigram_distance(a, b), hamming_distance(a, b));
    }
}

#[test]
fn distances_stay_in_range() {
    for (a, b) in all_pairs() {
        let d = transition_metrics(a, b);
        assert!(d.hamming <= 6);
        assert!(d.nuclear <= 4);
        assert!(d.nuclear <= d.hamming, "{a} → {b}");
    }
}

#[test]
fn similarity_is_clamped() {
    for (a, b) in all_pairs() {
        let s = pattern_similarity(a, b);
        assert!((SIMILARITY_FLOOR..=SIMILARITY_CEILING).contains(&s), "{a} → {b}: {s}");
    }
}

#[test]
fn surprise_is_bounded() {
    for (a, b) in all_pairs() {
        let u = surprise(a, b).unwrap();
        assert!(u >= -(SIMILARITY_CEILING.ln()) - 1e-12);
        assert!(u <= -(SIMILARITY_FLOOR.ln()) + 1e-12);
    }
}

#[test]
fn surprise_decreases_as_similarity_grows() {
    let mut points: Vec<(f64, f64)> = all_pairs()
        .map(|(a, b)| (pattern_similarity(a, b), surprise(a, b).unwrap()))
        .collect();
    points.sort_by(|l, r| l.0.total_cmp(&r.0));
    for pair in points.windows(2) {
        let ((s1, u1), (s2, u2)) = (pair[0], pair[1]);
        if s1 < s2 {
            assert!(u1 > u2, "similarity {s1} < {s2} but surprise {u1} <= {u2}");
        } else {
            assert_eq!(u1, u2);
        }
    }
}

// ============================================================================
// Sampled: surprise over the continuous similarity band
// ============================================================================

proptest! {
    #[test]
    fn surprise_is_monotone_across_the_band(
        x in SIMILARITY_FLOOR..=SIMILARITY_CEILING,
        y in SIMILARITY_FLOOR..=SIMILARITY_CEILING,
    ) {
        let (ux, uy) = (surprise_from_similarity(x).unwrap(), surprise_from_similarity(y).unwrap());
        // Non-strict: neighbouring floats may share a rounded logarithm
        if x <= y {
            prop_assert!(ux >= uy);
        } else {
            prop_assert!(ux <= uy);
        }
    }
}

#[test]
fn extremal_pair_stays_in_band() {
    let zeros: Code = "000000".parse().unwrap();
    let ones: Code = "111111".parse().unwrap();
    for (a, b) in [(zeros, ones), (ones, zeros)] {
        let s = pattern_similarity(a, b);
        assert!((SIMILARITY_FLOOR..=SIMILARITY_CEILING).contains(&s));
    }
}

#[test]
fn similarity_is_not_symmetric() {
    // Position 5 falls a → b but rises b → a
    let a: Code = "000001".parse().unwrap();
    let b: Code = "000000".parse().unwrap();
    assert_eq!((a.line(5), b.line(5)), (Some(true), Some(false)));
    assert!(pattern_similarity(a, b) > pattern_similarity(b, a));

    let asymmetric = all_pairs()
        .filter(|&(x, y)| pattern_similarity(x, y) != pattern_similarity(y, x))
        .count();
    assert!(asymmetric > 0);
}
