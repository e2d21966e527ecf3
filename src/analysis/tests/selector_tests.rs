//! Tests for tie-aware best-match selection

use super::*;
use crate::analysis::selector::{Policy, select_best_matches, select_best_matches_in};
use crate::error::{AnalysisError, ErrorKind};

#[test]
fn test_max_returns_all_tied_records() {
    let records = weather_with_spreads(&[10.0, 30.0, 30.0]);

    let matches = select_best_matches(Some(records.as_slice()), Policy::Max).unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches.ids(), vec!["2", "3"]);
    assert_eq!(matches.best_score(), 30.0);
    assert_eq!(matches.policy(), Policy::Max);
}

#[test]
fn test_min_spread_with_tie() {
    let document = Document::new(vec![
        weather("1", 10.0, 5.0),
        weather("2", 7.0, 2.0),
        weather("3", 50.0, 20.0),
    ]);

    let matches = select_best_matches_in(&document, Policy::Min).unwrap();

    assert_eq!(sorted(matches.ids()), vec!["1", "2"]);
    assert_eq!(matches.best_score(), 5.0);
}

#[test]
fn test_max_density() {
    let document = Document::new(vec![
        country("Germany", 1_463_865_525, 3_287_000.0),
        country("Italy", 50, 4.0),
    ]);

    let matches = select_best_matches_in(&document, Policy::Max).unwrap();

    assert_eq!(matches.ids(), vec!["Germany"]);
    assert!((matches.best_score() - 445.35).abs() < 0.01);
}

#[test]
fn test_single_record_is_best_under_either_policy() {
    let records = vec![country("Italy", 50, 4.0)];

    for policy in [Policy::Max, Policy::Min] {
        let matches = select_best_matches(Some(records.as_slice()), policy).unwrap();
        assert_eq!(matches.ids(), vec!["Italy"]);
    }
}

#[test]
fn test_all_equal_scores_return_everything() {
    let records = weather_with_spreads(&[4.0, 4.0, 4.0, 4.0]);

    let max = select_best_matches(Some(records.as_slice()), Policy::Max).unwrap();
    let min = select_best_matches(Some(records.as_slice()), Policy::Min).unwrap();

    assert_eq!(max.len(), 4);
    assert_eq!(min.len(), 4);
}

#[test]
fn test_distinct_equal_records_are_not_deduplicated() {
    let records = vec![
        weather("1", 10.0, 5.0),
        weather("1", 10.0, 5.0),
        weather("2", 30.0, 5.0),
    ];

    let matches = select_best_matches(Some(records.as_slice()), Policy::Min).unwrap();
    assert_eq!(matches.ids(), vec!["1", "1"]);
}

#[test]
fn test_selection_is_deterministic_and_order_independent() {
    let forward = weather_with_spreads(&[3.0, 1.0, 8.0, 1.0, 5.0]);
    let mut reversed = weather_with_spreads(&[3.0, 1.0, 8.0, 1.0, 5.0]);
    reversed.reverse();

    let first = select_best_matches(Some(forward.as_slice()), Policy::Min).unwrap();
    let second = select_best_matches(Some(forward.as_slice()), Policy::Min).unwrap();
    let from_reversed = select_best_matches(Some(reversed.as_slice()), Policy::Min).unwrap();

    assert_eq!(first.ids(), second.ids());

    let mut a = first.ids();
    let mut b = from_reversed.ids();
    a.sort();
    b.sort();
    assert_eq!(a, b);
    assert_eq!(a, vec!["2", "4"]);
}

#[test]
fn test_exact_equality_without_tolerance() {
    let records = vec![
        weather("1", 0.3, 0.0),
        weather("2", 0.1 + 0.2, 0.0),
    ];

    // 0.1 + 0.2 is slightly above 0.3
    let matches = select_best_matches(Some(records.as_slice()), Policy::Min).unwrap();
    assert_eq!(matches.ids(), vec!["1"]);
}

#[test]
fn test_empty_collection_has_no_candidate() {
    let document = Document::new(Vec::new());

    let err = select_best_matches_in(&document, Policy::Max).unwrap_err();
    assert!(matches!(err, AnalysisError::NoCandidate));
    assert_eq!(err.kind(), ErrorKind::NoCandidate);
}

#[test]
fn test_missing_collection_fails_validation() {
    let err = select_best_matches(None, Policy::Max).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingCollection));
}

#[test]
fn test_missing_element_fails_before_scoring() {
    let records = vec![weather("1", 10.0, 5.0), None];
    let err = select_best_matches(Some(records.as_slice()), Policy::Min).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingElement { index: 1 }));
}

#[test]
fn test_mixed_variants_fail_before_scoring() {
    // The country score would overflow; validation must reject the mix first
    let records = vec![
        weather("1", 10.0, 5.0),
        country("Tiny", i64::MAX, f64::MIN_POSITIVE),
    ];

    let err = select_best_matches(Some(records.as_slice()), Policy::Max).unwrap_err();
    assert!(matches!(err, AnalysisError::MixedVariants { index: 1, .. }));
}

#[test]
fn test_unscoreable_records_fail_validation() {
    let records = vec![note("a")];
    let err = select_best_matches(Some(records.as_slice()), Policy::Max).unwrap_err();
    assert!(matches!(err, AnalysisError::NotScoreable { .. }));
}

#[test]
fn test_score_failure_aborts_selection() {
    let records = vec![
        weather("1", 10.0, 5.0),
        weather("2", f64::MAX, -f64::MAX),
        weather("3", 12.0, 5.0),
    ];

    let err = select_best_matches(Some(records.as_slice()), Policy::Min).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
}

#[test]
fn test_matches_downcast_to_concrete_records() {
    let records = vec![
        country("Monaco", 38_000, 2.02),
        country("Vatican", 800, 0.49),
    ];

    let matches = select_best_matches(Some(records.as_slice()), Policy::Max).unwrap();
    let countries: Vec<&CountryRecord> = matches.downcast::<CountryRecord>().collect();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].name(), "Monaco");
    assert_eq!(countries[0].population(), 38_000);
    assert!(matches.contains_id("Monaco"));
    assert!(!matches.contains_id("Vatican"));
}

#[test]
fn test_policy_display() {
    assert_eq!(Policy::Max.to_string(), "max");
    assert_eq!(Policy::Min.to_string(), "min");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn extreme(spreads: &[f64], policy: Policy) -> f64 {
        match policy {
            Policy::Max => spreads.iter().copied().fold(f64::MIN, f64::max),
            Policy::Min => spreads.iter().copied().fold(f64::MAX, f64::min),
        }
    }

    proptest! {
        #[test]
        fn tie_set_is_every_record_with_the_extreme_score(
            raw in prop::collection::vec(0u8..16, 1..48)
        ) {
            let spreads: Vec<f64> = raw.into_iter().map(f64::from).collect();
            let records = weather_with_spreads(&spreads);

            for policy in [Policy::Max, Policy::Min] {
                let best = extreme(&spreads, policy);
                let expected: Vec<String> = spreads
                    .iter()
                    .enumerate()
                    .filter(|(_, spread)| **spread == best)
                    .map(|(i, _)| (i + 1).to_string())
                    .collect();

                let matches = select_best_matches(Some(records.as_slice()), policy).unwrap();
                prop_assert_eq!(matches.best_score(), best);
                prop_assert_eq!(matches.ids(), expected);
            }
        }

        #[test]
        fn selection_does_not_depend_on_record_order(
            raw in prop::collection::vec(0u8..16, 1..48)
        ) {
            let spreads: Vec<f64> = raw.into_iter().map(f64::from).collect();
            let forward = weather_with_spreads(&spreads);
            let mut reversed = weather_with_spreads(&spreads);
            reversed.reverse();

            for policy in [Policy::Max, Policy::Min] {
                let a = select_best_matches(Some(forward.as_slice()), policy).unwrap();
                let b = select_best_matches(Some(reversed.as_slice()), policy).unwrap();
                prop_assert_eq!(a.best_score(), b.best_score());
                prop_assert_eq!(sorted(a.ids()), sorted(b.ids()));
            }
        }
    }
}
