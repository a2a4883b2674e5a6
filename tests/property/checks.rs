//! Assertion engine properties.
//!
//! 1. Zero-match responses pass score checks for any floor
//! 2. Score bounds hold exactly when every present percentage is in [0, 100]
//! 3. Term overlap is existential: one matching name anywhere is enough
//! 4. Items without product lists and products without percentages are ignored

use matchprobe::assertions::{
    check_match_count, check_score_bounds, check_score_threshold, check_term_overlap,
};
use matchprobe::testing::{response_with, response_with_items};
use matchprobe::{CountExpectation, SearchResponse};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// STRATEGIES
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z]{3,8}( [A-Za-z]{3,8}){0,2}").unwrap()
}

/// Quarter steps are exact in binary, so JSON round-trips cannot blur edges.
fn quarter(q: i32) -> f64 {
    q as f64 / 4.0
}

fn percentage_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (0i32..=400).prop_map(|q| Some(quarter(q))),
        1 => (-200i32..800).prop_map(|q| Some(quarter(q))),
        1 => Just(None),
    ]
}

/// Matched items as owned `(name, percentage)` rows.
fn items_strategy() -> impl Strategy<Value = Vec<Vec<(String, Option<f64>)>>> {
    prop::collection::vec(
        prop::collection::vec((name_strategy(), percentage_strategy()), 0..5),
        0..5,
    )
}

fn build(items: &[Vec<(String, Option<f64>)>]) -> SearchResponse {
    let rows: Vec<Vec<(&str, Option<f64>)>> = items
        .iter()
        .map(|item| item.iter().map(|(n, p)| (n.as_str(), *p)).collect())
        .collect();
    let slices: Vec<&[(&str, Option<f64>)]> = rows.iter().map(Vec::as_slice).collect();
    response_with(&slices)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_zero_matches_are_vacuously_fine(floor in -1e6f64..1e6f64) {
        let empty = response_with(&[]);
        prop_assert!(check_score_bounds(&empty).is_ok());
        prop_assert!(check_score_threshold(&empty, floor).is_ok());
        prop_assert!(check_match_count(&empty, CountExpectation::Exactly(0)).is_ok());
    }

    #[test]
    fn prop_score_bounds_match_definition(items in items_strategy()) {
        let expected = items
            .iter()
            .flatten()
            .filter_map(|(_, p)| *p)
            .all(|p| (0.0..=100.0).contains(&p));
        prop_assert_eq!(check_score_bounds(&build(&items)).is_ok(), expected);
    }

    #[test]
    fn prop_threshold_is_strict(items in items_strategy(), q in 0i32..400) {
        let floor = quarter(q);
        let expected = items
            .iter()
            .flatten()
            .filter_map(|(_, p)| *p)
            .all(|p| p > floor);
        prop_assert_eq!(check_score_threshold(&build(&items), floor).is_ok(), expected);
    }

    #[test]
    fn prop_match_count_is_item_count(items in items_strategy()) {
        let response = build(&items);
        prop_assert!(check_match_count(&response, CountExpectation::Exactly(items.len())).is_ok());
        prop_assert!(check_match_count(&response, CountExpectation::AtLeast(items.len())).is_ok());
        prop_assert!(check_match_count(&response, CountExpectation::Exactly(items.len() + 1)).is_err());
    }

    #[test]
    fn prop_one_relevant_name_is_enough(
        mut items in items_strategy(),
        term in "[a-z]{4,6}",
        upper in any::<bool>(),
    ) {
        // Plant the term once, in whatever case, at the end of the last item.
        let planted = if upper { term.to_uppercase() } else { term.clone() };
        match items.last_mut() {
            Some(last) => last.push((format!("Item {}", planted), Some(50.0))),
            None => items.push(vec![(format!("Item {}", planted), Some(50.0))]),
        }
        prop_assert!(check_term_overlap(&build(&items), &["zzzzzzzzz".to_string(), term]).is_ok());
    }

    #[test]
    fn prop_no_relevant_name_fails(items in items_strategy()) {
        // Names are alphabetic, so a digit-bearing term can never match.
        prop_assert!(check_term_overlap(&build(&items), &["9".to_string()]).is_err());
    }

    #[test]
    fn prop_missing_lists_count_as_empty(n in 0usize..6) {
        let items: Vec<_> = (0..n).map(|_| json!({})).collect();
        let response = response_with_items(json!(items));
        prop_assert_eq!(response.matched_items().len(), n);
        prop_assert_eq!(response.internal_products().count(), 0);
        prop_assert!(check_score_bounds(&response).is_ok());
        prop_assert!(check_score_threshold(&response, 99.0).is_ok());
    }
}
