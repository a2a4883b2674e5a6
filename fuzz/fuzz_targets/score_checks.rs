// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Score checks against arbitrary percentages, NaN and infinities included.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use matchprobe::assertions::{check_score_bounds, check_score_threshold};
use matchprobe::response::{InternalProductMatch, MatchedItem, SearchResult};
use matchprobe::SearchResponse;

#[derive(Arbitrary, Debug)]
struct Input {
    items: Vec<Vec<(Option<String>, Option<f64>)>>,
    floor: f64,
}

fuzz_target!(|input: Input| {
    let response = SearchResponse {
        result: SearchResult {
            matched_items: input
                .items
                .into_iter()
                .take(32)
                .map(|products| MatchedItem {
                    matched_internal_products: Some(
                        products
                            .into_iter()
                            .take(32)
                            .map(|(name, percentage)| InternalProductMatch { name, percentage })
                            .collect(),
                    ),
                })
                .collect(),
        },
    };

    let present: Vec<f64> = response.scored_products().map(|(_, p)| p).collect();

    // INVARIANT 1: bounds hold iff every present percentage is in [0, 100]
    let in_bounds = present.iter().all(|p| (0.0..=100.0).contains(p));
    assert_eq!(check_score_bounds(&response).is_ok(), in_bounds);

    // INVARIANT 2: NaN never clears a floor, and the floor itself never does
    let above = present.iter().all(|p| *p > input.floor);
    assert_eq!(check_score_threshold(&response, input.floor).is_ok(), above);
});
