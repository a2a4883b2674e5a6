// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Response decoding under adversarial bodies.
//!
//! The service is the thing under test, so its bodies are untrusted. A
//! truncated document, a number where a list belongs, or a gigantic nesting
//! depth must produce a `MalformedBody` violation, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use matchprobe::assertions::{check_score_bounds, check_term_overlap};
use matchprobe::{ContractViolation, SearchResponse};

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);

    match SearchResponse::decode(&body) {
        Ok(response) => {
            // INVARIANT 1: every decoded product is reachable through the iterators
            let total: usize = response
                .matched_items()
                .iter()
                .map(|item| item.products().len())
                .sum();
            assert_eq!(total, response.internal_products().count());

            // INVARIANT 2: scored products are a subset of all products
            assert!(response.scored_products().count() <= total);

            // Checks must terminate on anything that decoded.
            let _ = check_score_bounds(&response);
            let _ = check_term_overlap(&response, &["board".to_string()]);
        }
        Err(ContractViolation::MalformedBody { .. }) => {}
        Err(other) => panic!("decode produced a non-shape violation: {:?}", other),
    }
});
