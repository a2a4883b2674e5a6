// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typed view of a successful search response.
//!
//! ```text
//! { "result": { "matchedItems": [ { "matchedInternalProducts": [ { "name", "percentage" } ] } ] } }
//! ```
//!
//! Only the fields the checks need are typed. Everything else the service
//! returns is ignored, so additive changes to the response never break the
//! harness. A missing `matchedInternalProducts` list, name or percentage is
//! tolerated here and handled by each check.

use serde::{Deserialize, Serialize};

use crate::error::ContractViolation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: SearchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub matched_items: Vec<MatchedItem>,
}

/// One top-level search hit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedItem {
    #[serde(default)]
    pub matched_internal_products: Option<Vec<InternalProductMatch>>,
}

/// A candidate catalog product attached to a matched item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InternalProductMatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl InternalProductMatch {
    /// Name for reports; products without one are `unknown`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }
}

impl MatchedItem {
    /// Internal products, empty when the list is absent.
    pub fn products(&self) -> &[InternalProductMatch] {
        self.matched_internal_products.as_deref().unwrap_or(&[])
    }
}

impl SearchResponse {
    /// Decode a raw body. A body that is not this shape is a contract violation.
    pub fn decode(body: &str) -> Result<Self, ContractViolation> {
        serde_json::from_str(body).map_err(|e| ContractViolation::MalformedBody {
            reason: e.to_string(),
        })
    }

    pub fn matched_items(&self) -> &[MatchedItem] {
        &self.result.matched_items
    }

    /// Every internal product across every matched item, in response order.
    pub fn internal_products(&self) -> impl Iterator<Item = &InternalProductMatch> {
        self.result
            .matched_items
            .iter()
            .flat_map(|item| item.products().iter())
    }

    /// Internal products that carry a percentage, paired with it.
    pub fn scored_products(&self) -> impl Iterator<Item = (&InternalProductMatch, f64)> {
        self.internal_products()
            .filter_map(|p| p.percentage.map(|pct| (p, pct)))
    }
}
