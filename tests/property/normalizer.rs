//! Normalizer properties.
//!
//! 1. Every optional field is present after normalization
//! 2. Supplied values, well-formed or not, pass through untouched
//! 3. Unknown extra fields are carried but never shadow known ones

use matchprobe::request::{DEFAULT_STATUS_ID, DEFAULT_TOP_K};
use matchprobe::{normalize, RankingToggle, SearchIntent, SearchKind};
use proptest::prelude::*;
use serde_json::{json, Value};

const KNOWN_FIELDS: &[&str] = &[
    "statusId",
    "topK",
    "threshold",
    "enablePrivateLabelRanking",
    "enableStockProductRanking",
    "enableVendorRanking",
    "enableProductRanking",
    "useOldReranking",
];

// ============================================================================
// STRATEGIES
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = SearchKind> {
    prop_oneof![Just(SearchKind::Text), Just(SearchKind::Url)]
}

/// Arbitrary JSON scalars and shallow containers, including wrong types.
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1e6f64..1e6f64).prop_map(|f| json!(f)),
        ".{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn toggle_strategy() -> impl Strategy<Value = RankingToggle> {
    prop::sample::select(RankingToggle::ALL.to_vec())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_defaults_always_present(kind in kind_strategy(), payload in value_strategy()) {
        let req = normalize(&SearchIntent::with_payload(kind, payload.clone()));
        for field in KNOWN_FIELDS {
            prop_assert!(req.body.contains_key(*field), "missing {}", field);
        }
        prop_assert_eq!(req.payload(), Some(&payload));
        prop_assert_eq!(&req.body["statusId"], &json!(DEFAULT_STATUS_ID));
        prop_assert_eq!(&req.body["topK"], &json!(DEFAULT_TOP_K));
    }

    #[test]
    fn prop_supplied_values_pass_through(
        kind in kind_strategy(),
        top_k in value_strategy(),
        threshold in value_strategy(),
        status_id in value_strategy(),
    ) {
        let intent = SearchIntent::with_payload(kind, json!("x"))
            .raw("topK", top_k.clone())
            .raw("threshold", threshold.clone())
            .raw("statusId", status_id.clone());
        let req = normalize(&intent);
        prop_assert_eq!(&req.body["topK"], &top_k);
        prop_assert_eq!(&req.body["threshold"], &threshold);
        prop_assert_eq!(&req.body["statusId"], &status_id);
    }

    #[test]
    fn prop_toggles_pass_through(toggle in toggle_strategy(), value in value_strategy()) {
        let intent = SearchIntent::text("x").raw(toggle.wire_name(), value.clone());
        let req = normalize(&intent);
        prop_assert_eq!(&req.body[toggle.wire_name()], &value);
        for other in RankingToggle::ALL {
            if other != toggle {
                prop_assert_eq!(&req.body[other.wire_name()], &json!(false));
            }
        }
    }

    #[test]
    fn prop_missing_payload_stays_missing(kind in kind_strategy()) {
        let req = normalize(&SearchIntent::missing(kind));
        prop_assert!(req.payload().is_none());
        prop_assert!(!req.body.contains_key(kind.payload_field()));
    }

    #[test]
    fn prop_extra_fields_are_carried(name in "x[a-zA-Z]{1,12}", value in value_strategy()) {
        let req = normalize(&SearchIntent::text("x").raw(&name, value.clone()));
        prop_assert_eq!(req.body.get(&name), Some(&value));
        prop_assert_eq!(req.body.len(), KNOWN_FIELDS.len() + 2);
    }

    #[test]
    fn prop_normalize_is_deterministic(kind in kind_strategy(), payload in value_strategy()) {
        let intent = SearchIntent::with_payload(kind, payload);
        prop_assert_eq!(normalize(&intent), normalize(&intent));
    }
}
