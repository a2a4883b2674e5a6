// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request normalization: partial search intent in, complete wire body out.
//!
//! A caller says "search for this text" and maybe tweaks `topK`. The service
//! wants every field present. [`normalize`] fills the gaps with the documented
//! defaults and nothing else.
//!
//! Fields are held as raw JSON values rather than typed numbers so that
//! boundary scenarios can send `"topK": "five"` or `"text": null` and have it
//! reach the service byte-for-byte. Coercing here would test the harness
//! instead of the service.
//!
//! # Defaults
//!
//! | Wire field                  | Default    |
//! |-----------------------------|------------|
//! | `statusId`                  | `"string"` |
//! | `topK`                      | `3`        |
//! | `threshold`                 | `0.5`      |
//! | `enablePrivateLabelRanking` | `false`    |
//! | `enableStockProductRanking` | `false`    |
//! | `enableVendorRanking`       | `false`    |
//! | `enableProductRanking`      | `false`    |
//! | `useOldReranking`           | `true`     |

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

pub const DEFAULT_STATUS_ID: &str = "string";
pub const DEFAULT_TOP_K: i64 = 3;
pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_USE_OLD_RERANKING: bool = true;

/// Which search endpoint an intent targets, and which body field carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Text,
    Url,
}

impl SearchKind {
    /// Body field that carries the raw input.
    pub fn payload_field(self) -> &'static str {
        match self {
            SearchKind::Text => "text",
            SearchKind::Url => "url",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload_field())
    }
}

/// The four independent ranking-feature switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingToggle {
    PrivateLabel,
    StockProduct,
    Vendor,
    Product,
}

impl RankingToggle {
    pub const ALL: [RankingToggle; 4] = [
        RankingToggle::PrivateLabel,
        RankingToggle::StockProduct,
        RankingToggle::Vendor,
        RankingToggle::Product,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            RankingToggle::PrivateLabel => "enablePrivateLabelRanking",
            RankingToggle::StockProduct => "enableStockProductRanking",
            RankingToggle::Vendor => "enableVendorRanking",
            RankingToggle::Product => "enableProductRanking",
        }
    }

    fn slot(self) -> usize {
        match self {
            RankingToggle::PrivateLabel => 0,
            RankingToggle::StockProduct => 1,
            RankingToggle::Vendor => 2,
            RankingToggle::Product => 3,
        }
    }
}

/// A partial, caller-supplied search.
///
/// `None` means "not supplied": the normalizer fills it with the default,
/// except for the input payload itself, which is left out of the body
/// entirely (that is how a missing required field is probed).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIntent {
    pub kind: SearchKind,
    pub payload: Option<Value>,
    pub status_id: Option<Value>,
    pub top_k: Option<Value>,
    pub threshold: Option<Value>,
    pub toggles: [Option<Value>; 4],
    pub use_old_reranking: Option<Value>,
    /// Fields the service does not know about, sent verbatim.
    pub extra: Map<String, Value>,
}

impl SearchIntent {
    /// Intent with the given raw payload value and nothing else.
    pub fn with_payload(kind: SearchKind, payload: Value) -> Self {
        Self {
            payload: Some(payload),
            ..Self::missing(kind)
        }
    }

    /// Free-text search.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_payload(SearchKind::Text, Value::String(text.into()))
    }

    /// URL-based search.
    pub fn url(url: impl Into<String>) -> Self {
        Self::with_payload(SearchKind::Url, Value::String(url.into()))
    }

    /// Intent whose input field is absent from the wire body.
    pub fn missing(kind: SearchKind) -> Self {
        Self {
            kind,
            payload: None,
            status_id: None,
            top_k: None,
            threshold: None,
            toggles: [None, None, None, None],
            use_old_reranking: None,
            extra: Map::new(),
        }
    }

    pub fn top_k(mut self, top_k: i64) -> Self {
        self.top_k = Some(json!(top_k));
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(json!(threshold));
        self
    }

    pub fn status_id(mut self, status_id: impl Into<String>) -> Self {
        self.status_id = Some(Value::String(status_id.into()));
        self
    }

    pub fn toggle(mut self, toggle: RankingToggle, enabled: bool) -> Self {
        self.toggles[toggle.slot()] = Some(Value::Bool(enabled));
        self
    }

    pub fn old_reranking(mut self, enabled: bool) -> Self {
        self.use_old_reranking = Some(Value::Bool(enabled));
        self
    }

    /// Set any wire field to an arbitrary JSON value.
    ///
    /// Known fields land in their slot (so `raw("topK", json!("five"))`
    /// replaces the default instead of duplicating it). Unknown names are
    /// carried as extra fields.
    pub fn raw(mut self, field: &str, value: Value) -> Self {
        if field == self.kind.payload_field() {
            self.payload = Some(value);
            return self;
        }
        match field {
            "statusId" => self.status_id = Some(value),
            "topK" => self.top_k = Some(value),
            "threshold" => self.threshold = Some(value),
            "useOldReranking" => self.use_old_reranking = Some(value),
            other => {
                match RankingToggle::ALL.iter().find(|t| t.wire_name() == other) {
                    Some(t) => self.toggles[t.slot()] = Some(value),
                    None => {
                        self.extra.insert(other.to_string(), value);
                    }
                }
            }
        }
        self
    }
}

/// A complete wire body bound to the endpoint it is meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub kind: SearchKind,
    pub body: Map<String, Value>,
}

impl SearchRequest {
    /// The raw input as it will be sent, `None` when deliberately omitted.
    pub fn payload(&self) -> Option<&Value> {
        self.body.get(self.kind.payload_field())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// Fill every optional field with its default. Never fails, never coerces.
pub fn normalize(intent: &SearchIntent) -> SearchRequest {
    let mut body = Map::new();

    body.insert(
        "statusId".to_string(),
        intent
            .status_id
            .clone()
            .unwrap_or_else(|| Value::String(DEFAULT_STATUS_ID.to_string())),
    );

    if let Some(payload) = &intent.payload {
        body.insert(intent.kind.payload_field().to_string(), payload.clone());
    }

    body.insert(
        "topK".to_string(),
        intent.top_k.clone().unwrap_or_else(|| json!(DEFAULT_TOP_K)),
    );
    body.insert(
        "threshold".to_string(),
        intent
            .threshold
            .clone()
            .unwrap_or_else(|| json!(DEFAULT_THRESHOLD)),
    );

    for toggle in RankingToggle::ALL {
        body.insert(
            toggle.wire_name().to_string(),
            intent.toggles[toggle.slot()]
                .clone()
                .unwrap_or(Value::Bool(false)),
        );
    }

    body.insert(
        "useOldReranking".to_string(),
        intent
            .use_old_reranking
            .clone()
            .unwrap_or(Value::Bool(DEFAULT_USE_OLD_RERANKING)),
    );

    // INVARIANT: extra fields never shadow the known ones
    for (name, value) in &intent.extra {
        body.entry(name.clone()).or_insert_with(|| value.clone());
    }

    SearchRequest {
        kind: intent.kind,
        body,
    }
}
