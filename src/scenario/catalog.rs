// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Built-in scenario catalog.
//!
//! The boundary matrix encodes the validation contract the service must
//! enforce:
//!
//! | Condition                                      | Status |
//! |------------------------------------------------|--------|
//! | empty or whitespace-only text                  | 400    |
//! | missing required field                         | 400    |
//! | non-string or null `text` / `url`              | 400    |
//! | symbols-only text                              | 200, 0 matches |
//! | `topK` <= 0, non-numeric, absurdly large       | 400    |
//! | `threshold` < 0, > 1, non-numeric              | 400    |
//! | `threshold` == 0                               | 200    |
//! | URL without scheme, `file:` or `ftp:`          | 400    |
//! | URL to loopback or private address             | 400    |
//! | extra unrecognized field                       | 200    |
//!
//! Note the asymmetry: a missing required field is rejected, an unknown extra
//! field is ignored. The field set is not closed.

use serde_json::{json, Value};

use super::{QualityFixture, Scenario, ScenarioClass};
use crate::assertions::{Check, CountExpectation};
use crate::request::{SearchIntent, SearchKind};

/// Input used by every numeric-range probe. Known to match in any catalog.
pub const PROBE_TEXT: &str = "Cutting Board";

fn zero_matches(s: Scenario) -> Scenario {
    s.expecting(Check::MatchCount(CountExpectation::Exactly(0)))
        .expecting(Check::ScoreBounds)
}

/// Default quality scenarios, used when no fixtures file is given.
pub fn quality_scenarios() -> Vec<Scenario> {
    vec![Scenario::new(
        "QLT-01",
        "should match a plain product name",
        ScenarioClass::Quality,
        SearchIntent::text(PROBE_TEXT),
        200,
    )
    .expecting(Check::MatchCount(CountExpectation::AtLeast(1)))
    .expecting(Check::TermOverlap(vec!["cutting".into(), "board".into()]))
    .expecting(Check::ScoreBounds)
    .expecting(Check::ScoreAbove(0.0))]
}

/// The request-validation boundary matrix.
pub fn boundary_scenarios() -> Vec<Scenario> {
    let text = SearchKind::Text;
    let url = SearchKind::Url;

    vec![
        // Text content
        Scenario::boundary("BND-01", "rejects empty text", SearchIntent::text(""), 400),
        zero_matches(Scenario::boundary(
            "BND-02",
            "accepts symbols-only text with no matches",
            SearchIntent::text("@@##$$%%"),
            200,
        )),
        Scenario::boundary(
            "BND-03",
            "rejects missing required field",
            SearchIntent::missing(text),
            400,
        ),
        Scenario::boundary(
            "BND-04",
            "rejects whitespace-only text",
            SearchIntent::text("     "),
            400,
        ),
        Scenario::boundary(
            "BND-05",
            "rejects text of only newlines and tabs",
            SearchIntent::text("\n\n\t\t\r\n"),
            400,
        ),
        Scenario::boundary(
            "BND-06",
            "accepts text wrapped in HTML tags",
            SearchIntent::text(format!("<script>alert(\"XSS\")</script> {}", PROBE_TEXT)),
            200,
        )
        .expecting(Check::MatchCount(CountExpectation::Exactly(1)))
        .expecting(Check::ScoreBounds),
        zero_matches(Scenario::boundary(
            "BND-07",
            "accepts SQL injection text with no matches",
            SearchIntent::text("' OR '1'='1'; DROP TABLE products;--"),
            200,
        )),
        zero_matches(Scenario::boundary(
            "BND-08",
            "accepts NoSQL injection text with no matches",
            SearchIntent::text("{\"$gt\": \"\"} OR 1=1"),
            200,
        )),
        zero_matches(Scenario::boundary(
            "BND-09",
            "accepts path traversal text with no matches",
            SearchIntent::text("../../../etc/passwd"),
            200,
        )),
        Scenario::boundary(
            "BND-10",
            "accepts text containing a NUL byte",
            SearchIntent::text("Product\0Name"),
            200,
        ),
        Scenario::boundary(
            "BND-11",
            "accepts mixed-script text",
            SearchIntent::text("Cutting Board 切割板 доска"),
            200,
        ),
        Scenario::boundary(
            "BND-12",
            "accepts right-to-left text",
            SearchIntent::text("لوح تقطيع Cutting Board"),
            200,
        ),
        Scenario::boundary(
            "BND-13",
            "accepts combining characters",
            SearchIntent::text("Café Naïve Résumé"),
            200,
        ),
        // Types
        Scenario::boundary(
            "BND-14",
            "rejects non-string text",
            SearchIntent::with_payload(text, json!(12345)),
            400,
        ),
        Scenario::boundary(
            "BND-15",
            "rejects non-string url",
            SearchIntent::with_payload(url, json!({ "domain": "example.com" })),
            400,
        ),
        Scenario::boundary(
            "BND-16",
            "rejects null text",
            SearchIntent::with_payload(text, Value::Null),
            400,
        ),
        Scenario::boundary(
            "BND-17",
            "rejects null url",
            SearchIntent::with_payload(url, Value::Null),
            400,
        ),
        // topK
        Scenario::boundary(
            "BND-18",
            "rejects negative topK",
            SearchIntent::text(PROBE_TEXT).top_k(-5),
            400,
        ),
        Scenario::boundary(
            "BND-19",
            "rejects zero topK",
            SearchIntent::text(PROBE_TEXT).top_k(0),
            400,
        ),
        Scenario::boundary(
            "BND-20",
            "rejects absurdly large topK",
            SearchIntent::text(PROBE_TEXT).top_k(999_999),
            400,
        ),
        Scenario::boundary(
            "BND-21",
            "rejects non-numeric topK",
            SearchIntent::text(PROBE_TEXT).raw("topK", json!("five")),
            400,
        ),
        // threshold
        Scenario::boundary(
            "BND-22",
            "rejects negative threshold",
            SearchIntent::text(PROBE_TEXT).threshold(-0.5),
            400,
        ),
        Scenario::boundary(
            "BND-23",
            "rejects threshold above 1",
            SearchIntent::text(PROBE_TEXT).threshold(1.5),
            400,
        ),
        Scenario::boundary(
            "BND-24",
            "accepts threshold equal to 0",
            SearchIntent::text(PROBE_TEXT).threshold(0.0),
            200,
        )
        .expecting(Check::MatchCount(CountExpectation::AtLeast(1)))
        .expecting(Check::ScoreBounds),
        Scenario::boundary(
            "BND-25",
            "rejects non-numeric threshold",
            SearchIntent::text(PROBE_TEXT).raw("threshold", json!("high")),
            400,
        ),
        // URL policy
        Scenario::boundary(
            "BND-26",
            "rejects malformed URL",
            SearchIntent::url("invalid-url"),
            400,
        ),
        zero_matches(Scenario::boundary(
            "BND-27",
            "accepts page without product data with no matches",
            SearchIntent::url("https://example.com/no-product"),
            200,
        )),
        Scenario::boundary(
            "BND-28",
            "rejects URL without scheme",
            SearchIntent::url("www.example.com/product"),
            400,
        ),
        Scenario::boundary(
            "BND-29",
            "rejects file: URL",
            SearchIntent::url("file:///etc/passwd"),
            400,
        ),
        Scenario::boundary(
            "BND-30",
            "rejects ftp: URL",
            SearchIntent::url("ftp://ftp.example.com/file.txt"),
            400,
        ),
        Scenario::boundary(
            "BND-31",
            "rejects localhost URL",
            SearchIntent::url("http://localhost:8080/admin"),
            400,
        ),
        Scenario::boundary(
            "BND-32",
            "rejects loopback address URL",
            SearchIntent::url("http://127.0.0.1/admin"),
            400,
        ),
        Scenario::boundary(
            "BND-33",
            "rejects private address range URL",
            SearchIntent::url("http://192.168.1.1/router"),
            400,
        ),
        // Field set
        Scenario::boundary(
            "BND-34",
            "ignores extra unexpected fields",
            SearchIntent::text(PROBE_TEXT).raw("maliciousField", json!("blabla")),
            200,
        ),
        Scenario::boundary(
            "BND-35",
            "accepts custom statusId",
            SearchIntent::text(PROBE_TEXT).status_id("test"),
            200,
        ),
    ]
}

/// An ordered, read-only set of scenarios.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Built-in quality scenarios followed by the boundary matrix.
    pub fn builtin() -> Self {
        let mut scenarios = quality_scenarios();
        scenarios.extend(boundary_scenarios());
        Self { scenarios }
    }

    /// Quality scenarios from fixtures (replacing the built-in ones) plus the
    /// boundary matrix.
    pub fn with_fixtures(fixtures: Vec<QualityFixture>) -> Self {
        let mut scenarios: Vec<Scenario> = fixtures.into_iter().map(Scenario::from).collect();
        scenarios.extend(boundary_scenarios());
        Self { scenarios }
    }

    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Scenarios of the given class (all when `None`) whose id or description
    /// contains `filter`, case-insensitively.
    pub fn select(&self, class: Option<ScenarioClass>, filter: Option<&str>) -> Vec<Scenario> {
        let needle = filter.map(str::to_lowercase);
        self.scenarios
            .iter()
            .filter(|s| class.map_or(true, |c| s.class == c))
            .filter(|s| match &needle {
                Some(n) => {
                    s.id.to_lowercase().contains(n.as_str())
                        || s.description.to_lowercase().contains(n.as_str())
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}
