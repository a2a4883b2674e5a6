//! Hand-written scenarios with literal expectations.

use super::common::StubService;
use matchprobe::assertions::{check_match_count, check_score_bounds, check_term_overlap};
use matchprobe::{
    normalize, CountExpectation, SearchIntent, SearchResponse, SearchService, ServiceClient,
};

fn submit(stub: &StubService, intent: SearchIntent) -> (u16, String) {
    let config = stub.config();
    let client = ServiceClient::new(&config).unwrap();
    let response = client.submit(&normalize(&intent)).unwrap();
    (response.status, response.body)
}

#[test]
fn test_plain_product_name() {
    let stub = StubService::conforming();
    let (status, body) = submit(&stub, SearchIntent::text("Cutting Board"));
    assert_eq!(status, 200);

    let response = SearchResponse::decode(&body).unwrap();
    check_match_count(&response, CountExpectation::AtLeast(1)).unwrap();
    check_term_overlap(&response, &["cutting".to_string(), "board".to_string()]).unwrap();
    check_score_bounds(&response).unwrap();
}

#[test]
fn test_empty_text() {
    let stub = StubService::conforming();
    assert_eq!(submit(&stub, SearchIntent::text("")).0, 400);
}

#[test]
fn test_loopback_url() {
    let stub = StubService::conforming();
    assert_eq!(submit(&stub, SearchIntent::url("http://127.0.0.1/admin")).0, 400);
}

#[test]
fn test_symbols_only() {
    let stub = StubService::conforming();
    let (status, body) = submit(&stub, SearchIntent::text("@@##$$%%"));
    assert_eq!(status, 200);
    let response = SearchResponse::decode(&body).unwrap();
    check_match_count(&response, CountExpectation::Exactly(0)).unwrap();
}

#[test]
fn test_absurd_top_k() {
    let stub = StubService::conforming();
    let intent = SearchIntent::text("Cutting Board").top_k(999_999);
    assert_eq!(submit(&stub, intent).0, 400);
}

#[test]
fn test_zero_threshold_is_inclusive() {
    let stub = StubService::conforming();
    let (status, body) = submit(&stub, SearchIntent::text("Cutting Board").threshold(0.0));
    assert_eq!(status, 200);
    let response = SearchResponse::decode(&body).unwrap();
    check_match_count(&response, CountExpectation::AtLeast(1)).unwrap();
}
