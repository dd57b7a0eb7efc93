//! Integration tests for the listing provider against a wiremock server

use core::time::Duration;
use serde_json::{Map, Value, json};
use std::sync::Mutex;
use std::time::Instant;
use steam_heat_lib::catalog::{DEFAULT_LISTING_TIMEOUT, Field, ListingProvider, Progress, RawEntity};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Progress reporter that remembers the last position it was given
#[derive(Debug, Default)]
struct RecordingProgress {
    last_position: Mutex<Option<u64>>,
}

impl Progress for RecordingProgress {
    fn set_phase(&self, _phase: &str) {}
    fn set_length(&self, _length: u64) {}
    fn set_position(&self, position: u64, _message: &str) {
        *self.last_position.lock().unwrap() = Some(position);
    }
    fn done(&self) {}
}

/// A listing page with `count` games whose ids start at `first_id`
fn page_body(first_id: u64, count: u64) -> Value {
    let mut page = Map::new();
    for id in first_id..first_id + count {
        let _ = page.insert(
            id.to_string(),
            json!({
                "appid": id,
                "name": format!("Game {id}"),
                "positive": 90,
                "negative": 10,
                "owners": "1,000 .. 3,000",
                "average_forever": 120,
                "players_2weeks": 50,
                "ccu": 5,
            }),
        );
    }
    Value::Object(page)
}

async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("request", "all"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> ListingProvider {
    ListingProvider::new(Some(&format!("{}/api.php", server.uri())), DEFAULT_LISTING_TIMEOUT).expect("Failed to create provider")
}

fn ids(entities: &[RawEntity]) -> Vec<u64> {
    entities.iter().map(|e| e.appid.value_or(0)).collect()
}

#[tokio::test]
async fn test_collects_exact_target_across_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 3)).await;
    mount_page(&server, 1, page_body(4, 3)).await;

    let progress = RecordingProgress::default();
    let entities = provider(&server)
        .collect(6, 0, Duration::ZERO, &progress)
        .await
        .expect("collect should succeed");

    assert_eq!(ids(&entities), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(*progress.last_position.lock().unwrap(), Some(6));
}

#[tokio::test]
async fn test_truncates_to_target() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 4)).await;
    mount_page(&server, 1, page_body(5, 4)).await;

    let entities = provider(&server)
        .collect(5, 0, Duration::ZERO, &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(ids(&entities), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_stops_on_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 2)).await;
    mount_page(&server, 1, json!({})).await;

    let entities = provider(&server)
        .collect(10, 0, Duration::ZERO, &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(ids(&entities), vec![1, 2]);
}

#[tokio::test]
async fn test_starts_at_requested_page() {
    let server = MockServer::start().await;
    mount_page(&server, 3, page_body(30, 2)).await;

    let entities = provider(&server)
        .collect(2, 3, Duration::ZERO, &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(ids(&entities), vec![30, 31]);
}

#[tokio::test]
async fn test_page_order_follows_response_keys() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!({
            "900": {"appid": 900, "name": "Last id first"},
            "20": {"appid": 20, "name": "Middle"},
            "5": {"appid": 5, "name": "Smallest id last"},
        }),
    )
    .await;

    let entities = provider(&server)
        .collect(3, 0, Duration::ZERO, &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(ids(&entities), vec![900, 20, 5]);
}

/// Pause long enough to be measurable without slowing the suite much
const PAGE_DELAY: Duration = Duration::from_millis(400);

#[tokio::test]
async fn test_no_delay_when_first_page_meets_target() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 3)).await;

    let started = Instant::now();
    let entities = provider(&server)
        .collect(3, 0, Duration::from_secs(30), &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(entities.len(), 3);
    assert!(started.elapsed() < Duration::from_secs(30), "no pause expected after the last needed page");
}

#[tokio::test]
async fn test_delay_between_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 2)).await;
    mount_page(&server, 1, page_body(3, 2)).await;

    let started = Instant::now();
    let entities = provider(&server)
        .collect(4, 0, PAGE_DELAY, &RecordingProgress::default())
        .await
        .expect("collect should succeed");
    let elapsed = started.elapsed();

    assert_eq!(entities.len(), 4);
    assert!(elapsed >= PAGE_DELAY, "one pause expected between two pages, took {elapsed:?}");
    assert!(elapsed < PAGE_DELAY * 2 + Duration::from_secs(5), "only one pause expected, took {elapsed:?}");
}

#[tokio::test]
async fn test_no_delay_after_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 2)).await;
    mount_page(&server, 1, json!({})).await;

    let started = Instant::now();
    let entities = provider(&server)
        .collect(10, 0, Duration::from_secs(3), &RecordingProgress::default())
        .await
        .expect("collect should succeed");
    let elapsed = started.elapsed();

    assert_eq!(entities.len(), 2);
    assert!(elapsed >= Duration::from_secs(3), "a pause is expected before the empty page, took {elapsed:?}");
    assert!(elapsed < Duration::from_secs(6), "no pause expected after the empty page, took {elapsed:?}");
}

#[tokio::test]
async fn test_server_error_is_fatal() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(1, 2)).await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = provider(&server).collect(5, 0, Duration::ZERO, &RecordingProgress::default()).await;

    let err = result.expect_err("a failing page should abort collection");
    assert!(err.to_string().contains("500"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_undecodable_page_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let result = provider(&server).collect(5, 0, Duration::ZERO, &RecordingProgress::default()).await;
    assert!(result.is_err(), "an undecodable page should abort collection");
}

#[tokio::test]
async fn test_malformed_entities_are_kept() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        0,
        json!({
            "10": {"appid": 10, "name": "Fine", "positive": 5},
            "11": "not an object",
            "12": {"appid": "twelve", "name": null, "positive": -3},
        }),
    )
    .await;

    let entities = provider(&server)
        .collect(3, 0, Duration::ZERO, &RecordingProgress::default())
        .await
        .expect("collect should succeed");

    assert_eq!(entities.len(), 3);
    assert_eq!(entities[0].positive.value_or(0), 5);
    assert_eq!(entities[1].appid, Field::Missing);
    assert!(entities[2].appid.is_malformed());
    assert!(entities[2].positive.is_malformed());
}
