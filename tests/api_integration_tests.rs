//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use title_cache::{
    api::create_router,
    storage::{MemoryStore, SharedStore},
    AppState, TitleCache,
};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_app_with_store(MemoryStore::new())
}

fn create_app_with_store(store: MemoryStore) -> Router {
    let store: SharedStore = Box::new(store);
    let state = AppState::new(TitleCache::with_defaults(store).unwrap());
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn insert_request(title: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/titles")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "title": title }).to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == INSERT Endpoint Tests ==

#[tokio::test]
async fn test_insert_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["partition"], 0);
    assert!(json["message"].as_str().unwrap().contains("1. Two Sum: Easy"));
}

#[tokio::test]
async fn test_insert_duplicate_is_conflict() {
    let app = create_test_app();

    let first = app
        .clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = body_to_json(second.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Two Sum"));
}

#[tokio::test]
async fn test_insert_malformed_is_bad_request() {
    let app = create_test_app();

    let response = app.oneshot(insert_request("Two Sum Easy")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_insert_oversized_is_payload_too_large() {
    let app = create_test_app();
    let title = format!("1. {}: Hard", "x".repeat(2000));

    let response = app.oneshot(insert_request(&title)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_insert_quota_exhausted_is_insufficient_storage() {
    let app = create_app_with_store(MemoryStore::with_quota(40));

    let first = app
        .clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(insert_request("2. Add Two Numbers: Medium"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::INSUFFICIENT_STORAGE);
}

#[tokio::test]
async fn test_insert_invalid_json() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/titles")
                .header("content-type", "application/json")
                .body(Body::from("invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == LOOKUP Endpoint Tests ==

#[tokio::test]
async fn test_lookup_endpoint_success() {
    let app = create_test_app();

    app.clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/titles/Two%20Sum")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Two Sum");
    assert_eq!(json["numbered_title"], "1. Two Sum");
    assert_eq!(json["difficulty"], "Easy");
}

#[tokio::test]
async fn test_lookup_does_not_match_partial_name() {
    let app = create_test_app();

    app.clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/titles/Sum")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lookup_existing_partitions() {
    let store = MemoryStore::from_entries([
        ("lh-storage-0", "1. Two Sum: Easy; "),
        ("lh-storage-1", "4. Median of Two Sorted Arrays: Hard; "),
    ]);
    let app = create_app_with_store(store);

    let response = app
        .oneshot(get_request("/titles/median%20of%20two%20sorted%20arrays"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["numbered_title"], "4. Median of Two Sorted Arrays");
    assert_eq!(json["difficulty"], "Hard");
}

#[tokio::test]
async fn test_lookup_returns_stored_spelling() {
    let app = create_test_app();

    app.clone()
        .oneshot(insert_request("007. James Bond: medium"))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/titles/james%20bond"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["numbered_title"], "007. James Bond");
    assert_eq!(json["difficulty"], "medium");
}

// == PARTITIONS Endpoint Tests ==

#[tokio::test]
async fn test_partitions_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    app.clone()
        .oneshot(insert_request("2. Add Two Numbers: Medium"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/partitions")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["base_name"], "lh-storage");
    assert_eq!(json["capacity_bound"], 1900);
    assert_eq!(json["partition_count"], 1);
    assert_eq!(json["partitions"][0]["records"], 2);
    assert_eq!(json["partitions"][0]["occupied_bytes"], 46);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_tracks_hits_and_misses() {
    let app = create_test_app();

    app.clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    app.clone()
        .oneshot(insert_request("1. Two Sum: Easy"))
        .await
        .unwrap();
    app.clone()
        .oneshot(get_request("/titles/Two%20Sum"))
        .await
        .unwrap();
    app.clone()
        .oneshot(get_request("/titles/Three%20Sum"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["inserts"], 1);
    assert_eq!(json["duplicates"], 1);
    assert_eq!(json["partition_count"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
