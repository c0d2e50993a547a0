mod common;

use axum_test::TestServer;
use chrono::TimeDelta;
use serde_json::{Value, json};

#[tokio::test]
async fn test_stats_for_fresh_link() {
    let (state, _clock) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com/page", "shortcode": "fresh1" }))
        .await;

    let response = server.get("/shorturls/fresh1").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "shortcode": "fresh1",
            "originalUrl": "https://example.com/page",
            "shortLink": "http://sho.rt/fresh1",
            "createdAt": "2025-01-01T12:00:00.000Z",
            "expiry": "2025-01-01T12:30:00.000Z",
            "isActive": true,
            "totalClicks": 0,
            "clicks": []
        })
    );
}

#[tokio::test]
async fn test_stats_not_found() {
    let (state, _clock) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/shorturls/missing").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": {
                "code": "not_found",
                "message": "The requested shortcode does not exist"
            }
        })
    );
}

#[tokio::test]
async fn test_lifecycle_scenario() {
    let (state, clock) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let created = server
        .post("/shorturls")
        .json(&json!({ "url": "https://example.com", "validity": 1, "shortcode": "abc123" }))
        .await;
    assert_eq!(created.status_code(), 201);
    assert_eq!(created.json::<Value>()["shortLink"], "http://sho.rt/abc123");

    clock.advance(TimeDelta::seconds(30));
    let live = server.get("/shorturls/abc123").await;
    assert_eq!(live.status_code(), 200);
    assert_eq!(live.json::<Value>()["isActive"], true);

    clock.advance(TimeDelta::seconds(60));
    let expired = server.get("/shorturls/abc123").await;
    assert_eq!(expired.status_code(), 410);
    assert_eq!(expired.json::<Value>()["error"]["code"], "expired");
}
