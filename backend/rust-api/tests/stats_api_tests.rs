mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use common::{body_bytes, body_json, create_test_app, envelope, ScriptedClient};

#[tokio::test]
async fn test_fetch_stats_returns_zeroes() {
    let (app, _state) = create_test_app(ScriptedClient::always(Ok(envelope("[]"))));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "correctAnswers": 0,
            "currentStreak": 0,
            "hintsUsed": 0,
            "currentRiddleIndex": 0
        })
    );
}

#[tokio::test]
async fn test_update_stats_is_noop() {
    let (app, _state) = create_test_app(ScriptedClient::always(Ok(envelope("[]"))));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/stats/update")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "userId": "alice",
                        "correctAnswers": 3,
                        "currentStreak": 2,
                        "currentRiddleIndex": 4,
                        "lastUpdated": "2026-01-01T10:00:00Z"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    // stats stay zeroed after an update
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["correctAnswers"], 0);
}

#[tokio::test]
async fn test_update_stats_accepts_any_body() {
    let (app, _state) = create_test_app(ScriptedClient::always(Ok(envelope("[]"))));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/stats/update")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
