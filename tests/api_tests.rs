mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeMetadata, details, matrix_results, test_config};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app(metadata: Arc<FakeMetadata>) -> Router {
    let state = cinebot::api::create_app_state_with_metadata(test_config(), metadata)
        .await
        .expect("Failed to create app state");
    cinebot::api::router(state)
}

fn matrix_metadata() -> Arc<FakeMetadata> {
    Arc::new(
        FakeMetadata::new()
            .with_search("Matrix", matrix_results())
            .with_details(603, details(None, Some("The Matrix Revolutions"), Some("42"))),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn select(film_id: i64, user_id: i64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/films/{film_id}/select"))
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"user_id":{user_id}}}"#)))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app(matrix_metadata()).await;

    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_help_texts() {
    let app = spawn_app(matrix_metadata()).await;

    let (status, body) = send(&app, get("/api/help")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["greeting"], cinebot::presentation::GREETING);
    assert_eq!(body["data"]["help"], cinebot::presentation::HELP);
}

#[tokio::test]
async fn test_search_returns_options() {
    let app = spawn_app(matrix_metadata()).await;

    let (status, body) = send(&app, get("/api/search?user_id=1&query=Matrix")).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["header"], "Results for: Matrix");
    assert_eq!(data["candidates"].as_array().unwrap().len(), 5);

    let options = data["options"].as_array().unwrap();
    assert_eq!(options.len(), 5);
    assert_eq!(options[2]["token"], "film_603");
    assert_eq!(options[2]["label"], "The Matrix Revolutions (2003)");
}

#[tokio::test]
async fn test_blank_query_is_bad_request() {
    let metadata = matrix_metadata();
    let app = spawn_app(metadata.clone()).await;

    let (status, body) = send(&app, get("/api/search?user_id=1&query=%20%20")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        metadata
            .search_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn test_select_counts_views() {
    let app = spawn_app(matrix_metadata()).await;

    let (status, body) = send(&app, select(603, 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["film"]["view_count"], 1);
    assert_eq!(
        body["data"]["message"]["link"]["url"],
        "https://hd.kinopoisk.ru/film/42"
    );

    let (_, body) = send(&app, select(603, 1)).await;
    assert_eq!(body["data"]["film"]["view_count"], 2);
}

#[tokio::test]
async fn test_history_and_stats() {
    let app = spawn_app(matrix_metadata()).await;

    let (_, body) = send(&app, get("/api/users/9/history")).await;
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["message"], cinebot::presentation::NO_ACTIVITY);

    send(&app, get("/api/search?user_id=9&query=Matrix")).await;
    send(&app, select(603, 9)).await;

    let (status, body) = send(&app, get("/api/users/9/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["entries"][0]["query"], "Matrix");
    assert_eq!(body["data"]["message"], "Your recent searches:\nMatrix");

    let (status, body) = send(&app, get("/api/users/9/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stats"][0]["film_id"], 603);
    assert_eq!(body["data"]["stats"][0]["count"], 1);
    assert_eq!(
        body["data"]["message"],
        "Your most viewed films:\nThe Matrix Revolutions - 1"
    );
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let metadata = matrix_metadata();
    let app = spawn_app(metadata.clone()).await;
    metadata.set_failing(true);

    let (status, body) = send(&app, get("/api/search?user_id=1&query=Matrix")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, select(603, 1)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = send(&app, get("/api/users/1/history")).await;
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 0);
}
