mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use common::{send, test_app};

// Result routes deliberately mount no auth extractor (observed legacy
// behavior): results are unchecked telemetry.

async fn record_result(app: &axum::Router, score: i32) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/results",
        None,
        Some(json!({
            "assessment_id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "score": score,
            "attempt_date": "2026-05-01T10:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "record result failed: {body}");
    body
}

#[tokio::test]
async fn test_record_and_fetch_result() {
    let app = test_app();

    let result = record_result(&app, 87).await;
    assert_eq!(result["score"], 87);

    let attempt_date: DateTime<Utc> = result["attempt_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(attempt_date, "2026-05-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap());

    let id = result["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/results/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, result);

    let (status, list) = send(&app, "GET", "/api/results", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().contains(&result));
}

#[tokio::test]
async fn test_update_result() {
    let app = test_app();

    let result = record_result(&app, 40).await;
    let id = result["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/results/{id}"),
        None,
        Some(json!({
            "id": id,
            "assessment_id": result["assessment_id"],
            "user_id": result["user_id"],
            "score": 95,
            "attempt_date": "2026-05-02T09:30:00Z",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["score"], 95);
}

#[tokio::test]
async fn test_update_body_id_must_match_path() {
    let app = test_app();

    let result = record_result(&app, 40).await;
    let id = result["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/results/{id}"),
        None,
        Some(json!({
            "id": Uuid::new_v4(),
            "assessment_id": result["assessment_id"],
            "user_id": result["user_id"],
            "score": 95,
            "attempt_date": "2026-05-02T09:30:00Z",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_result_is_not_found() {
    let app = test_app();
    let id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/results/{id}"),
        None,
        Some(json!({
            "id": id,
            "assessment_id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "score": 1,
            "attempt_date": "2026-05-02T09:30:00Z",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_by_id() {
    let app = test_app();

    let result = record_result(&app, 70).await;
    let id = result["id"].as_str().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/api/results/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/results/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_by_body() {
    let app = test_app();

    let result = record_result(&app, 70).await;
    let id = result["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/results",
        None,
        Some(json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/results",
        None,
        Some(json!({ "id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
