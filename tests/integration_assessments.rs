mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{create_assessment, create_course, register, send, test_app};

#[tokio::test]
async fn test_create_under_own_course() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let course = create_course(&app, &token, "Course").await;
    let course_id = course["id"].as_str().unwrap();

    let assessment = create_assessment(&app, &token, course_id, "Quiz 1").await;
    assert_eq!(assessment["course_id"], course["id"]);
    assert_eq!(assessment["max_score"], 100);

    let id = assessment["id"].as_str().unwrap();
    let (status, fetched) =
        send(&app, "GET", &format!("/api/assessments/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, assessment);
}

#[tokio::test]
async fn test_create_under_foreign_course_is_forbidden() {
    let app = test_app();
    let (owner_token, _) = register(&app, "X", "instructor", "password-1").await;
    let (other_token, _) = register(&app, "Y", "instructor", "password-1").await;

    let course = create_course(&app, &owner_token, "Course").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/assessments",
        Some(&other_token),
        Some(json!({
            "course_id": course["id"],
            "title": "Not mine",
            "questions": "[]",
            "max_score": 10,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_under_missing_course_is_not_found() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/assessments",
        Some(&token),
        Some(json!({
            "course_id": Uuid::new_v4(),
            "title": "Orphan",
            "questions": "[]",
            "max_score": 10,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Course"));
}

#[tokio::test]
async fn test_update_checks_owner_of_current_course() {
    let app = test_app();
    let (owner_token, _) = register(&app, "X", "instructor", "password-1").await;
    let (other_token, _) = register(&app, "Y", "instructor", "password-1").await;

    let course = create_course(&app, &owner_token, "Course").await;
    let assessment =
        create_assessment(&app, &owner_token, course["id"].as_str().unwrap(), "Quiz").await;
    let id = assessment["id"].as_str().unwrap();

    let payload = json!({
        "course_id": course["id"],
        "title": "Renamed quiz",
        "questions": "[]",
        "max_score": 50,
    });

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/assessments/{id}"),
        Some(&other_token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/assessments/{id}"),
        Some(&owner_token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed quiz");
    assert_eq!(updated["max_score"], 50);
}

#[tokio::test]
async fn test_update_rejects_move_to_missing_course() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let course = create_course(&app, &token, "Course").await;
    let assessment = create_assessment(&app, &token, course["id"].as_str().unwrap(), "Quiz").await;
    let id = assessment["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/assessments/{id}"),
        Some(&token),
        Some(json!({
            "course_id": Uuid::new_v4(),
            "title": "Quiz",
            "questions": "[]",
            "max_score": 10,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Course"));
}

#[tokio::test]
async fn test_mutation_after_course_deleted_is_not_found_never_forbidden() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let course = create_course(&app, &token, "Doomed").await;
    let course_id = course["id"].as_str().unwrap().to_string();
    let assessment = create_assessment(&app, &token, &course_id, "Quiz").await;
    let id = assessment["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/courses/{course_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The orphaned assessment reports the missing course, not a denial.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/assessments/{id}"),
        Some(&token),
        Some(json!({
            "course_id": course_id,
            "title": "Quiz",
            "questions": "[]",
            "max_score": 10,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Course"));

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/assessments/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Course"));
}

#[tokio::test]
async fn test_delete_by_owner() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let course = create_course(&app, &token, "Course").await;
    let assessment = create_assessment(&app, &token, course["id"].as_str().unwrap(), "Quiz").await;
    let id = assessment["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/assessments/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/assessments/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reads_require_authentication() {
    let app = test_app();

    let (status, _) = send(&app, "GET", "/api/assessments", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/assessments/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
