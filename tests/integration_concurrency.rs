mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use edupulse::modules::courses::model::Course;
use edupulse::modules::courses::service::CourseService;
use edupulse::modules::results::service::ResultService;
use edupulse::store::{MemoryStore, Store, StoreError};

use common::{create_course, register, send, test_app};

fn memory_store() -> Store {
    Store::Memory(MemoryStore::default())
}

fn sample_course() -> Course {
    Course {
        id: Uuid::new_v4(),
        title: "Original".to_string(),
        description: "Description".to_string(),
        owner_id: Uuid::new_v4(),
        media_url: None,
        level: None,
        category: None,
        duration: None,
        status: None,
        price: 0.0,
    }
}

#[tokio::test]
async fn test_stale_write_loses_without_clobbering() {
    let store = memory_store();
    let course = store.insert_course(sample_course()).await.unwrap();

    // Two readers load the same version.
    let stale = store.find_course(course.id).await.unwrap().unwrap();
    let mut winner = store.find_course(course.id).await.unwrap().unwrap();

    winner.record.title = "Winner".to_string();
    store.update_course_if_unchanged(winner).await.unwrap();

    let mut loser = stale;
    loser.record.title = "Loser".to_string();
    let err = store.update_course_if_unchanged(loser).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict));

    // The winner's write survived.
    let current = store.find_course(course.id).await.unwrap().unwrap();
    assert_eq!(current.record.title, "Winner");
    assert_eq!(current.version, 2);
}

#[tokio::test]
async fn test_write_after_delete_conflicts() {
    let store = memory_store();
    let course = store.insert_course(sample_course()).await.unwrap();

    let loaded = store.find_course(course.id).await.unwrap().unwrap();
    store.delete_course(course.id).await.unwrap();

    let err = store.update_course_if_unchanged(loaded).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict));
}

#[tokio::test]
async fn test_conflict_on_surviving_record_surfaces_as_conflict() {
    let store = memory_store();
    let course = store.insert_course(sample_course()).await.unwrap();

    let err = CourseService::write_conflict(&store, course.id).await;
    assert_eq!(err.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_conflict_on_vanished_record_surfaces_as_not_found() {
    let store = memory_store();

    let err = CourseService::write_conflict(&store, Uuid::new_v4()).await;
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let err = ResultService::write_conflict(&store, Uuid::new_v4()).await;
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sequential_updates_advance_versions() {
    let app = test_app();
    let (token, _) = register(&app, "X", "instructor", "password-1").await;

    let course = create_course(&app, &token, "Versioned").await;
    let id = course["id"].as_str().unwrap();

    for title in ["First edit", "Second edit"] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/courses/{id}"),
            Some(&token),
            Some(json!({
                "id": id,
                "title": title,
                "description": "Description",
                "price": 0.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, fetched) = send(&app, "GET", &format!("/api/courses/{id}"), Some(&token), None).await;
    assert_eq!(fetched["title"], "Second edit");
}
