mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_list_seeds_default_exercises() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app.oneshot(common::get("/exercises")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let exercises = body.as_array().unwrap();
    assert_eq!(exercises.len(), 12);
    assert_eq!(exercises[0]["name"], "Bench Press");
    assert_eq!(exercises[0]["category"], "CHEST");
}

#[tokio::test]
async fn test_create_exercise() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/exercises",
            &json!({ "name": "Face Pull", "category": "SHOULDERS" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = common::body_json(response).await;
    assert_eq!(created["name"], "Face Pull");
    assert_eq!(created["category"], "SHOULDERS");

    let response = app.oneshot(common::get("/exercises")).await.unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn test_create_exercise_defaults_to_custom_category() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::post_json("/exercises", &json!({ "name": "Sled Push" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = common::body_json(response).await;
    assert_eq!(created["category"], "CUSTOM");
}

#[tokio::test]
async fn test_create_exercise_rejects_blank_name() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(common::post_json("/exercises", &json!({ "name": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_exercise() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_empty("/exercises/1/delete"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(common::post_empty("/exercises/1/delete"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(common::get("/exercises")).await.unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_delete_does_not_cascade_to_logs() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/workouts",
            &json!({
                "exercise_id": "1",
                "sets": [{ "reps": 8, "weight": 60.0, "rir": 2, "completed": true }],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(common::post_empty("/exercises/1/delete"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The log survives and renders under a placeholder name.
    let response = app.oneshot(common::get("/workouts")).await.unwrap();
    let body = common::body_json(response).await;
    let logs = body.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["exercise_name"], "Unknown exercise");
}
