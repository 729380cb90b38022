mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_settings_defaults() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app.oneshot(common::get("/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert!(body["calorie_goal"].is_null());
    assert!(body["weight_goal"].is_null());
    assert_eq!(body["dark_mode"], false);
}

#[tokio::test]
async fn test_update_and_clear_settings() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/settings",
            &json!({ "calorie_goal": 2600, "weight_goal": 80.0, "dark_mode": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["calorie_goal"], 2600);
    assert_eq!(body["weight_goal"], 80.0);
    assert_eq!(body["dark_mode"], true);

    // Omitting a goal clears it.
    let response = app
        .clone()
        .oneshot(common::post_json("/settings", &json!({ "dark_mode": true })))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["calorie_goal"].is_null());
    assert!(body["weight_goal"].is_null());
}

#[tokio::test]
async fn test_non_positive_goals_are_rejected() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json("/settings", &json!({ "calorie_goal": 0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(common::post_json("/settings", &json!({ "weight_goal": -1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_reflect_logged_data() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    app.clone()
        .oneshot(common::post_json("/weight", &json!({ "weight": 82.0 })))
        .await
        .unwrap();
    app.clone()
        .oneshot(common::post_json(
            "/meals",
            &json!({ "name": "Oatmeal", "calories": 380 }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(common::post_json(
            "/workouts",
            &json!({
                "exercise_id": "1",
                "sets": [{ "reps": 8, "weight": 60.0, "rir": 2, "completed": true }],
            }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(common::post_json(
            "/settings",
            &json!({ "calorie_goal": 2600, "weight_goal": 80.0, "dark_mode": false }),
        ))
        .await
        .unwrap();

    let response = app.oneshot(common::get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = common::body_json(response).await;
    assert_eq!(stats["current_weight"], 82.0);
    assert_eq!(stats["calorie_goal"], 2600);
    assert_eq!(stats["weight_goal"], 80.0);
    assert_eq!(stats["total_workouts"], 1);

    let weekly = stats["calories_weekly"].as_array().unwrap();
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[6]["calories"], 380);

    let monthly = stats["calories_monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 30);

    let weights = stats["weight_weekly"].as_array().unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0]["weight"], 82.0);
}

#[tokio::test]
async fn test_health_check() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app.oneshot(common::get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}
