mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn test_templates_start_empty() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app.oneshot(common::get("/templates")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_update_template() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/templates",
            &common::template_body("Winter block", 0, &["1"]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = common::body_json(response).await;
    assert_eq!(created["name"], "Winter block");
    assert_eq!(created["weeks"].as_array().unwrap().len(), 1);
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(common::post_json(
            &format!("/templates/{}", id),
            &common::template_body("Winter block v2", 0, &["1", "2"]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await;
    assert_eq!(updated["name"], "Winter block v2");

    let response = app.oneshot(common::get("/templates")).await.unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_template_requires_name_and_seven_days() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/templates",
            &common::template_body("  ", 0, &[]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A week with a missing day is rejected.
    let mut body = common::template_body("Short week", 0, &["1"]);
    body["weeks"][0]["days"].as_array_mut().unwrap().pop();
    let response = app
        .oneshot(common::post_json("/templates", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_template() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/templates",
            &common::template_body("Gone soon", 0, &["1"]),
        ))
        .await
        .unwrap();
    let created = common::body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(common::post_empty(&format!("/templates/{}/delete", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(common::post_empty(&format!("/templates/{}/apply", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
