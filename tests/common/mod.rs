use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;

use fittrack::db::{create_memory_pool, DbPool};
use fittrack::handlers::{exercises, nutrition, schedule, settings, stats, templates, workouts};
use fittrack::migrations::run_migrations_for_tests;
use fittrack::repositories::{
    ExerciseRepository, NutritionRepository, ScheduleRepository, SettingsRepository,
    WorkoutRepository,
};
use fittrack::store::KvStore;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let store = KvStore::new(pool);
    let exercise_repo = ExerciseRepository::new(store.clone());
    let workout_repo = WorkoutRepository::new(store.clone());
    let schedule_repo = ScheduleRepository::new(store.clone());
    let nutrition_repo = NutritionRepository::new(store.clone());
    let settings_repo = SettingsRepository::new(store);

    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
        exercise_repo: exercise_repo.clone(),
        schedule_repo: schedule_repo.clone(),
    };
    let schedule_state = schedule::ScheduleHandlerState {
        schedule_repo: schedule_repo.clone(),
        exercise_repo,
        workout_repo: workout_repo.clone(),
    };
    let templates_state = templates::TemplatesState { schedule_repo };
    let nutrition_state = nutrition::NutritionState {
        nutrition_repo: nutrition_repo.clone(),
    };
    let stats_state = stats::StatsState {
        nutrition_repo,
        workout_repo,
        settings_repo: settings_repo.clone(),
    };
    let settings_state = settings::SettingsState { settings_repo };

    fittrack::routes::create_router(
        exercises_state,
        workouts_state,
        schedule_state,
        templates_state,
        nutrition_state,
        stats_state,
        settings_state,
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A minimal one-week template body: every day is a rest day except the
/// given day, which prescribes the given exercise ids.
pub fn template_body(name: &str, training_day: u32, exercise_ids: &[&str]) -> Value {
    let days: Vec<Value> = (0u32..7)
        .map(|i| {
            serde_json::json!({
                "day_index": i,
                "day_name": format!("Day {}", i + 1),
                "workout": if i == training_day { "Training" } else { "" },
                "exercise_ids": if i == training_day { exercise_ids.to_vec() } else { Vec::new() },
                "is_rest_day": i != training_day,
            })
        })
        .collect();

    serde_json::json!({
        "name": name,
        "description": "",
        "weeks": [{
            "week_number": 1,
            "phase": "BASE",
            "description": "Single test week",
            "days": days,
        }],
    })
}
