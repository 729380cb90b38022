use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{exercises, health, nutrition, schedule, settings, stats, templates, workouts};

#[allow(clippy::too_many_arguments)]
pub fn create_router(
    exercises_state: exercises::ExercisesState,
    workouts_state: workouts::WorkoutsState,
    schedule_state: schedule::ScheduleHandlerState,
    templates_state: templates::TemplatesState,
    nutrition_state: nutrition::NutritionState,
    stats_state: stats::StatsState,
    settings_state: settings::SettingsState,
) -> Router {
    Router::new()
        // Exercise routes
        .route("/exercises", get(exercises::list).post(exercises::create))
        .route("/exercises/{id}/delete", post(exercises::delete))
        .with_state(exercises_state)
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::finish))
        .route("/workouts/start", post(workouts::start))
        .route("/workouts/exercise/{id}", get(workouts::by_exercise))
        .with_state(workouts_state)
        // Schedule routes
        .route("/schedule/today", get(schedule::today))
        .route("/schedule/plan", get(schedule::plan))
        .route("/schedule/week", post(schedule::select_week))
        .route("/schedule/week/clear", post(schedule::clear_week))
        .route("/schedule/day", post(schedule::select_day))
        .with_state(schedule_state)
        // Mesocycle template routes
        .route("/templates", get(templates::list).post(templates::create))
        .route("/templates/{id}", post(templates::update))
        .route("/templates/{id}/apply", post(templates::apply))
        .route("/templates/{id}/delete", post(templates::delete))
        .with_state(templates_state)
        // Nutrition routes
        .route("/weight", get(nutrition::weight_list).post(nutrition::weight_create))
        .route("/meals", get(nutrition::meal_list).post(nutrition::meal_create))
        .route("/meals/today", get(nutrition::meal_today))
        .route("/meals/scan", post(nutrition::meal_from_scan))
        .route("/meals/{id}/delete", post(nutrition::meal_delete))
        .route("/saved-meals", get(nutrition::saved_meal_list))
        .route("/saved-meals/{id}/log", post(nutrition::saved_meal_log))
        .with_state(nutrition_state)
        // Stats routes
        .route("/stats", get(stats::index))
        .with_state(stats_state)
        // Settings routes
        .route("/settings", get(settings::index).post(settings::update))
        .with_state(settings_state)
        // Health check
        .route("/health", get(health::check))
}
