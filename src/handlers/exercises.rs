use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{Category, CreateExercise, Exercise};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Vec<Exercise>>> {
    let exercises = state.exercise_repo.find_all().await?;
    Ok(Json(exercises))
}

pub async fn create(
    State(state): State<ExercisesState>,
    Json(form): Json<CreateExercise>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Exercise name is required".to_string()));
    }

    let category = form.category.unwrap_or(Category::Custom);
    let exercise = state.exercise_repo.create(name, category).await?;

    Ok((StatusCode::CREATED, Json(exercise)).into_response())
}

pub async fn delete(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.exercise_repo.delete(&id).await? {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
