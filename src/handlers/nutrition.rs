use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{
    CreateMealEntry, CreateWeightEntry, LogScannedFood, MealEntry, SavedMeal, WeightEntry,
};
use crate::repositories::NutritionRepository;

#[derive(Clone)]
pub struct NutritionState {
    pub nutrition_repo: NutritionRepository,
}

#[derive(Debug, Serialize)]
pub struct WeightResponse {
    pub current: Option<f64>,
    pub entries: Vec<WeightEntry>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

// Body weight

pub async fn weight_list(State(state): State<NutritionState>) -> Result<Json<WeightResponse>> {
    let entries = state.nutrition_repo.weight_entries().await?;
    Ok(Json(WeightResponse {
        current: entries.first().map(|e| e.weight),
        entries,
    }))
}

pub async fn weight_create(
    State(state): State<NutritionState>,
    Json(form): Json<CreateWeightEntry>,
) -> Result<Response> {
    if !form.weight.is_finite() || form.weight <= 0.0 {
        return Err(AppError::Validation(
            "Weight must be a positive number".to_string(),
        ));
    }

    let entry = state.nutrition_repo.add_weight(form.weight).await?;
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

// Meals

pub async fn meal_list(State(state): State<NutritionState>) -> Result<Json<Vec<MealEntry>>> {
    let meals = state.nutrition_repo.meals().await?;
    Ok(Json(meals))
}

pub async fn meal_create(
    State(state): State<NutritionState>,
    Json(form): Json<CreateMealEntry>,
) -> Result<Response> {
    let entry = log_meal(&state, form).await?;
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

pub async fn meal_delete(
    State(state): State<NutritionState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.nutrition_repo.delete_meal(&id).await? {
        return Err(AppError::NotFound("Meal not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Today's intake, aggregated per local calendar day.
pub async fn meal_today(State(state): State<NutritionState>) -> Result<Json<MacroTotals>> {
    let today = Local::now().date_naive();
    let meals = state.nutrition_repo.meals().await?;

    let totals = meals
        .iter()
        .filter(|m| m.date.with_timezone(&Local).date_naive() == today)
        .fold(MacroTotals::default(), |mut acc, m| {
            acc.calories += m.calories;
            acc.protein += m.protein;
            acc.carbs += m.carbs;
            acc.fat += m.fat;
            acc
        });

    Ok(Json(totals))
}

// Saved meal presets

pub async fn saved_meal_list(State(state): State<NutritionState>) -> Result<Json<Vec<SavedMeal>>> {
    let saved = state.nutrition_repo.saved_meals().await?;
    Ok(Json(saved))
}

/// One-tap re-entry: log a new meal dated now from a remembered preset.
pub async fn saved_meal_log(
    State(state): State<NutritionState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let saved = state
        .nutrition_repo
        .find_saved_meal(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Saved meal not found".to_string()))?;

    let entry = state
        .nutrition_repo
        .add_meal(
            &saved.name,
            saved.calories,
            saved.protein,
            saved.carbs,
            saved.fat,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// Log a meal from scanned product data (per 100 g), scaled to the entered
/// quantity in grams.
pub async fn meal_from_scan(
    State(state): State<NutritionState>,
    Json(form): Json<LogScannedFood>,
) -> Result<Response> {
    if !form.quantity.is_finite() || form.quantity <= 0.0 {
        return Err(AppError::Validation(
            "Quantity must be a positive number of grams".to_string(),
        ));
    }

    let entry = log_meal(&state, form.food.scaled(form.quantity)).await?;
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

async fn log_meal(state: &NutritionState, form: CreateMealEntry) -> Result<MealEntry> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Meal name is required".to_string()));
    }
    if form.calories <= 0 {
        return Err(AppError::Validation(
            "Calories must be a positive number".to_string(),
        ));
    }
    if form.protein < 0 || form.carbs < 0 || form.fat < 0 {
        return Err(AppError::Validation(
            "Macros cannot be negative".to_string(),
        ));
    }

    state
        .nutrition_repo
        .add_meal(name, form.calories, form.protein, form.carbs, form.fat)
        .await
}
