use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::repositories::SettingsRepository;

#[derive(Clone)]
pub struct SettingsState {
    pub settings_repo: SettingsRepository,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub calorie_goal: Option<i64>,
    pub weight_goal: Option<f64>,
    pub dark_mode: bool,
}

/// Full-replace update: omitted or null goals are cleared.
#[derive(Debug, Deserialize)]
pub struct UpdateSettings {
    #[serde(default)]
    pub calorie_goal: Option<i64>,
    #[serde(default)]
    pub weight_goal: Option<f64>,
    #[serde(default)]
    pub dark_mode: bool,
}

pub async fn index(State(state): State<SettingsState>) -> Result<Json<SettingsResponse>> {
    Ok(Json(SettingsResponse {
        calorie_goal: state.settings_repo.calorie_goal().await?,
        weight_goal: state.settings_repo.weight_goal().await?,
        dark_mode: state.settings_repo.dark_mode().await?,
    }))
}

pub async fn update(
    State(state): State<SettingsState>,
    Json(form): Json<UpdateSettings>,
) -> Result<Json<SettingsResponse>> {
    if form.calorie_goal.is_some_and(|goal| goal <= 0) {
        return Err(AppError::Validation(
            "Calorie goal must be a positive number".to_string(),
        ));
    }
    if form
        .weight_goal
        .is_some_and(|goal| !goal.is_finite() || goal <= 0.0)
    {
        return Err(AppError::Validation(
            "Weight goal must be a positive number".to_string(),
        ));
    }

    state.settings_repo.set_calorie_goal(form.calorie_goal).await?;
    state.settings_repo.set_weight_goal(form.weight_goal).await?;
    state.settings_repo.set_dark_mode(form.dark_mode).await?;

    index(State(state)).await
}
