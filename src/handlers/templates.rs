use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{CreateTemplate, MesocycleTemplate, WeekConfig};
use crate::repositories::ScheduleRepository;

#[derive(Clone)]
pub struct TemplatesState {
    pub schedule_repo: ScheduleRepository,
}

pub async fn list(State(state): State<TemplatesState>) -> Result<Json<Vec<MesocycleTemplate>>> {
    let templates = state.schedule_repo.templates().await?;
    Ok(Json(templates))
}

pub async fn create(
    State(state): State<TemplatesState>,
    Json(form): Json<CreateTemplate>,
) -> Result<Response> {
    validate_template(&form.name, &form.weeks)?;

    let template = state
        .schedule_repo
        .create_template(form.name.trim(), &form.description, form.weeks)
        .await?;

    Ok((StatusCode::CREATED, Json(template)).into_response())
}

pub async fn update(
    State(state): State<TemplatesState>,
    Path(id): Path<String>,
    Json(form): Json<CreateTemplate>,
) -> Result<Json<MesocycleTemplate>> {
    validate_template(&form.name, &form.weeks)?;

    let template = state
        .schedule_repo
        .update_template(&id, form.name.trim(), &form.description, form.weeks)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

    Ok(Json(template))
}

/// Make a template the active plan. This restarts the cycle: completed
/// weeks are cleared and the schedule points at week 1, day 0.
pub async fn apply(
    State(state): State<TemplatesState>,
    Path(id): Path<String>,
) -> Result<Json<MesocycleTemplate>> {
    let template = state
        .schedule_repo
        .apply_template(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

    Ok(Json(template))
}

pub async fn delete(
    State(state): State<TemplatesState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if !state.schedule_repo.delete_template(&id).await? {
        return Err(AppError::NotFound("Template not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_template(name: &str, weeks: &[WeekConfig]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Template name is required".to_string()));
    }
    if weeks.is_empty() {
        return Err(AppError::Validation(
            "A template needs at least one week".to_string(),
        ));
    }
    for week in weeks {
        if week.days.len() != 7 {
            return Err(AppError::Validation(format!(
                "Week {} must have exactly 7 days",
                week.week_number
            )));
        }
        if week.days.iter().any(|d| d.day_index > 6) {
            return Err(AppError::Validation(format!(
                "Week {} has an out-of-range day index",
                week.week_number
            )));
        }
    }
    Ok(())
}
