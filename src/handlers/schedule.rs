use std::collections::BTreeSet;

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::mesocycle;
use crate::models::{Exercise, MesocycleWeek, ScheduleState};
use crate::repositories::{ExerciseRepository, ScheduleRepository, WorkoutRepository};

#[derive(Clone)]
pub struct ScheduleHandlerState {
    pub schedule_repo: ScheduleRepository,
    pub exercise_repo: ExerciseRepository,
    pub workout_repo: WorkoutRepository,
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub label: String,
    pub exercise: Option<Exercise>,
    pub logged_today: bool,
    pub startable: bool,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub week: MesocycleWeek,
    pub day: u32,
    pub slots: Vec<SlotView>,
    pub all_done: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub weeks: Vec<MesocycleWeek>,
    pub cycle_len: u32,
    pub completed_weeks: BTreeSet<u32>,
    pub active_template_id: Option<String>,
    pub state: ScheduleState,
}

#[derive(Debug, Deserialize)]
pub struct SelectWeek {
    pub week: u32,
}

#[derive(Debug, Deserialize)]
pub struct SelectDay {
    pub day: u32,
}

/// What should be trained today: the selected week and day plus the day's
/// prescribed exercises and their logged state.
pub async fn today(State(state): State<ScheduleHandlerState>) -> Result<Json<TodayResponse>> {
    let today = Local::now().date_naive();
    let schedule_state = state.schedule_repo.state().await?;
    let template = state.schedule_repo.active_template().await?;
    let exercises = state.exercise_repo.find_all().await?;

    let week = mesocycle::resolve_week(today, &schedule_state, template.as_ref());
    let day = mesocycle::resolve_day(today, &schedule_state);
    let slots = mesocycle::prescribed_for_day(week, day, template.as_ref(), &exercises);
    let logged_today = state.workout_repo.exercise_ids_logged_on(today).await?;

    let all_done = mesocycle::day_complete(&slots, &logged_today);
    let slots = slots
        .into_iter()
        .map(|slot| {
            let logged = slot
                .exercise
                .as_ref()
                .is_some_and(|e| logged_today.contains(&e.id));
            SlotView {
                startable: slot.exercise.is_some(),
                logged_today: logged,
                label: slot.label,
                exercise: slot.exercise,
            }
        })
        .collect();

    Ok(Json(TodayResponse {
        week: mesocycle::week_info(week, template.as_ref()),
        day,
        slots,
        all_done,
    }))
}

/// The whole cycle: week table, completion state and active template.
pub async fn plan(State(state): State<ScheduleHandlerState>) -> Result<Json<PlanResponse>> {
    let template = state.schedule_repo.active_template().await?;
    let cycle_len = mesocycle::cycle_len(template.as_ref());

    let weeks = match &template {
        Some(template) => template
            .weeks
            .iter()
            .map(|w| MesocycleWeek {
                week_number: w.week_number,
                phase: w.phase,
                description: w.description.clone(),
            })
            .collect(),
        None => mesocycle::builtin_weeks(),
    };

    Ok(Json(PlanResponse {
        weeks,
        cycle_len,
        completed_weeks: state.schedule_repo.completed_weeks().await?,
        active_template_id: state.schedule_repo.active_template_id().await?,
        state: state.schedule_repo.state().await?,
    }))
}

pub async fn select_week(
    State(state): State<ScheduleHandlerState>,
    Json(form): Json<SelectWeek>,
) -> Result<Json<ScheduleState>> {
    let template = state.schedule_repo.active_template().await?;
    let cycle_len = mesocycle::cycle_len(template.as_ref());
    if form.week < 1 || form.week > cycle_len {
        return Err(AppError::Validation(format!(
            "Week must be between 1 and {}",
            cycle_len
        )));
    }

    let mut schedule_state = state.schedule_repo.state().await?;
    schedule_state.week_override = Some(form.week);
    state.schedule_repo.save_state(schedule_state.clone()).await?;
    Ok(Json(schedule_state))
}

/// Drop the week override and follow the calendar again.
pub async fn clear_week(State(state): State<ScheduleHandlerState>) -> Result<Json<ScheduleState>> {
    let mut schedule_state = state.schedule_repo.state().await?;
    schedule_state.week_override = None;
    state.schedule_repo.save_state(schedule_state.clone()).await?;
    Ok(Json(schedule_state))
}

pub async fn select_day(
    State(state): State<ScheduleHandlerState>,
    Json(form): Json<SelectDay>,
) -> Result<Json<ScheduleState>> {
    if form.day > 6 {
        return Err(AppError::Validation(
            "Day must be between 0 (Monday) and 6 (Sunday)".to_string(),
        ));
    }

    let mut schedule_state = state.schedule_repo.state().await?;
    schedule_state.day_override = Some(form.day);
    state.schedule_repo.save_state(schedule_state.clone()).await?;
    Ok(Json(schedule_state))
}
