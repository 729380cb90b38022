use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::mesocycle;
use crate::models::{Exercise, FinishWorkout, WorkoutLog, WorkoutLogView, WorkoutSet};
use crate::overload::{self, Target};
use crate::repositories::{ExerciseRepository, ScheduleRepository, WorkoutRepository};

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
    pub schedule_repo: ScheduleRepository,
}

#[derive(Debug, Deserialize)]
pub struct StartWorkout {
    pub exercise_id: String,
}

#[derive(Debug, Serialize)]
pub struct StartWorkoutResponse {
    pub exercise: Exercise,
    pub target: Target,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Serialize)]
pub struct FinishWorkoutResponse {
    pub log: WorkoutLog,
    pub advanced: bool,
    pub mesocycle_complete: bool,
}

/// Start a session: derive next targets from the most recent log and seed
/// the working sets.
pub async fn start(
    State(state): State<WorkoutsState>,
    Json(form): Json<StartWorkout>,
) -> Result<Json<StartWorkoutResponse>> {
    let exercise = state
        .exercise_repo
        .find_by_id(&form.exercise_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    let last = state.workout_repo.last_for_exercise(&exercise.id).await?;
    let target = match &last {
        Some(log) => overload::next_target(&log.sets),
        None => overload::next_target(&[]),
    };

    Ok(Json(StartWorkoutResponse {
        exercise,
        target,
        sets: overload::seed_sets(target),
    }))
}

/// Finish a session: persist the completed sets and re-evaluate the
/// schedule. Only completed sets are stored; a session with none is
/// rejected and nothing is written.
pub async fn finish(
    State(state): State<WorkoutsState>,
    Json(form): Json<FinishWorkout>,
) -> Result<Response> {
    let exercise = state
        .exercise_repo
        .find_by_id(&form.exercise_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    for set in &form.sets {
        if set.reps < 0 || set.weight < 0.0 || !(0..=5).contains(&set.rir) {
            return Err(AppError::Validation("Invalid set values".to_string()));
        }
    }

    let completed: Vec<WorkoutSet> = form.sets.into_iter().filter(|s| s.completed).collect();
    if completed.is_empty() {
        return Err(AppError::Validation(
            "At least one completed set is required".to_string(),
        ));
    }

    let log = state.workout_repo.append(&exercise.id, completed).await?;
    let outcome = evaluate_schedule(&state, &exercise.id).await?;

    let response = FinishWorkoutResponse {
        log,
        advanced: outcome.advanced,
        mesocycle_complete: outcome.mesocycle_complete,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Full history with exercise names resolved; orphaned references render
/// under a placeholder name.
pub async fn list(State(state): State<WorkoutsState>) -> Result<Json<Vec<WorkoutLogView>>> {
    let logs = state.workout_repo.find_all().await?;
    let exercises = state.exercise_repo.find_all().await?;

    let views = logs
        .into_iter()
        .map(|log| {
            let name = exercises
                .iter()
                .find(|e| e.id == log.exercise_id)
                .map(|e| e.name.as_str());
            WorkoutLogView::from_log(log, name)
        })
        .collect();

    Ok(Json(views))
}

pub async fn by_exercise(
    State(state): State<WorkoutsState>,
    Path(exercise_id): Path<String>,
) -> Result<Json<Vec<WorkoutLog>>> {
    let logs = state.workout_repo.find_by_exercise(&exercise_id).await?;
    Ok(Json(logs))
}

/// After a finished workout, advance the active day if everything
/// prescribed for today has now been logged.
async fn evaluate_schedule(
    state: &WorkoutsState,
    finished_exercise_id: &str,
) -> Result<mesocycle::AdvanceOutcome> {
    let today = Local::now().date_naive();
    let schedule_state = state.schedule_repo.state().await?;
    let template = state.schedule_repo.active_template().await?;
    let exercises = state.exercise_repo.find_all().await?;

    let week = mesocycle::resolve_week(today, &schedule_state, template.as_ref());
    let day = mesocycle::resolve_day(today, &schedule_state);
    let slots = mesocycle::prescribed_for_day(week, day, template.as_ref(), &exercises);

    let prescribed_today = slots.iter().any(|slot| {
        slot.exercise
            .as_ref()
            .is_some_and(|e| e.id == finished_exercise_id)
    });
    if !prescribed_today {
        return Ok(mesocycle::AdvanceOutcome::default());
    }

    let logged_today = state.workout_repo.exercise_ids_logged_on(today).await?;
    let completed_weeks = state.schedule_repo.completed_weeks().await?;
    let cycle_len = mesocycle::cycle_len(template.as_ref());

    let outcome =
        mesocycle::evaluate_advance(week, day, &slots, &logged_today, &completed_weeks, cycle_len);

    if let Some(new_day) = outcome.new_day {
        state
            .schedule_repo
            .save_state(crate::models::ScheduleState {
                day_override: Some(new_day),
                ..schedule_state
            })
            .await?;
    }

    if let Some(week) = outcome.completed_week {
        let mut weeks = completed_weeks;
        weeks.insert(week);
        state.schedule_repo.save_completed_weeks(weeks).await?;
    }

    if outcome.mesocycle_complete {
        tracing::info!("Mesocycle complete after week {}", week);
    }

    Ok(outcome)
}
