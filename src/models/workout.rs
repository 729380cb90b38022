use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One working set as edited during a session. Only sets with
/// `completed = true` survive into the persisted log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub reps: i32,
    pub weight: f64,
    /// Reps in reserve, 0 (failure) to 5.
    pub rir: i32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A finished workout for one exercise. Immutable once created; the history
/// collection is append-only and ordered newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercise_id: String,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Deserialize)]
pub struct FinishWorkout {
    pub exercise_id: String,
    pub sets: Vec<WorkoutSet>,
}

/// A log joined with its exercise name for display. An orphaned
/// `exercise_id` (exercise deleted after logging) keeps the log readable
/// under a placeholder name.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLogView {
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutLogView {
    pub const UNKNOWN_EXERCISE: &'static str = "Unknown exercise";

    pub fn from_log(log: WorkoutLog, exercise_name: Option<&str>) -> Self {
        Self {
            id: log.id,
            date: log.date,
            exercise_id: log.exercise_id,
            exercise_name: exercise_name
                .unwrap_or(Self::UNKNOWN_EXERCISE)
                .to_string(),
            sets: log.sets,
        }
    }
}
