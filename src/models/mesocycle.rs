use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Base,
    Build,
    Peak,
    Deload,
}

/// One week of a periodized training cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesocycleWeek {
    pub week_number: u32,
    pub phase: Phase,
    pub description: String,
}

/// One day inside a template week. `exercise_ids` reference the exercise
/// collection; a stale reference renders as an unknown slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConfig {
    pub day_index: u32,
    pub day_name: String,
    pub workout: String,
    pub exercise_ids: Vec<String>,
    pub is_rest_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekConfig {
    pub week_number: u32,
    pub phase: Phase,
    pub description: String,
    pub days: Vec<DayConfig>,
}

/// A user-authored periodization plan. Its `weeks` length is its own cycle
/// length; the builder offers 5 to 8 weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesocycleTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weeks: Vec<WeekConfig>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weeks: Vec<WeekConfig>,
}

/// Persisted user overrides for the scheduler. `None` means "follow the
/// calendar".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleState {
    pub week_override: Option<u32>,
    pub day_override: Option<u32>,
}
