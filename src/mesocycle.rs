//! Mesocycle scheduling.
//!
//! Resolves the current training week, phase and day, prescribes the day's
//! exercises (from the built-in 8-week plan or an active user template), and
//! decides when a finished workout advances the schedule.
//!
//! Everything here is pure; persistence of the resulting state is the
//! caller's concern.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Exercise, MesocycleTemplate, MesocycleWeek, Phase, ScheduleState};

/// Length of the built-in cycle.
pub const CYCLE_WEEKS: u32 = 8;

/// The fixed 8-week plan used when no custom template is active.
const BUILTIN_PLAN: [(Phase, &str); 8] = [
    (Phase::Base, "Volume accumulation at moderate loads"),
    (Phase::Base, "Volume accumulation, add a set where it feels easy"),
    (Phase::Build, "Load increases, keep rep quality high"),
    (Phase::Build, "Load increases, push working sets closer to failure"),
    (Phase::Build, "Heaviest straight sets of the block"),
    (Phase::Peak, "Near-maximal top sets, reduced accessory work"),
    (Phase::Peak, "Peak intensity, minimal volume"),
    (Phase::Deload, "Recovery week, light loads and easy effort"),
];

/// Per-week exercise selection for the built-in plan. Monday and Thursday
/// train entries 0-1, Tuesday and Friday entries 2-3, the rest are off days.
const BUILTIN_SPLIT: [[&str; 4]; 8] = [
    ["Bench Press", "Overhead Press", "Squat", "Romanian Deadlift"],
    ["Incline Bench Press", "Barbell Row", "Deadlift", "Leg Press"],
    ["Bench Press", "Pull-ups", "Squat", "Romanian Deadlift"],
    ["Overhead Press", "Lat Pulldown", "Deadlift", "Leg Press"],
    ["Bench Press", "Barbell Row", "Squat", "Leg Press"],
    ["Incline Bench Press", "Pull-ups", "Deadlift", "Romanian Deadlift"],
    ["Bench Press", "Overhead Press", "Squat", "Deadlift"],
    ["Bench Press", "Lat Pulldown", "Squat", "Leg Press"],
];

pub fn builtin_week(week_number: u32) -> MesocycleWeek {
    let (phase, description) = BUILTIN_PLAN[(week_number.saturating_sub(1) as usize).min(7)];
    MesocycleWeek {
        week_number,
        phase,
        description: description.to_string(),
    }
}

pub fn builtin_weeks() -> Vec<MesocycleWeek> {
    (1..=CYCLE_WEEKS).map(builtin_week).collect()
}

/// Calendar week number of `date`, counting from the week containing
/// January 1st of its year (Sunday-anchored, matching `Date.getDay`).
pub fn calendar_week(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).expect("Jan 1 always exists");
    let days_since_jan1 = date.ordinal0() as i64;
    let offset = jan1.weekday().num_days_from_sunday() as i64;
    ((days_since_jan1 + offset) / 7 + 1) as u32
}

/// Reduce a raw week number into 1..=cycle_len; 0 maps to the final week,
/// never to an out-of-range entry.
pub fn cycle_week(raw_week: u32, cycle_len: u32) -> u32 {
    let reduced = raw_week % cycle_len;
    if reduced == 0 {
        cycle_len
    } else {
        reduced
    }
}

/// Cycle length in effect: a custom template wraps at its own declared
/// length, the built-in plan at eight weeks.
pub fn cycle_len(template: Option<&MesocycleTemplate>) -> u32 {
    template
        .map(|t| t.weeks.len() as u32)
        .filter(|len| *len > 0)
        .unwrap_or(CYCLE_WEEKS)
}

/// Currently selected training week: the user's override if set, otherwise
/// the calendar week folded into the cycle.
pub fn resolve_week(
    today: NaiveDate,
    state: &ScheduleState,
    template: Option<&MesocycleTemplate>,
) -> u32 {
    let len = cycle_len(template);
    match state.week_override {
        Some(week) => cycle_week(week, len),
        None => cycle_week(calendar_week(today), len),
    }
}

/// Currently active day index (Monday = 0): the user's override if set,
/// otherwise today's weekday.
pub fn resolve_day(today: NaiveDate, state: &ScheduleState) -> u32 {
    state
        .day_override
        .unwrap_or_else(|| today.weekday().num_days_from_monday())
}

/// Phase and description of the selected week.
pub fn week_info(week: u32, template: Option<&MesocycleTemplate>) -> MesocycleWeek {
    if let Some(template) = template {
        if let Some(config) = template.weeks.iter().find(|w| w.week_number == week) {
            return MesocycleWeek {
                week_number: config.week_number,
                phase: config.phase,
                description: config.description.clone(),
            };
        }
    }
    builtin_week(week)
}

/// One prescribed exercise slot for a day. A slot whose reference no longer
/// resolves keeps its label but cannot be started or satisfied.
#[derive(Debug, Clone, Serialize)]
pub struct PrescribedSlot {
    pub label: String,
    pub exercise: Option<Exercise>,
}

impl PrescribedSlot {
    pub const UNKNOWN: &'static str = "Unknown exercise";

    fn resolved(exercise: &Exercise) -> Self {
        Self {
            label: exercise.name.clone(),
            exercise: Some(exercise.clone()),
        }
    }

    fn unresolved(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            exercise: None,
        }
    }
}

/// Exercises prescribed for `day` of `week`.
pub fn prescribed_for_day(
    week: u32,
    day: u32,
    template: Option<&MesocycleTemplate>,
    exercises: &[Exercise],
) -> Vec<PrescribedSlot> {
    if let Some(template) = template {
        let Some(config) = template
            .weeks
            .iter()
            .find(|w| w.week_number == week)
            .and_then(|w| w.days.iter().find(|d| d.day_index == day))
        else {
            return Vec::new();
        };

        if config.is_rest_day {
            return Vec::new();
        }

        return config
            .exercise_ids
            .iter()
            .map(|id| match exercises.iter().find(|e| &e.id == id) {
                Some(exercise) => PrescribedSlot::resolved(exercise),
                None => PrescribedSlot::unresolved(PrescribedSlot::UNKNOWN),
            })
            .collect();
    }

    let split = &BUILTIN_SPLIT[(week.saturating_sub(1) as usize).min(7)];
    let names: &[&str] = match day {
        // Monday and Thursday
        0 | 3 => &split[0..2],
        // Tuesday and Friday
        1 | 4 => &split[2..4],
        _ => &[],
    };

    names
        .iter()
        .map(|name| {
            match exercises
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(name))
            {
                Some(exercise) => PrescribedSlot::resolved(exercise),
                None => PrescribedSlot::unresolved(*name),
            }
        })
        .collect()
}

/// Whether every prescribed slot has been logged today. Matching is by
/// exercise id; an unresolved slot can never be satisfied, so a day
/// containing one never completes.
pub fn day_complete(slots: &[PrescribedSlot], logged_today: &HashSet<String>) -> bool {
    !slots.is_empty()
        && slots.iter().all(|slot| {
            slot.exercise
                .as_ref()
                .is_some_and(|e| logged_today.contains(&e.id))
        })
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AdvanceOutcome {
    pub advanced: bool,
    pub new_day: Option<u32>,
    pub completed_week: Option<u32>,
    pub mesocycle_complete: bool,
}

/// Decide whether finishing a workout advances the schedule.
///
/// When all of the day's prescribed exercises have been logged, the active
/// day moves forward one step; wrapping past Sunday records the week as
/// completed, and finishing the final week of a fully worked cycle raises
/// the mesocycle-complete signal. Counters are never rolled back here.
pub fn evaluate_advance(
    week: u32,
    day: u32,
    slots: &[PrescribedSlot],
    logged_today: &HashSet<String>,
    completed_weeks: &BTreeSet<u32>,
    cycle_len: u32,
) -> AdvanceOutcome {
    if !day_complete(slots, logged_today) {
        return AdvanceOutcome::default();
    }

    let new_day = (day + 1) % 7;
    let completed_week = (new_day == 0 && !completed_weeks.contains(&week)).then_some(week);

    let completed_count = completed_weeks.len() + usize::from(completed_week.is_some());
    let mesocycle_complete = completed_count >= (cycle_len as usize - 1) && week == cycle_len;

    AdvanceOutcome {
        advanced: true,
        new_day: Some(new_day),
        completed_week,
        mesocycle_complete,
    }
}
