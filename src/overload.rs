//! Progressive overload targets.
//!
//! Given the sets from the most recent logged session for an exercise, this
//! derives the weight and rep prescription for the next session. Only sets
//! taken close to failure (RIR <= 2) count as signal; everything else falls
//! back to repeating the last prescription.

use serde::Serialize;

use crate::models::WorkoutSet;

/// Starting prescription for an exercise with no history.
pub const DEFAULT_WEIGHT: f64 = 50.0;
pub const DEFAULT_REPS: i32 = 8;

/// Rep ceiling; past this, progression moves to weight instead.
pub const MAX_REPS: i32 = 12;

/// Smallest practical plate jump.
pub const WEIGHT_INCREMENT: f64 = 2.5;

/// Number of working sets seeded for a new session.
pub const WORKING_SETS: usize = 4;

/// Default RIR estimate for a set that has not been performed yet.
pub const DEFAULT_RIR: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    pub weight: f64,
    pub reps: i32,
}

/// Compute the next session's target from the previous session's sets.
///
/// Total over all inputs: empty history yields the fixed default, and a
/// session with no hard completed sets repeats its first set verbatim.
pub fn next_target(last_sets: &[WorkoutSet]) -> Target {
    if last_sets.is_empty() {
        return Target {
            weight: DEFAULT_WEIGHT,
            reps: DEFAULT_REPS,
        };
    }

    let candidates: Vec<&WorkoutSet> = last_sets
        .iter()
        .filter(|s| s.completed && s.rir <= 2)
        .collect();

    let Some(first) = candidates.first() else {
        return Target {
            weight: last_sets[0].weight,
            reps: last_sets[0].reps,
        };
    };

    // Best set: most reps, ties broken by heaviest weight.
    let best = candidates.iter().skip(1).fold(*first, |a, &b| {
        if a.reps > b.reps || (a.reps == b.reps && a.weight > b.weight) {
            a
        } else {
            b
        }
    });

    let mut target = Target {
        weight: best.weight,
        reps: best.reps,
    };

    if best.rir <= 1 {
        // At or near failure: add weight, rounded to the nearest increment.
        target.weight =
            ((best.weight + WEIGHT_INCREMENT) / WEIGHT_INCREMENT).round() * WEIGHT_INCREMENT;
    } else if best.rir >= 3 {
        // Too easy: add a rep, capped.
        target.reps = (best.reps + 1).min(MAX_REPS);
    }
    // RIR of exactly 2 is on target: keep the prescription as-is.

    target
}

/// Seed the working sets for a freshly started session. The RIR starts at
/// the default estimate regardless of the computed target.
pub fn seed_sets(target: Target) -> Vec<WorkoutSet> {
    (0..WORKING_SETS)
        .map(|_| WorkoutSet {
            reps: target.reps,
            weight: target.weight,
            rir: DEFAULT_RIR,
            completed: false,
            note: None,
        })
        .collect()
}
