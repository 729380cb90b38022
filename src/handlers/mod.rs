pub mod exercises;
pub mod health;
pub mod nutrition;
pub mod schedule;
pub mod settings;
pub mod stats;
pub mod templates;
pub mod workouts;
