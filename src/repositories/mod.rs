pub mod exercise_repo;
pub mod nutrition_repo;
pub mod schedule_repo;
pub mod settings_repo;
pub mod workout_repo;

pub use exercise_repo::ExerciseRepository;
pub use nutrition_repo::NutritionRepository;
pub use schedule_repo::ScheduleRepository;
pub use settings_repo::SettingsRepository;
pub use workout_repo::WorkoutRepository;
