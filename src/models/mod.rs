pub mod exercise;
pub mod mesocycle;
pub mod nutrition;
pub mod workout;

pub use exercise::{default_exercises, Category, CreateExercise, Exercise};
pub use mesocycle::{
    CreateTemplate, DayConfig, MesocycleTemplate, MesocycleWeek, Phase, ScheduleState, WeekConfig,
};
pub use nutrition::{
    CreateMealEntry, CreateWeightEntry, FoodData, LogScannedFood, MealEntry, SavedMeal, WeightEntry,
};
pub use workout::{FinishWorkout, WorkoutLog, WorkoutLogView, WorkoutSet};
