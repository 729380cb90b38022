use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Built-in seed list, used whenever no exercise collection has been
/// persisted yet.
pub fn default_exercises() -> Vec<Exercise> {
    const SEED: &[(&str, &str, Category)] = &[
        ("1", "Bench Press", Category::Chest),
        ("2", "Squat", Category::Legs),
        ("3", "Deadlift", Category::Back),
        ("4", "Overhead Press", Category::Shoulders),
        ("5", "Barbell Row", Category::Back),
        ("6", "Pull-ups", Category::Back),
        ("7", "Dumbbell Curl", Category::Biceps),
        ("8", "Tricep Pushdown", Category::Triceps),
        ("9", "Leg Press", Category::Legs),
        ("10", "Lat Pulldown", Category::Back),
        ("11", "Incline Bench Press", Category::Chest),
        ("12", "Romanian Deadlift", Category::Legs),
    ];

    SEED.iter()
        .map(|(id, name, category)| Exercise {
            id: id.to_string(),
            name: name.to_string(),
            category: *category,
        })
        .collect()
}
