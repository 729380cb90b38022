use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateWeightEntry {
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub name: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealEntry {
    pub name: String,
    pub calories: i64,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fat: i64,
}

/// A meal preset remembered from a previously logged meal, deduplicated by
/// name for one-tap re-entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMeal {
    pub id: String,
    pub name: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Nutrition data for a looked-up food product, normalized to a 100 g
/// serving by the external lookup collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodData {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodData {
    /// Scale the per-100 g values to an entered quantity in grams, rounding
    /// each field to the nearest whole unit.
    pub fn scaled(&self, quantity: f64) -> CreateMealEntry {
        let multiplier = quantity / 100.0;
        CreateMealEntry {
            name: self.name.clone(),
            calories: (self.calories * multiplier).round() as i64,
            protein: (self.protein * multiplier).round() as i64,
            carbs: (self.carbs * multiplier).round() as i64,
            fat: (self.fat * multiplier).round() as i64,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogScannedFood {
    pub food: FoodData,
    pub quantity: f64,
}
