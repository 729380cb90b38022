use axum::{extract::State, Json};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::{MealEntry, WeightEntry};
use crate::repositories::{NutritionRepository, SettingsRepository, WorkoutRepository};

#[derive(Clone)]
pub struct StatsState {
    pub nutrition_repo: NutritionRepository,
    pub workout_repo: WorkoutRepository,
    pub settings_repo: SettingsRepository,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub current_weight: Option<f64>,
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<i64>,
    pub total_workouts: usize,
    pub calories_weekly: Vec<DayTotals>,
    pub calories_monthly: Vec<DayTotals>,
    pub weight_weekly: Vec<WeightPoint>,
    pub weight_monthly: Vec<WeightPoint>,
}

pub async fn index(State(state): State<StatsState>) -> Result<Json<StatsResponse>> {
    let today = Local::now().date_naive();
    let meals = state.nutrition_repo.meals().await?;
    let weights = state.nutrition_repo.weight_entries().await?;
    let workouts = state.workout_repo.find_all().await?;

    Ok(Json(StatsResponse {
        current_weight: weights.first().map(|e| e.weight),
        weight_goal: state.settings_repo.weight_goal().await?,
        calorie_goal: state.settings_repo.calorie_goal().await?,
        total_workouts: workouts.len(),
        calories_weekly: daily_totals(&meals, today, 7),
        calories_monthly: daily_totals(&meals, today, 30),
        weight_weekly: weight_series(&weights, today, 7),
        weight_monthly: weight_series(&weights, today, 30),
    }))
}

fn local_day(date: DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}

/// Per-day macro totals for the window ending today, oldest day first.
/// Days without meals appear as zero rows so trend charts stay contiguous.
fn daily_totals(meals: &[MealEntry], today: NaiveDate, days: i64) -> Vec<DayTotals> {
    (0..days)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let mut totals = DayTotals {
                date,
                calories: 0,
                protein: 0,
                carbs: 0,
                fat: 0,
            };
            for meal in meals.iter().filter(|m| local_day(m.date) == date) {
                totals.calories += meal.calories;
                totals.protein += meal.protein;
                totals.carbs += meal.carbs;
                totals.fat += meal.fat;
            }
            totals
        })
        .collect()
}

/// Most recent weigh-in per day inside the window, oldest first. Days
/// without a weigh-in are skipped.
fn weight_series(entries: &[WeightEntry], today: NaiveDate, days: i64) -> Vec<WeightPoint> {
    let cutoff = today - Duration::days(days - 1);
    let mut points: Vec<WeightPoint> = Vec::new();

    // Entries are stored newest first; keep the first (latest) per day.
    for entry in entries {
        let date = local_day(entry.date);
        if date < cutoff || date > today {
            continue;
        }
        if points.iter().any(|p| p.date == date) {
            continue;
        }
        points.push(WeightPoint {
            date,
            weight: entry.weight,
        });
    }

    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meal_on(date: NaiveDate, calories: i64) -> MealEntry {
        let local = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap();
        MealEntry {
            id: format!("m-{}-{}", date, calories),
            date: local.with_timezone(&Utc),
            name: "Meal".to_string(),
            calories,
            protein: 10,
            carbs: 20,
            fat: 5,
        }
    }

    fn weight_on(date: NaiveDate, weight: f64, hour: u32) -> WeightEntry {
        let local = Local
            .from_local_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
            .unwrap();
        WeightEntry {
            id: format!("w-{}-{}", date, hour),
            date: local.with_timezone(&Utc),
            weight,
        }
    }

    #[test]
    fn test_daily_totals_buckets_by_calendar_day() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let meals = vec![
            meal_on(today, 500),
            meal_on(today, 700),
            meal_on(yesterday, 900),
        ];

        let totals = daily_totals(&meals, today, 7);
        assert_eq!(totals.len(), 7);
        assert_eq!(totals[6].date, today);
        assert_eq!(totals[6].calories, 1200);
        assert_eq!(totals[5].calories, 900);
        assert_eq!(totals[0].calories, 0);
    }

    #[test]
    fn test_daily_totals_excludes_outside_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let old = today - Duration::days(10);
        let totals = daily_totals(&[meal_on(old, 800)], today, 7);
        assert!(totals.iter().all(|t| t.calories == 0));
    }

    #[test]
    fn test_weight_series_keeps_latest_entry_per_day() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        // Newest first, like the stored collection.
        let entries = vec![
            weight_on(today, 81.8, 20),
            weight_on(today, 82.4, 7),
            weight_on(today.pred_opt().unwrap(), 82.9, 8),
        ];

        let series = weight_series(&entries, today, 7);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].date, today);
        assert_eq!(series[1].weight, 81.8);
        assert_eq!(series[0].weight, 82.9);
    }

    #[test]
    fn test_weight_series_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let old = today - Duration::days(40);
        let series = weight_series(&[weight_on(old, 85.0, 9)], today, 30);
        assert!(series.is_empty());
    }
}
