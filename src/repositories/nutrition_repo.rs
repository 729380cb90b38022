use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{MealEntry, SavedMeal, WeightEntry};
use crate::store::{keys, KvStore};

#[derive(Clone)]
pub struct NutritionRepository {
    store: KvStore,
}

impl NutritionRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    // Body weight

    pub async fn weight_entries(&self) -> Result<Vec<WeightEntry>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<Vec<WeightEntry>>(keys::WEIGHT_ENTRIES)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn add_weight(&self, weight: f64) -> Result<WeightEntry> {
        let entry = WeightEntry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            weight,
        };
        let created = entry.clone();

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut entries = store
                .load::<Vec<WeightEntry>>(keys::WEIGHT_ENTRIES)?
                .unwrap_or_default();
            entries.insert(0, entry);
            store.save(keys::WEIGHT_ENTRIES, &entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(created)
    }

    // Meals

    pub async fn meals(&self) -> Result<Vec<MealEntry>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store.load::<Vec<MealEntry>>(keys::MEALS)?.unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Log a meal and remember it as a preset the first time its name is
    /// seen (case-insensitive).
    pub async fn add_meal(
        &self,
        name: &str,
        calories: i64,
        protein: i64,
        carbs: i64,
        fat: i64,
    ) -> Result<MealEntry> {
        let entry = MealEntry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            name: name.to_string(),
            calories,
            protein,
            carbs,
            fat,
        };
        let created = entry.clone();

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut meals = store.load::<Vec<MealEntry>>(keys::MEALS)?.unwrap_or_default();

            let mut saved = store
                .load::<Vec<SavedMeal>>(keys::SAVED_MEALS)?
                .unwrap_or_default();
            let known = saved
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case(&entry.name));
            if !known {
                saved.push(SavedMeal {
                    id: Uuid::new_v4().to_string(),
                    name: entry.name.clone(),
                    calories: entry.calories,
                    protein: entry.protein,
                    carbs: entry.carbs,
                    fat: entry.fat,
                });
                store.save(keys::SAVED_MEALS, &saved)?;
            }

            meals.insert(0, entry);
            store.save(keys::MEALS, &meals)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(created)
    }

    pub async fn delete_meal(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let mut meals = store.load::<Vec<MealEntry>>(keys::MEALS)?.unwrap_or_default();
            let before = meals.len();
            meals.retain(|m| m.id != id);
            let removed = meals.len() < before;
            if removed {
                store.save(keys::MEALS, &meals)?;
            }
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Saved meal presets

    pub async fn saved_meals(&self) -> Result<Vec<SavedMeal>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<Vec<SavedMeal>>(keys::SAVED_MEALS)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_saved_meal(&self, id: &str) -> Result<Option<SavedMeal>> {
        let id = id.to_string();
        let saved = self.saved_meals().await?;
        Ok(saved.into_iter().find(|s| s.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_repo() -> NutritionRepository {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        NutritionRepository::new(KvStore::new(pool))
    }

    #[tokio::test]
    async fn test_weight_entries_newest_first() {
        let repo = setup_repo();
        repo.add_weight(82.5).await.unwrap();
        repo.add_weight(82.1).await.unwrap();

        let entries = repo.weight_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].weight, 82.1);
    }

    #[tokio::test]
    async fn test_first_meal_name_creates_preset() {
        let repo = setup_repo();
        repo.add_meal("Chicken & Rice", 650, 45, 80, 12).await.unwrap();
        repo.add_meal("chicken & rice", 600, 40, 75, 10).await.unwrap();

        let saved = repo.saved_meals().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Chicken & Rice");
        assert_eq!(saved[0].calories, 650);
    }

    #[tokio::test]
    async fn test_delete_meal() {
        let repo = setup_repo();
        let meal = repo.add_meal("Oatmeal", 380, 13, 60, 7).await.unwrap();

        assert!(repo.delete_meal(&meal.id).await.unwrap());
        assert!(!repo.delete_meal(&meal.id).await.unwrap());
        assert!(repo.meals().await.unwrap().is_empty());
    }
}
