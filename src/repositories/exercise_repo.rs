use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{default_exercises, Category, Exercise};
use crate::store::{keys, KvStore};

#[derive(Clone)]
pub struct ExerciseRepository {
    store: KvStore,
}

impl ExerciseRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// All exercises. A fresh database is seeded with the built-in list on
    /// first read.
    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            match store.load::<Vec<Exercise>>(keys::EXERCISES)? {
                Some(exercises) => Ok(exercises),
                None => {
                    let seed = default_exercises();
                    store.save(keys::EXERCISES, &seed)?;
                    Ok(seed)
                }
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let id = id.to_string();
        let exercises = self.find_all().await?;
        Ok(exercises.into_iter().find(|e| e.id == id))
    }

    pub async fn create(&self, name: &str, category: Category) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
        };
        let created = exercise.clone();

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut exercises = store
                .load::<Vec<Exercise>>(keys::EXERCISES)?
                .unwrap_or_else(default_exercises);
            exercises.push(exercise);
            store.save(keys::EXERCISES, &exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(created)
    }

    /// Delete an exercise. Workout logs referencing it are left untouched;
    /// their references simply stop resolving.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let mut exercises = store
                .load::<Vec<Exercise>>(keys::EXERCISES)?
                .unwrap_or_else(default_exercises);
            let before = exercises.len();
            exercises.retain(|e| e.id != id);
            let removed = exercises.len() < before;
            if removed {
                store.save(keys::EXERCISES, &exercises)?;
            }
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
