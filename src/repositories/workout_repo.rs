use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{WorkoutLog, WorkoutSet};
use crate::store::{keys, KvStore};

#[derive(Clone)]
pub struct WorkoutRepository {
    store: KvStore,
}

impl WorkoutRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Full history, newest first.
    pub async fn find_all(&self) -> Result<Vec<WorkoutLog>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<Vec<WorkoutLog>>(keys::WORKOUTS)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_exercise(&self, exercise_id: &str) -> Result<Vec<WorkoutLog>> {
        let exercise_id = exercise_id.to_string();
        let mut logs = self.find_all().await?;
        logs.retain(|log| log.exercise_id == exercise_id);
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    /// Most recent log for an exercise, if any.
    pub async fn last_for_exercise(&self, exercise_id: &str) -> Result<Option<WorkoutLog>> {
        Ok(self.find_by_exercise(exercise_id).await?.into_iter().next())
    }

    /// Append a finished workout. Logs are immutable once written.
    pub async fn append(&self, exercise_id: &str, sets: Vec<WorkoutSet>) -> Result<WorkoutLog> {
        let log = WorkoutLog {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            exercise_id: exercise_id.to_string(),
            sets,
        };
        let created = log.clone();

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut logs = store
                .load::<Vec<WorkoutLog>>(keys::WORKOUTS)?
                .unwrap_or_default();
            logs.insert(0, log);
            store.save(keys::WORKOUTS, &logs)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(created)
    }

    /// Ids of exercises with at least one log on the given local calendar
    /// day. Used for completion matching against the day's prescription.
    pub async fn exercise_ids_logged_on(&self, day: NaiveDate) -> Result<HashSet<String>> {
        let logs = self.find_all().await?;
        Ok(logs
            .into_iter()
            .filter(|log| local_day(log.date) == day)
            .map(|log| log.exercise_id)
            .collect())
    }
}

fn local_day(date: DateTime<Utc>) -> NaiveDate {
    date.with_timezone(&Local).date_naive()
}
