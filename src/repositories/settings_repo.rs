use crate::error::{AppError, Result};
use crate::store::{keys, KvStore};

/// User-level goals and preferences, each stored as its own scalar value.
#[derive(Clone)]
pub struct SettingsRepository {
    store: KvStore,
}

impl SettingsRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    pub async fn calorie_goal(&self) -> Result<Option<i64>> {
        self.load_scalar(keys::CALORIE_GOAL).await
    }

    pub async fn set_calorie_goal(&self, goal: Option<i64>) -> Result<()> {
        self.save_scalar(keys::CALORIE_GOAL, goal).await
    }

    pub async fn weight_goal(&self) -> Result<Option<f64>> {
        self.load_scalar(keys::WEIGHT_GOAL).await
    }

    pub async fn set_weight_goal(&self, goal: Option<f64>) -> Result<()> {
        self.save_scalar(keys::WEIGHT_GOAL, goal).await
    }

    pub async fn dark_mode(&self) -> Result<bool> {
        Ok(self.load_scalar(keys::DARK_MODE).await?.unwrap_or(false))
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.save_scalar(keys::DARK_MODE, Some(enabled)).await
    }

    async fn load_scalar<T>(&self, key: &'static str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.load::<T>(key))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn save_scalar<T>(&self, key: &'static str, value: Option<T>) -> Result<()>
    where
        T: serde::Serialize + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || match value {
            Some(value) => store.save(key, &value),
            None => store.delete(key),
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_repo() -> SettingsRepository {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        SettingsRepository::new(KvStore::new(pool))
    }

    #[tokio::test]
    async fn test_goals_default_to_unset() {
        let repo = setup_repo();
        assert!(repo.calorie_goal().await.unwrap().is_none());
        assert!(repo.weight_goal().await.unwrap().is_none());
        assert!(!repo.dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_and_clear_goals() {
        let repo = setup_repo();
        repo.set_calorie_goal(Some(2600)).await.unwrap();
        repo.set_weight_goal(Some(80.0)).await.unwrap();
        repo.set_dark_mode(true).await.unwrap();

        assert_eq!(repo.calorie_goal().await.unwrap(), Some(2600));
        assert_eq!(repo.weight_goal().await.unwrap(), Some(80.0));
        assert!(repo.dark_mode().await.unwrap());

        repo.set_calorie_goal(None).await.unwrap();
        assert!(repo.calorie_goal().await.unwrap().is_none());
    }
}
