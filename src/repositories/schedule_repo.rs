use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{MesocycleTemplate, ScheduleState, WeekConfig};
use crate::store::{keys, KvStore};

#[derive(Clone)]
pub struct ScheduleRepository {
    store: KvStore,
}

impl ScheduleRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    // Scheduler state

    pub async fn state(&self) -> Result<ScheduleState> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<ScheduleState>(keys::SCHEDULE_STATE)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn save_state(&self, state: ScheduleState) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.save(keys::SCHEDULE_STATE, &state))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn completed_weeks(&self) -> Result<BTreeSet<u32>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<BTreeSet<u32>>(keys::COMPLETED_WEEKS)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn save_completed_weeks(&self, weeks: BTreeSet<u32>) -> Result<()> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.save(keys::COMPLETED_WEEKS, &weeks))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Templates

    pub async fn templates(&self) -> Result<Vec<MesocycleTemplate>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<Vec<MesocycleTemplate>>(keys::TEMPLATES)?
                .unwrap_or_default())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_template(&self, id: &str) -> Result<Option<MesocycleTemplate>> {
        let id = id.to_string();
        let templates = self.templates().await?;
        Ok(templates.into_iter().find(|t| t.id == id))
    }

    pub async fn create_template(
        &self,
        name: &str,
        description: &str,
        weeks: Vec<WeekConfig>,
    ) -> Result<MesocycleTemplate> {
        let template = MesocycleTemplate {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weeks,
            created_at: Utc::now(),
        };
        let created = template.clone();

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut templates = store
                .load::<Vec<MesocycleTemplate>>(keys::TEMPLATES)?
                .unwrap_or_default();
            templates.push(template);
            store.save(keys::TEMPLATES, &templates)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(created)
    }

    pub async fn update_template(
        &self,
        id: &str,
        name: &str,
        description: &str,
        weeks: Vec<WeekConfig>,
    ) -> Result<Option<MesocycleTemplate>> {
        let id = id.to_string();
        let name = name.to_string();
        let description = description.to_string();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let mut templates = store
                .load::<Vec<MesocycleTemplate>>(keys::TEMPLATES)?
                .unwrap_or_default();

            let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            template.name = name;
            template.description = description;
            template.weeks = weeks;
            let updated = template.clone();

            store.save(keys::TEMPLATES, &templates)?;
            Ok(Some(updated))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a template. Deleting the active template also clears the
    /// active id, dropping the scheduler back to the built-in plan.
    pub async fn delete_template(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let mut templates = store
                .load::<Vec<MesocycleTemplate>>(keys::TEMPLATES)?
                .unwrap_or_default();
            let before = templates.len();
            templates.retain(|t| t.id != id);
            let removed = templates.len() < before;
            if removed {
                store.save(keys::TEMPLATES, &templates)?;
                let active = store.load::<Option<String>>(keys::ACTIVE_TEMPLATE_ID)?.flatten();
                if active.as_deref() == Some(id.as_str()) {
                    store.save(keys::ACTIVE_TEMPLATE_ID, &None::<String>)?;
                }
            }
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn active_template_id(&self) -> Result<Option<String>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            Ok(store
                .load::<Option<String>>(keys::ACTIVE_TEMPLATE_ID)?
                .flatten())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn active_template(&self) -> Result<Option<MesocycleTemplate>> {
        let Some(id) = self.active_template_id().await? else {
            return Ok(None);
        };
        self.find_template(&id).await
    }

    /// Make a template active and restart the cycle: completed weeks are
    /// cleared and the schedule points at week 1, day 0.
    pub async fn apply_template(&self, id: &str) -> Result<Option<MesocycleTemplate>> {
        let Some(template) = self.find_template(id).await? else {
            return Ok(None);
        };

        let id = id.to_string();
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            store.save(keys::ACTIVE_TEMPLATE_ID, &Some(id))?;
            store.save(keys::COMPLETED_WEEKS, &BTreeSet::<u32>::new())?;
            store.save(
                keys::SCHEDULE_STATE,
                &ScheduleState {
                    week_override: Some(1),
                    day_override: Some(0),
                },
            )
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(Some(template))
    }
}
