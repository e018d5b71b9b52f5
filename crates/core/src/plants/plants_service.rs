use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::care_schedule;
use super::plants_model::{CareTaskType, NewPlant, Plant, PlantUpdate};
use super::plants_traits::{PlantRepositoryTrait, PlantServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::utils::time_utils;

/// Service for managing a user's plant collection.
pub struct PlantService {
    repository: Arc<dyn PlantRepositoryTrait>,
}

impl PlantService {
    pub fn new(repository: Arc<dyn PlantRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PlantServiceTrait for PlantService {
    async fn get_plants(&self, user_id: &str) -> Result<Vec<Plant>> {
        self.repository.list_by_user(user_id).await
    }

    async fn get_plant(&self, user_id: &str, plant_id: &str) -> Result<Plant> {
        self.repository.get_plant(user_id, plant_id).await
    }

    async fn create_plant(&self, new_plant: NewPlant) -> Result<Plant> {
        if new_plant.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if new_plant.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.repository.insert_plant(new_plant.into_plant()).await
    }

    async fn update_plant(
        &self,
        user_id: &str,
        plant_id: &str,
        update: PlantUpdate,
    ) -> Result<Plant> {
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::InvalidInput("name cannot be empty".to_string()).into());
        }
        self.repository.update_plant(user_id, plant_id, update).await
    }

    async fn delete_plant(&self, user_id: &str, plant_id: &str) -> Result<usize> {
        self.repository.delete_plant(user_id, plant_id).await
    }

    async fn record_care(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> Result<Plant> {
        self.repository
            .record_care(user_id, plant_id, task, Utc::now())
            .await
    }

    async fn plants_due_for_watering(
        &self,
        user_id: &str,
        target_date: NaiveDate,
    ) -> Result<Vec<Plant>> {
        let today = time_utils::care_date_today();
        let plants = self.repository.list_by_user(user_id).await?;
        Ok(plants
            .into_iter()
            .filter(|p| care_schedule::is_watering_due(p, target_date, today))
            .collect())
    }
}
