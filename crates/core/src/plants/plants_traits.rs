use crate::errors::Result;
use crate::plants::plants_model::{CareTaskType, NewPlant, Plant, PlantUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for plant repository operations
#[async_trait]
pub trait PlantRepositoryTrait: Send + Sync {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Plant>>;
    async fn get_plant(&self, user_id: &str, plant_id: &str) -> Result<Plant>;
    async fn insert_plant(&self, plant: Plant) -> Result<Plant>;
    async fn update_plant(
        &self,
        user_id: &str,
        plant_id: &str,
        update: PlantUpdate,
    ) -> Result<Plant>;
    async fn delete_plant(&self, user_id: &str, plant_id: &str) -> Result<usize>;
    /// Sets the matching `last_*` timestamp for the given care dimension.
    async fn record_care(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
        at: DateTime<Utc>,
    ) -> Result<Plant>;
    async fn count_by_user(&self, user_id: &str) -> Result<i64>;
    async fn count_photographed(&self, user_id: &str) -> Result<i64>;
}

/// Trait for plant service operations
#[async_trait]
pub trait PlantServiceTrait: Send + Sync {
    async fn get_plants(&self, user_id: &str) -> Result<Vec<Plant>>;
    async fn get_plant(&self, user_id: &str, plant_id: &str) -> Result<Plant>;
    async fn create_plant(&self, new_plant: NewPlant) -> Result<Plant>;
    async fn update_plant(
        &self,
        user_id: &str,
        plant_id: &str,
        update: PlantUpdate,
    ) -> Result<Plant>;
    async fn delete_plant(&self, user_id: &str, plant_id: &str) -> Result<usize>;
    async fn record_care(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> Result<Plant>;
    /// Plants due for watering on `target_date`, judged as of today.
    async fn plants_due_for_watering(
        &self,
        user_id: &str,
        target_date: chrono::NaiveDate,
    ) -> Result<Vec<Plant>>;
}
