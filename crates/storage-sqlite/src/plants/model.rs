//! Database models for plants.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use verdant_core::errors::Error;
use verdant_core::plants::{
    FertilizingFrequency, MaintenanceFrequency, Plant, WateringFrequency,
};

use crate::utils::{format_timestamp, parse_timestamp, parse_timestamp_opt};

/// Database model for plants
#[derive(
    Queryable,
    Insertable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::plants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PlantDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub plant_type: String,
    pub watering_frequency: String,
    pub custom_watering_days: Option<i64>,
    pub fertilizing_frequency: String,
    pub custom_fertilizing_weeks: Option<i64>,
    pub maintenance_frequency: String,
    pub custom_maintenance_weeks: Option<i64>,
    pub last_watered: Option<String>,
    pub last_fertilized: Option<String>,
    pub last_maintenance: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<PlantDB> for Plant {
    type Error = Error;

    fn try_from(db: PlantDB) -> Result<Self, Error> {
        Ok(Plant {
            watering_frequency: WateringFrequency::from_str_or_default(&db.watering_frequency),
            custom_watering_days: db.custom_watering_days,
            fertilizing_frequency: FertilizingFrequency::from_str_or_default(
                &db.fertilizing_frequency,
            ),
            custom_fertilizing_weeks: db.custom_fertilizing_weeks,
            maintenance_frequency: MaintenanceFrequency::from_str_or_default(
                &db.maintenance_frequency,
            ),
            custom_maintenance_weeks: db.custom_maintenance_weeks,
            last_watered: parse_timestamp_opt(db.last_watered.as_deref())?,
            last_fertilized: parse_timestamp_opt(db.last_fertilized.as_deref())?,
            last_maintenance: parse_timestamp_opt(db.last_maintenance.as_deref())?,
            photo_url: db.photo_url,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            plant_type: db.plant_type,
        })
    }
}

impl From<&Plant> for PlantDB {
    fn from(plant: &Plant) -> Self {
        PlantDB {
            id: plant.id.clone(),
            user_id: plant.user_id.clone(),
            name: plant.name.clone(),
            plant_type: plant.plant_type.clone(),
            watering_frequency: plant.watering_frequency.as_str().to_string(),
            custom_watering_days: plant.custom_watering_days,
            fertilizing_frequency: plant.fertilizing_frequency.as_str().to_string(),
            custom_fertilizing_weeks: plant.custom_fertilizing_weeks,
            maintenance_frequency: plant.maintenance_frequency.as_str().to_string(),
            custom_maintenance_weeks: plant.custom_maintenance_weeks,
            last_watered: plant.last_watered.map(format_timestamp),
            last_fertilized: plant.last_fertilized.map(format_timestamp),
            last_maintenance: plant.last_maintenance.map(format_timestamp),
            photo_url: plant.photo_url.clone(),
            created_at: format_timestamp(plant.created_at),
            updated_at: format_timestamp(plant.updated_at),
        }
    }
}
