use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use verdant_core::plants::{CareTaskType, Plant, PlantRepositoryTrait, PlantUpdate};
use verdant_core::Result;

use super::model::PlantDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::plants;
use crate::utils::format_timestamp;

pub struct PlantRepository {
    pool: DbPool,
    writer: WriteHandle,
}

/// Counts a user's plants inside a writer job, so achievement recomputes
/// see a count from the same transaction they write in.
pub(crate) fn count_plants(conn: &mut SqliteConnection, user_id: &str) -> Result<i64> {
    Ok(plants::table
        .filter(plants::user_id.eq(user_id))
        .count()
        .get_result(conn)
        .map_err(StorageError::from)?)
}

/// Counts a user's plants that carry a non-empty photo reference.
pub(crate) fn count_photographed(conn: &mut SqliteConnection, user_id: &str) -> Result<i64> {
    Ok(plants::table
        .filter(plants::user_id.eq(user_id))
        .filter(plants::photo_url.is_not_null())
        .filter(plants::photo_url.ne(""))
        .count()
        .get_result(conn)
        .map_err(StorageError::from)?)
}

/// Loads a user's full collection inside a writer job, for the streak
/// pending-care guard.
pub(crate) fn load_plants(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<Plant>> {
    let rows = plants::table
        .filter(plants::user_id.eq(user_id))
        .load::<PlantDB>(conn)
        .map_err(StorageError::from)?;
    rows.into_iter().map(Plant::try_from).collect()
}

fn load_plant(conn: &mut SqliteConnection, user_id: &str, plant_id: &str) -> Result<Plant> {
    plants::table
        .find(plant_id)
        .filter(plants::user_id.eq(user_id))
        .first::<PlantDB>(conn)
        .map_err(StorageError::from)?
        .try_into()
}

impl PlantRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        PlantRepository { pool, writer }
    }
}

#[async_trait]
impl PlantRepositoryTrait for PlantRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Plant>> {
        let mut conn = get_connection(&self.pool)?;
        load_plants(&mut conn, user_id)
    }

    async fn get_plant(&self, user_id: &str, plant_id: &str) -> Result<Plant> {
        let mut conn = get_connection(&self.pool)?;
        load_plant(&mut conn, user_id, plant_id)
    }

    async fn insert_plant(&self, plant: Plant) -> Result<Plant> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Plant> {
                let db = PlantDB::from(&plant);
                diesel::insert_into(plants::table)
                    .values(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(plant)
            })
            .await
    }

    async fn update_plant(
        &self,
        user_id: &str,
        plant_id: &str,
        update: PlantUpdate,
    ) -> Result<Plant> {
        let user_id = user_id.to_string();
        let plant_id = plant_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Plant> {
                let mut plant = load_plant(conn, &user_id, &plant_id)?;
                if let Some(name) = update.name {
                    plant.name = name;
                }
                if let Some(plant_type) = update.plant_type {
                    plant.plant_type = plant_type;
                }
                if let Some(frequency) = update.watering_frequency {
                    plant.watering_frequency = frequency;
                }
                if let Some(days) = update.custom_watering_days {
                    plant.custom_watering_days = Some(days);
                }
                if let Some(frequency) = update.fertilizing_frequency {
                    plant.fertilizing_frequency = frequency;
                }
                if let Some(weeks) = update.custom_fertilizing_weeks {
                    plant.custom_fertilizing_weeks = Some(weeks);
                }
                if let Some(frequency) = update.maintenance_frequency {
                    plant.maintenance_frequency = frequency;
                }
                if let Some(weeks) = update.custom_maintenance_weeks {
                    plant.custom_maintenance_weeks = Some(weeks);
                }
                if let Some(photo_url) = update.photo_url {
                    plant.photo_url = Some(photo_url);
                }
                plant.updated_at = Utc::now();

                let db = PlantDB::from(&plant);
                diesel::update(plants::table.find(&plant.id))
                    .set(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(plant)
            })
            .await
    }

    async fn delete_plant(&self, user_id: &str, plant_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let plant_id = plant_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    plants::table
                        .find(plant_id)
                        .filter(plants::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn record_care(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
        at: DateTime<Utc>,
    ) -> Result<Plant> {
        let user_id = user_id.to_string();
        let plant_id = plant_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Plant> {
                let stamp = format_timestamp(at);
                let touched = format_timestamp(Utc::now());
                let target = plants::table
                    .find(&plant_id)
                    .filter(plants::user_id.eq(&user_id));
                let updated = match task {
                    CareTaskType::Water => diesel::update(target)
                        .set((
                            plants::last_watered.eq(&stamp),
                            plants::updated_at.eq(&touched),
                        ))
                        .execute(conn),
                    CareTaskType::Fertilize => diesel::update(target)
                        .set((
                            plants::last_fertilized.eq(&stamp),
                            plants::updated_at.eq(&touched),
                        ))
                        .execute(conn),
                    CareTaskType::Maintenance => diesel::update(target)
                        .set((
                            plants::last_maintenance.eq(&stamp),
                            plants::updated_at.eq(&touched),
                        ))
                        .execute(conn),
                }
                .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
                }
                load_plant(conn, &user_id, &plant_id)
            })
            .await
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        count_plants(&mut conn, user_id)
    }

    async fn count_photographed(&self, user_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        count_photographed(&mut conn, user_id)
    }
}
