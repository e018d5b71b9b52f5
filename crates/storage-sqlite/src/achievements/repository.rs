use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use verdant_core::achievements::{
    achievement_def, engine, AchievementKind, AchievementRecord, AchievementRepositoryTrait,
    StreakScope, UnlockedAchievement,
};
use verdant_core::plants::care_schedule;
use verdant_core::Result;

use super::model::AchievementDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::plants::{count_photographed, count_plants, load_plants};
use crate::schema::{achievements, users};
use crate::utils::format_timestamp;

pub struct AchievementRepository {
    pool: DbPool,
    writer: WriteHandle,
}

fn load_records(conn: &mut SqliteConnection, user_id: &str) -> Result<Vec<AchievementRecord>> {
    let rows = achievements::table
        .filter(achievements::user_id.eq(user_id))
        .load::<AchievementDB>(conn)
        .map_err(StorageError::from)?;
    rows.into_iter().map(AchievementRecord::try_from).collect()
}

fn upsert_records(conn: &mut SqliteConnection, records: &[AchievementRecord]) -> Result<()> {
    for record in records {
        let db = AchievementDB::try_from(record)?;
        diesel::insert_into(achievements::table)
            .values(&db)
            .on_conflict((achievements::user_id, achievements::id))
            .do_update()
            .set(&db)
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(())
}

impl AchievementRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        AchievementRepository { pool, writer }
    }
}

#[async_trait]
impl AchievementRepositoryTrait for AchievementRepository {
    async fn list_achievements(&self, user_id: &str) -> Result<Vec<AchievementRecord>> {
        let mut conn = get_connection(&self.pool)?;
        load_records(&mut conn, user_id)
    }

    async fn recompute_collection(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        let user_id = user_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<UnlockedAchievement>> {
                    // Counts come from this transaction, never from the caller.
                    let snapshot = engine::CollectionSnapshot {
                        plant_count: count_plants(conn, &user_id)?.max(0) as u32,
                        photographed_count: count_photographed(conn, &user_id)?.max(0) as u32,
                    };

                    diesel::update(users::table.find(&user_id))
                        .set((
                            users::number_of_plants.eq(snapshot.plant_count as i64),
                            users::updated_at.eq(format_timestamp(Utc::now())),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    let existing = load_records(conn, &user_id)?;
                    let outcome = engine::plan_collection_recompute(
                        &user_id,
                        &existing,
                        snapshot,
                        Utc::now(),
                    );
                    upsert_records(conn, &outcome.records)?;
                    Ok(outcome.newly_unlocked)
                },
            )
            .await
    }

    async fn advance_streaks(
        &self,
        user_id: &str,
        scope: StreakScope,
        today: NaiveDate,
    ) -> Result<Vec<UnlockedAchievement>> {
        let user_id = user_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<UnlockedAchievement>> {
                    let plants = load_plants(conn, &user_id)?;
                    if plants.is_empty() {
                        return Ok(Vec::new());
                    }
                    // The day stays open while any plant is still pending.
                    let pending = plants.iter().any(|p| match scope {
                        StreakScope::Watering => care_schedule::is_watering_due(p, today, today),
                        StreakScope::FullCare => care_schedule::needs_any_care(p, today),
                    });
                    if pending {
                        return Ok(Vec::new());
                    }

                    let existing = load_records(conn, &user_id)?;
                    let outcome = engine::plan_streak_advance(
                        &user_id,
                        &existing,
                        scope,
                        today,
                        Utc::now(),
                    );
                    upsert_records(conn, &outcome.records)?;
                    Ok(outcome.newly_unlocked)
                },
            )
            .await
    }

    async fn run_daily_reset(&self, user_id: &str, today: NaiveDate) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let plants = load_plants(conn, &user_id)?;
                let water_pending = plants
                    .iter()
                    .any(|p| care_schedule::is_watering_due(p, today, today));
                let care_pending = plants
                    .iter()
                    .any(|p| care_schedule::needs_any_care(p, today));

                let existing = load_records(conn, &user_id)?;
                // Only streaks whose dimension still has open work are broken.
                let resets: Vec<AchievementRecord> = engine::plan_daily_reset(&existing, today)
                    .into_iter()
                    .filter(|r| match achievement_def(&r.id).map(|d| d.kind) {
                        Some(AchievementKind::WateringStreak) => water_pending,
                        Some(AchievementKind::FullCareStreak) => care_pending,
                        _ => false,
                    })
                    .collect();
                upsert_records(conn, &resets)
            })
            .await
    }
}
