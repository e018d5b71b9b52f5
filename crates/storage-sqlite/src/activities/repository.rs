use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;
use verdant_core::activities::{ActivityLog, ActivityRepositoryTrait, NewActivity};
use verdant_core::levels;
use verdant_core::users::User;
use verdant_core::Result;

use super::model::ActivityLogDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::activity_log;
use crate::users::{load_user_db, save_user};

pub struct ActivityRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl ActivityRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        ActivityRepository { pool, writer }
    }
}

#[async_trait]
impl ActivityRepositoryTrait for ActivityRepository {
    async fn log_activity(&self, activity: NewActivity) -> Result<ActivityLog> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ActivityLog> {
                let entry = ActivityLog {
                    id: Uuid::new_v4().to_string(),
                    user_id: activity.user_id,
                    activity_type: activity.activity_type,
                    description: activity.description,
                    xp_delta: activity.xp_delta,
                    metadata: activity.metadata,
                    created_at: Utc::now(),
                };
                let db = ActivityLogDB::from(&entry);
                diesel::insert_into(activity_log::table)
                    .values(&db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                // XP credit and level recompute ride the same transaction
                // as the appended entry.
                if entry.xp_delta > 0 {
                    let mut user: User = load_user_db(conn, &entry.user_id)?.try_into()?;
                    user.xp += entry.xp_delta;
                    user.level = levels::level_for_xp(user.xp);
                    save_user(conn, &user)?;
                }
                Ok(entry)
            })
            .await
    }

    async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLog>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = activity_log::table
            .filter(activity_log::user_id.eq(user_id))
            .order(activity_log::created_at.desc())
            .limit(limit.clamp(1, 100))
            .load::<ActivityLogDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(ActivityLog::try_from).collect()
    }
}
