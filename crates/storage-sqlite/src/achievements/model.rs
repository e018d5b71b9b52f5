//! Database models for achievement records.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use verdant_core::achievements::{AchievementRecord, AchievementState};
use verdant_core::errors::Error;

use crate::errors::StorageError;
use crate::utils::{format_date, format_timestamp, parse_date_opt, parse_timestamp_opt};

/// Database model for achievement records (composite key: user + id)
#[derive(
    Queryable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::achievements)]
#[diesel(primary_key(user_id, id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AchievementDB {
    pub user_id: String,
    pub id: String,
    pub name: String,
    pub kind: String,
    pub progress: i32,
    pub target: i32,
    pub unlocked: bool,
    pub unlocked_date: Option<String>,
    pub xp_reward: i64,
    pub last_completed_date: Option<String>,
}

const STREAK_KINDS: [&str; 2] = ["watering-streak", "full-care-streak"];

impl TryFrom<AchievementDB> for AchievementRecord {
    type Error = Error;

    fn try_from(db: AchievementDB) -> Result<Self, Error> {
        let state = if STREAK_KINDS.contains(&db.kind.as_str()) {
            AchievementState::Streak {
                last_completed_date: parse_date_opt(db.last_completed_date.as_deref())?,
            }
        } else {
            AchievementState::Count
        };
        Ok(AchievementRecord {
            user_id: db.user_id,
            name: db.name,
            progress: db.progress.max(0) as u32,
            target: db.target.max(0) as u32,
            unlocked: db.unlocked,
            unlocked_date: parse_timestamp_opt(db.unlocked_date.as_deref())?,
            xp_reward: db.xp_reward.max(0) as u64,
            state,
            id: db.id,
        })
    }
}

impl TryFrom<&AchievementRecord> for AchievementDB {
    type Error = Error;

    fn try_from(record: &AchievementRecord) -> Result<Self, Error> {
        let def = verdant_core::achievements::achievement_def(&record.id).ok_or_else(|| {
            Error::from(StorageError::SerializationError(format!(
                "achievement '{}' is not in the catalog",
                record.id
            )))
        })?;
        let kind = serde_json::to_value(def.kind)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "plant-count".to_string());
        let last_completed_date = match record.state {
            AchievementState::Streak {
                last_completed_date,
            } => last_completed_date.map(format_date),
            AchievementState::Count => None,
        };
        Ok(AchievementDB {
            user_id: record.user_id.clone(),
            id: record.id.clone(),
            name: record.name.clone(),
            kind,
            progress: record.progress as i32,
            target: record.target as i32,
            unlocked: record.unlocked,
            unlocked_date: record.unlocked_date.map(format_timestamp),
            xp_reward: record.xp_reward as i64,
            last_completed_date,
        })
    }
}
