//! Database models for the activity log.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use verdant_core::activities::{ActivityLog, ActivityType};
use verdant_core::errors::Error;

use crate::errors::StorageError;
use crate::utils::{format_timestamp, parse_timestamp};

/// Database model for activity log entries
#[derive(
    Queryable,
    Insertable,
    Identifiable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::activity_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogDB {
    pub id: String,
    pub user_id: String,
    pub activity_type: String,
    pub description: String,
    pub xp_delta: i64,
    pub metadata: String,
    pub created_at: String,
}

impl TryFrom<ActivityLogDB> for ActivityLog {
    type Error = Error;

    fn try_from(db: ActivityLogDB) -> Result<Self, Error> {
        let activity_type = ActivityType::from_str_opt(&db.activity_type).ok_or_else(|| {
            Error::from(StorageError::SerializationError(format!(
                "unknown activity type '{}'",
                db.activity_type
            )))
        })?;
        let metadata = serde_json::from_str(&db.metadata).unwrap_or(serde_json::Value::Null);
        Ok(ActivityLog {
            user_id: db.user_id,
            activity_type,
            description: db.description,
            xp_delta: db.xp_delta.max(0) as u64,
            metadata,
            created_at: parse_timestamp(&db.created_at)?,
            id: db.id,
        })
    }
}

impl From<&ActivityLog> for ActivityLogDB {
    fn from(entry: &ActivityLog) -> Self {
        ActivityLogDB {
            id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            activity_type: entry.activity_type.as_str().to_string(),
            description: entry.description.clone(),
            xp_delta: entry.xp_delta as i64,
            metadata: entry.metadata.to_string(),
            created_at: format_timestamp(entry.created_at),
        }
    }
}
