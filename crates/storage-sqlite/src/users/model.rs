//! Database models for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use verdant_core::errors::Error;
use verdant_core::users::User;

use crate::utils::{
    format_date, format_timestamp, parse_date_opt, parse_string_set, parse_string_vec,
    parse_timestamp, parse_timestamp_opt, to_json_string,
};

/// Database model for users
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
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub number_of_plants: i64,
    pub xp: i64,
    pub level: i32,
    pub tasks_completed_today: String,
    pub last_task_reset_date: Option<String>,
    pub notifications_enabled: bool,
    pub reminder_time: String,
    pub push_tokens: String,
    pub last_reminder_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Error> {
        Ok(User {
            number_of_plants: db.number_of_plants,
            xp: db.xp.max(0) as u64,
            level: db.level.max(1) as u32,
            tasks_completed_today: parse_string_set(&db.tasks_completed_today)?,
            last_task_reset_date: parse_timestamp_opt(db.last_task_reset_date.as_deref())?,
            notifications_enabled: db.notifications_enabled,
            reminder_time: db.reminder_time,
            push_tokens: parse_string_vec(&db.push_tokens)?,
            last_reminder_date: parse_date_opt(db.last_reminder_date.as_deref())?,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
            id: db.id,
        })
    }
}

impl TryFrom<&User> for UserDB {
    type Error = Error;

    fn try_from(user: &User) -> Result<Self, Error> {
        Ok(UserDB {
            id: user.id.clone(),
            number_of_plants: user.number_of_plants,
            xp: user.xp as i64,
            level: user.level as i32,
            tasks_completed_today: to_json_string(&user.tasks_completed_today)?,
            last_task_reset_date: user.last_task_reset_date.map(format_timestamp),
            notifications_enabled: user.notifications_enabled,
            reminder_time: user.reminder_time.clone(),
            push_tokens: to_json_string(&user.push_tokens)?,
            last_reminder_date: user.last_reminder_date.map(format_date),
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        })
    }
}
