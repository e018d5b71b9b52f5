use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use verdant_core::users::{NotificationSettingsUpdate, User, UserRepositoryTrait};
use verdant_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::utils::{format_date, format_timestamp};

pub struct UserRepository {
    pool: DbPool,
    writer: WriteHandle,
}

/// Loads a user row for use inside a writer job.
pub(crate) fn load_user_db(conn: &mut SqliteConnection, user_id: &str) -> Result<UserDB> {
    Ok(users::table
        .find(user_id)
        .first::<UserDB>(conn)
        .map_err(StorageError::from)?)
}

/// Rewrites a user row from a domain user, stamping `updated_at`.
pub(crate) fn save_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    let mut db = UserDB::try_from(user)?;
    db.updated_at = format_timestamp(Utc::now());
    diesel::update(users::table.find(&user.id))
        .set(&db)
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

impl UserRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_user(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user_db(&mut conn, user_id)?.try_into()
    }

    async fn get_or_create_user(&self, user_id: &str) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                match load_user_db(conn, &user_id) {
                    Ok(db) => db.try_into(),
                    Err(_) => {
                        let user = User::new(user_id.clone());
                        let db = UserDB::try_from(&user)?;
                        diesel::insert_into(users::table)
                            .values(&db)
                            .on_conflict(users::id)
                            .do_nothing()
                            .execute(conn)
                            .map_err(StorageError::from)?;
                        // Re-read in case a concurrent create won.
                        load_user_db(conn, &user_id)?.try_into()
                    }
                }
            })
            .await
    }

    async fn update_notification_settings(
        &self,
        user_id: &str,
        update: NotificationSettingsUpdate,
    ) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user: User = load_user_db(conn, &user_id)?.try_into()?;
                if let Some(enabled) = update.enabled {
                    user.notifications_enabled = enabled;
                }
                if let Some(reminder_time) = update.reminder_time {
                    user.reminder_time = reminder_time;
                }
                save_user(conn, &user)?;
                Ok(user)
            })
            .await
    }

    async fn add_push_token(&self, user_id: &str, token: &str) -> Result<User> {
        let user_id = user_id.to_string();
        let token = token.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user: User = load_user_db(conn, &user_id)?.try_into()?;
                if !user.push_tokens.contains(&token) {
                    user.push_tokens.push(token);
                    save_user(conn, &user)?;
                }
                Ok(user)
            })
            .await
    }

    async fn remove_push_token(&self, user_id: &str, token: &str) -> Result<User> {
        let user_id = user_id.to_string();
        let token = token.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user: User = load_user_db(conn, &user_id)?.try_into()?;
                let before = user.push_tokens.len();
                user.push_tokens.retain(|t| t != &token);
                if user.push_tokens.len() != before {
                    save_user(conn, &user)?;
                }
                Ok(user)
            })
            .await
    }

    async fn list_reminder_candidates(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(users::notifications_enabled.eq(true))
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        let candidates = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(candidates
            .into_iter()
            .filter(|u| !u.push_tokens.is_empty())
            .collect())
    }

    async fn set_last_reminder_date(&self, user_id: &str, day: NaiveDate) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::last_reminder_date.eq(format_date(day)),
                        users::updated_at.eq(format_timestamp(Utc::now())),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
