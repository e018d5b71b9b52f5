use crate::errors::Result;
use crate::users::users_model::{NotificationSettingsUpdate, User};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User>;
    /// Fetches the user, creating an empty account on first sight.
    async fn get_or_create_user(&self, user_id: &str) -> Result<User>;
    async fn update_notification_settings(
        &self,
        user_id: &str,
        update: NotificationSettingsUpdate,
    ) -> Result<User>;
    async fn add_push_token(&self, user_id: &str, token: &str) -> Result<User>;
    async fn remove_push_token(&self, user_id: &str, token: &str) -> Result<User>;
    /// Users with reminders enabled and at least one push token.
    async fn list_reminder_candidates(&self) -> Result<Vec<User>>;
    /// Records that a reminder was delivered on `day`, for once-per-day gating.
    async fn set_last_reminder_date(&self, user_id: &str, day: NaiveDate) -> Result<()>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_or_create_user(&self, user_id: &str) -> Result<User>;
    async fn update_notification_settings(
        &self,
        user_id: &str,
        update: NotificationSettingsUpdate,
    ) -> Result<User>;
    async fn register_push_token(&self, user_id: &str, token: &str) -> Result<User>;
    async fn unregister_push_token(&self, user_id: &str, token: &str) -> Result<User>;
}
