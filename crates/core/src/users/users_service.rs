use std::sync::Arc;

use async_trait::async_trait;

use super::users_model::{NotificationSettingsUpdate, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for user accounts and notification preferences.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn get_or_create_user(&self, user_id: &str) -> Result<User> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        self.repository.get_or_create_user(user_id).await
    }

    async fn update_notification_settings(
        &self,
        user_id: &str,
        update: NotificationSettingsUpdate,
    ) -> Result<User> {
        self.repository
            .update_notification_settings(user_id, update)
            .await
    }

    async fn register_push_token(&self, user_id: &str, token: &str) -> Result<User> {
        if token.trim().is_empty() {
            return Err(ValidationError::MissingField("token".to_string()).into());
        }
        self.repository.add_push_token(user_id, token).await
    }

    async fn unregister_push_token(&self, user_id: &str, token: &str) -> Result<User> {
        self.repository.remove_push_token(user_id, token).await
    }
}
