use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error};
use rand::Rng;

use super::notifications_model::{build_reminder, parse_reminder_time};
use super::notifications_traits::{NotificationServiceTrait, PushSenderTrait};
use crate::errors::Result;
use crate::plants::{care_schedule, PlantRepositoryTrait};
use crate::users::{User, UserRepositoryTrait};
use crate::utils::time_utils::DEFAULT_CARE_TZ;

/// Daily watering reminder sweep.
///
/// Designed for an at-least-once minutely trigger: the per-user
/// `last_reminder_date` gate makes repeated and overlapping sweeps
/// deliver at most one reminder per user per care-timezone day.
pub struct NotificationService {
    users: Arc<dyn UserRepositoryTrait>,
    plants: Arc<dyn PlantRepositoryTrait>,
    push: Arc<dyn PushSenderTrait>,
}

impl NotificationService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        plants: Arc<dyn PlantRepositoryTrait>,
        push: Arc<dyn PushSenderTrait>,
    ) -> Self {
        Self {
            users,
            plants,
            push,
        }
    }

    /// One sweep at an explicit instant, for deterministic tests.
    pub async fn run_sweep_at(&self, now: DateTime<Utc>) -> Result<u32> {
        let local_now = now.with_timezone(&DEFAULT_CARE_TZ);
        let today = local_now.date_naive();
        let candidates = self.users.list_reminder_candidates().await?;

        let mut sent = 0;
        for user in candidates {
            match self.remind_user(&user, local_now.time(), today).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => error!("reminder failed for user {}: {}", user.id, e),
            }
        }
        Ok(sent)
    }

    async fn remind_user(
        &self,
        user: &User,
        local_time: chrono::NaiveTime,
        today: chrono::NaiveDate,
    ) -> Result<bool> {
        if user.last_reminder_date == Some(today) {
            return Ok(false);
        }
        let (hour, minute) = parse_reminder_time(&user.reminder_time);
        let reminder_time = chrono::NaiveTime::from_hms_opt(hour, minute, 0)
            .unwrap_or(chrono::NaiveTime::MIN);
        if local_time < reminder_time {
            return Ok(false);
        }

        let plants = self.plants.list_by_user(&user.id).await?;
        let due: Vec<_> = plants
            .into_iter()
            .filter(|p| care_schedule::is_watering_due(p, today, today))
            .collect();
        let template_index = rand::thread_rng().gen_range(0..usize::MAX);
        let Some(message) = build_reminder(&due, template_index) else {
            debug!("no plants due for user {}, skipping reminder", user.id);
            // Still mark the day so quiet days are not re-scanned every minute.
            self.users.set_last_reminder_date(&user.id, today).await?;
            return Ok(false);
        };

        let rejected = self
            .push
            .send(&user.push_tokens, &message.title, &message.body)
            .await?;
        for token in &rejected {
            // Dead registrations are dropped so they stop costing sends.
            if let Err(e) = self.users.remove_push_token(&user.id, token).await {
                error!("failed to remove dead push token for user {}: {e}", user.id);
            }
        }
        self.users.set_last_reminder_date(&user.id, today).await?;
        Ok(true)
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn run_reminder_sweep(&self) -> Result<u32> {
        self.run_sweep_at(Utc::now()).await
    }
}
