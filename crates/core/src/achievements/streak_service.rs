use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{error, warn};

use super::achievements_model::{StreakScope, UnlockedAchievement};
use super::achievements_traits::{AchievementRepositoryTrait, StreakServiceTrait};
use crate::activities::ActivityServiceTrait;
use crate::errors::Result;
use crate::utils::time_utils;

/// Streak tracker: maintains consecutive-day achievements.
///
/// The pending-plant guard and the day arithmetic both live in the
/// repository transaction; this service picks the day, reports unlocks,
/// and keeps failures out of the calling flow.
pub struct StreakService {
    repository: Arc<dyn AchievementRepositoryTrait>,
    activities: Arc<dyn ActivityServiceTrait>,
}

impl StreakService {
    pub fn new(
        repository: Arc<dyn AchievementRepositoryTrait>,
        activities: Arc<dyn ActivityServiceTrait>,
    ) -> Self {
        Self {
            repository,
            activities,
        }
    }

    /// Advances `scope` for an explicit day. The trait methods use the
    /// current care-timezone day.
    pub async fn advance_on(
        &self,
        user_id: &str,
        scope: StreakScope,
        today: NaiveDate,
    ) -> Result<Vec<UnlockedAchievement>> {
        let unlocked = self.repository.advance_streaks(user_id, scope, today).await?;
        for achievement in &unlocked {
            if let Err(e) = self
                .activities
                .log_achievement_unlocked(user_id, achievement)
                .await
            {
                warn!(
                    "failed to log unlock of '{}' for user {}: {}",
                    achievement.id, user_id, e
                );
            }
        }
        Ok(unlocked)
    }

    async fn advance_or_empty(&self, user_id: &str, scope: StreakScope) -> Vec<UnlockedAchievement> {
        let today = time_utils::care_date_from_utc(Utc::now());
        match self.advance_on(user_id, scope, today).await {
            Ok(unlocked) => unlocked,
            Err(e) => {
                error!("streak advance ({scope:?}) failed for user {user_id}: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl StreakServiceTrait for StreakService {
    async fn on_plant_watered(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        self.advance_or_empty(user_id, StreakScope::Watering).await
    }

    async fn on_all_plants_healthy(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        self.advance_or_empty(user_id, StreakScope::FullCare).await
    }

    async fn check_daily_reset(&self, user_id: &str) {
        let today = time_utils::care_date_from_utc(Utc::now());
        if let Err(e) = self.repository.run_daily_reset(user_id, today).await {
            error!("daily streak reset check failed for user {user_id}: {e}");
        }
    }
}
