use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{error, warn};

use super::achievements_model::{AchievementRecord, UnlockedAchievement};
use super::achievements_traits::{AchievementRepositoryTrait, ProgressionServiceTrait};
use crate::activities::ActivityServiceTrait;
use crate::errors::Result;
use crate::utils::time_utils;

/// Progression ledger: keeps count-based achievements in sync with the
/// canonical plant collection.
///
/// All three hooks funnel into the same idempotent recomputation, so
/// redundant calls are harmless.
pub struct ProgressionService {
    repository: Arc<dyn AchievementRepositoryTrait>,
    activities: Arc<dyn ActivityServiceTrait>,
}

impl ProgressionService {
    pub fn new(
        repository: Arc<dyn AchievementRepositoryTrait>,
        activities: Arc<dyn ActivityServiceTrait>,
    ) -> Self {
        Self {
            repository,
            activities,
        }
    }

    async fn sync_collection(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        let unlocked = self.repository.recompute_collection(user_id).await?;
        for achievement in &unlocked {
            // The activity entry also credits the unlock's XP reward.
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

    async fn sync_or_empty(&self, user_id: &str, trigger: &str) -> Vec<UnlockedAchievement> {
        match self.sync_collection(user_id).await {
            Ok(unlocked) => unlocked,
            Err(e) => {
                error!("collection recompute ({trigger}) failed for user {user_id}: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ProgressionServiceTrait for ProgressionService {
    async fn on_plant_added(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        self.sync_or_empty(user_id, "plant added").await
    }

    async fn on_plant_removed(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        self.sync_or_empty(user_id, "plant removed").await
    }

    async fn on_plant_photographed(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        self.sync_or_empty(user_id, "plant photographed").await
    }

    async fn sync_all_achievements(&self, user_id: &str) -> Vec<UnlockedAchievement> {
        let unlocked = self.sync_or_empty(user_id, "full sync").await;
        let today = time_utils::care_date_from_utc(Utc::now());
        if let Err(e) = self.repository.run_daily_reset(user_id, today).await {
            error!("daily streak reset failed during full sync for user {user_id}: {e}");
        }
        unlocked
    }

    async fn get_achievements(&self, user_id: &str) -> Result<Vec<AchievementRecord>> {
        self.repository.list_achievements(user_id).await
    }
}
