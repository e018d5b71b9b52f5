use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::activities_constants::ActivityType;
use super::activities_model::{ActivityLog, NewActivity};
use super::activities_traits::{ActivityRepositoryTrait, ActivityServiceTrait};
use crate::achievements::UnlockedAchievement;
use crate::errors::Result;

/// Service for the append-only activity history.
pub struct ActivityService {
    repository: Arc<dyn ActivityRepositoryTrait>,
}

impl ActivityService {
    pub fn new(repository: Arc<dyn ActivityRepositoryTrait>) -> Self {
        Self { repository }
    }

    async fn log(
        &self,
        user_id: &str,
        activity_type: ActivityType,
        description: String,
        xp_delta: u64,
        metadata: serde_json::Value,
    ) -> Result<ActivityLog> {
        self.repository
            .log_activity(NewActivity {
                user_id: user_id.to_string(),
                activity_type,
                description,
                xp_delta,
                metadata,
            })
            .await
    }
}

#[async_trait]
impl ActivityServiceTrait for ActivityService {
    async fn log_plant_added(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog> {
        let kind = ActivityType::PlantAdded;
        self.log(
            user_id,
            kind,
            format!("Added {plant_name} to your garden"),
            kind.base_xp(),
            json!({ "plantName": plant_name }),
        )
        .await
    }

    async fn log_plant_watered(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog> {
        let kind = ActivityType::PlantWatered;
        self.log(
            user_id,
            kind,
            format!("Watered {plant_name}"),
            kind.base_xp(),
            json!({ "plantName": plant_name }),
        )
        .await
    }

    async fn log_plant_photo(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog> {
        let kind = ActivityType::PlantPhoto;
        self.log(
            user_id,
            kind,
            format!("Added a photo of {plant_name}"),
            kind.base_xp(),
            json!({ "plantName": plant_name }),
        )
        .await
    }

    async fn log_plant_deleted(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog> {
        let kind = ActivityType::PlantDeleted;
        self.log(
            user_id,
            kind,
            format!("Removed {plant_name} from your garden"),
            kind.base_xp(),
            json!({ "plantName": plant_name }),
        )
        .await
    }

    async fn log_achievement_unlocked(
        &self,
        user_id: &str,
        achievement: &UnlockedAchievement,
    ) -> Result<ActivityLog> {
        self.log(
            user_id,
            ActivityType::AchievementUnlocked,
            format!("Unlocked achievement: {}", achievement.name),
            achievement.xp_reward,
            json!({ "achievementId": achievement.id }),
        )
        .await
    }

    async fn get_recent_activity(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLog>> {
        self.repository.list_recent(user_id, limit).await
    }
}
