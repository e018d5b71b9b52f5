use crate::activities::activities_model::{ActivityLog, NewActivity};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for activity log repository operations
#[async_trait]
pub trait ActivityRepositoryTrait: Send + Sync {
    /// Appends the entry and credits its XP to the user, recomputing the
    /// user's level, all in one transaction.
    async fn log_activity(&self, activity: NewActivity) -> Result<ActivityLog>;
    async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLog>>;
}

/// Trait for activity log service operations
#[async_trait]
pub trait ActivityServiceTrait: Send + Sync {
    async fn log_plant_added(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog>;
    async fn log_plant_watered(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog>;
    async fn log_plant_photo(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog>;
    async fn log_plant_deleted(&self, user_id: &str, plant_name: &str) -> Result<ActivityLog>;
    async fn log_achievement_unlocked(
        &self,
        user_id: &str,
        achievement: &crate::achievements::UnlockedAchievement,
    ) -> Result<ActivityLog>;
    async fn get_recent_activity(&self, user_id: &str, limit: i64) -> Result<Vec<ActivityLog>>;
}
