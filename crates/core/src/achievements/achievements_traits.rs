use crate::achievements::achievements_model::{
    AchievementRecord, StreakScope, UnlockedAchievement,
};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for achievement repository operations.
///
/// Each mutating method is one atomic unit: implementations read the
/// current records and fresh aggregates, run the engine transition, and
/// write the results inside a single transaction.
#[async_trait]
pub trait AchievementRepositoryTrait: Send + Sync {
    async fn list_achievements(&self, user_id: &str) -> Result<Vec<AchievementRecord>>;

    /// Recounts the user's plants and photographed plants, updates the
    /// cached plant count on the user, and applies the count-based
    /// achievement transitions. Returns fresh unlocks.
    async fn recompute_collection(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>>;

    /// Advances the streaks in `scope` for `today` if, and only if, no
    /// plant in the collection is still pending for that scope's care
    /// check. Returns fresh unlocks.
    async fn advance_streaks(
        &self,
        user_id: &str,
        scope: StreakScope,
        today: NaiveDate,
    ) -> Result<Vec<UnlockedAchievement>>;

    /// Zeroes locked streak progress for records whose last counted day
    /// is stale, provided the user still has pending tasks today.
    async fn run_daily_reset(&self, user_id: &str, today: NaiveDate) -> Result<()>;
}

/// Trait for the progression ledger: count-based achievements.
///
/// The hook methods are fire-safe: failures are logged and surface as an
/// empty unlock list, never as an error to the calling flow.
#[async_trait]
pub trait ProgressionServiceTrait: Send + Sync {
    async fn on_plant_added(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    async fn on_plant_removed(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    async fn on_plant_photographed(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    /// Full resynchronization, for app load: recomputes the count-based
    /// achievements from fresh aggregates and applies the lazy
    /// streak-break rule, repairing anything the event hooks missed.
    async fn sync_all_achievements(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    async fn get_achievements(&self, user_id: &str) -> Result<Vec<AchievementRecord>>;
}

/// Trait for the streak tracker: consecutive-day achievements.
#[async_trait]
pub trait StreakServiceTrait: Send + Sync {
    async fn on_plant_watered(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    async fn on_all_plants_healthy(&self, user_id: &str) -> Vec<UnlockedAchievement>;
    /// Lazy streak-break detection, run before the day's first task.
    async fn check_daily_reset(&self, user_id: &str);
}
