use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The aggregate an achievement's progress tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementKind {
    /// Progress mirrors the user's plant count.
    PlantCount,
    /// Progress mirrors the count of plants with a photo.
    PhotoCount,
    /// Consecutive days on which every plant was watered.
    WateringStreak,
    /// Consecutive days on which every plant was fully cared for
    /// across all three dimensions.
    FullCareStreak,
}

impl AchievementKind {
    pub fn is_streak(&self) -> bool {
        matches!(
            self,
            AchievementKind::WateringStreak | AchievementKind::FullCareStreak
        )
    }
}

/// Which streak family a transition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakScope {
    /// Watering-only streaks, advanced when every plant's watering is caught up.
    Watering,
    /// The all-dimensions streak, advanced when no plant needs any care.
    FullCare,
}

/// Kind-specific state carried by an achievement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AchievementState {
    /// Count-based achievements carry no extra state; progress is a
    /// recomputed aggregate.
    Count,
    /// Streak achievements remember the last day that counted, which is
    /// both the idempotence key and the gap-detection anchor.
    Streak {
        last_completed_date: Option<NaiveDate>,
    },
}

/// One achievement's stored progress for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub progress: u32,
    pub target: u32,
    pub unlocked: bool,
    pub unlocked_date: Option<DateTime<Utc>>,
    pub xp_reward: u64,
    #[serde(flatten)]
    pub state: AchievementState,
}

impl AchievementRecord {
    /// The day this streak record last counted, if it is a streak record.
    pub fn last_completed_date(&self) -> Option<NaiveDate> {
        match self.state {
            AchievementState::Streak {
                last_completed_date,
            } => last_completed_date,
            AchievementState::Count => None,
        }
    }
}

/// An unlock produced by a transition, returned to the caller for display
/// and for XP crediting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub xp_reward: u64,
    pub unlocked_date: DateTime<Utc>,
}
