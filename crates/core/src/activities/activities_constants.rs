use serde::{Deserialize, Serialize};

/// The kinds of user actions recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    PlantAdded,
    PlantWatered,
    PlantPhoto,
    PlantDeleted,
    AchievementUnlocked,
}

impl ActivityType {
    /// Fixed XP credited for this action. Achievement unlocks carry the
    /// achievement's own reward instead.
    pub fn base_xp(&self) -> u64 {
        match self {
            ActivityType::PlantAdded => 10,
            ActivityType::PlantWatered => 5,
            ActivityType::PlantPhoto => 5,
            ActivityType::PlantDeleted => 0,
            ActivityType::AchievementUnlocked => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::PlantAdded => "plant_added",
            ActivityType::PlantWatered => "plant_watered",
            ActivityType::PlantPhoto => "plant_photo",
            ActivityType::PlantDeleted => "plant_deleted",
            ActivityType::AchievementUnlocked => "achievement_unlocked",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "plant_added" => Some(ActivityType::PlantAdded),
            "plant_watered" => Some(ActivityType::PlantWatered),
            "plant_photo" => Some(ActivityType::PlantPhoto),
            "plant_deleted" => Some(ActivityType::PlantDeleted),
            "achievement_unlocked" => Some(ActivityType::AchievementUnlocked),
            _ => None,
        }
    }
}
