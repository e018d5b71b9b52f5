use serde::{Deserialize, Serialize};

/// One row of the level table: the level reached at `min_xp` total XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelThreshold {
    pub level: u32,
    pub min_xp: u64,
    pub title: &'static str,
}

/// A user's progression standing, derived entirely from total XP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub title: String,
    pub total_xp: u64,
    /// XP accumulated within the current level.
    pub xp_into_level: u64,
    /// XP still needed to reach the next level. `None` at the top level.
    pub xp_to_next: Option<u64>,
    /// Completion of the current level in the range 0..=100.
    pub percent_to_next: u8,
}
