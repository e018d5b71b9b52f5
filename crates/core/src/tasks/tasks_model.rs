use serde::{Deserialize, Serialize};

/// Describes a level increase caused by an XP credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: String,
}

/// Outcome of a task completion attempt.
///
/// On any failure the result is zero-effect: no XP moved, `error` says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletionResult {
    /// XP credited by this call, bonus included. Zero on repeat calls.
    pub xp_earned: u64,
    /// Whether the all-tasks bonus was part of this credit.
    pub bonus_earned: bool,
    pub total_xp: u64,
    pub level: u32,
    pub already_completed: bool,
    pub level_up: Option<LevelUp>,
    pub error: Option<String>,
}

impl TaskCompletionResult {
    /// A zero-effect result carrying an error indicator.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            xp_earned: 0,
            bonus_earned: false,
            total_xp: 0,
            level: 1,
            already_completed: false,
            level_up: None,
            error: Some(message.into()),
        }
    }
}
