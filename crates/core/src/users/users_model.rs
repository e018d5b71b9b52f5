use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user account with cached progression state.
///
/// `number_of_plants` is a cache of the canonical plant count; `level` is a
/// pure function of `xp`. Both are rewritten whenever the underlying value
/// changes, never incremented blindly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub number_of_plants: i64,
    pub xp: u64,
    pub level: u32,
    /// Composite task keys (`plantId:taskType` plus `plantId:bonus`)
    /// completed since the last daily reset.
    pub tasks_completed_today: BTreeSet<String>,
    pub last_task_reset_date: Option<DateTime<Utc>>,
    pub notifications_enabled: bool,
    /// Preferred reminder time-of-day, e.g. "9:00 AM" or "21:30".
    pub reminder_time: String,
    pub push_tokens: Vec<String>,
    /// Care-timezone day of the last reminder sent, for once-per-day gating.
    pub last_reminder_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh account with no plants, no XP, and reminders off.
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            number_of_plants: 0,
            xp: 0,
            level: 1,
            tasks_completed_today: BTreeSet::new(),
            last_task_reset_date: None,
            notifications_enabled: false,
            reminder_time: "9:00 AM".to_string(),
            push_tokens: Vec::new(),
            last_reminder_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a user's notification preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsUpdate {
    pub enabled: Option<bool>,
    pub reminder_time: Option<String>,
}
