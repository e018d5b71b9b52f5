use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activities_constants::ActivityType;

/// One append-only activity log entry.
///
/// History display only; no derived counter treats this as a source of
/// truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub xp_delta: u64,
    /// Free-form context, e.g. the plant or achievement involved.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending an activity entry. XP is credited to the user in
/// the same transaction that appends the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub xp_delta: u64,
    #[serde(default)]
    pub metadata: serde_json::Value,
}
