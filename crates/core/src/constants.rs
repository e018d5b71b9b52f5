//! Application-wide constants.

/// Fallback reminder time when a user's stored time string cannot be parsed.
pub const DEFAULT_REMINDER_TIME: (u32, u32) = (9, 0);

/// Separator used in per-day task keys (`plantId:taskType`).
pub const TASK_KEY_SEPARATOR: char = ':';

/// Synthetic task type recorded when the all-tasks bonus has been paid out.
pub const TASK_KEY_BONUS: &str = "bonus";
