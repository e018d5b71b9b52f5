pub(crate) mod model;
pub(crate) mod service;

pub use model::{LevelProgress, LevelThreshold};
pub use service::{level_for_xp, progress_for_xp, title_for_xp, LEVEL_THRESHOLDS};
