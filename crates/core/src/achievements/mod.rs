//! Achievements module - catalog, progression ledger, and streak tracker.

mod achievements_constants;
mod achievements_model;
mod achievements_traits;
pub mod engine;
mod progression_service;
mod streak_service;

#[cfg(test)]
mod engine_tests;

#[cfg(test)]
mod progression_service_tests;

#[cfg(test)]
mod streak_service_tests;

pub use achievements_constants::{
    achievement_def, defs_of_kind, AchievementDef, ACHIEVEMENT_CATALOG, CONSISTENT_CARETAKER,
    FIRST_PLANT, GREEN_THUMB, PLANT_COLLECTOR, PLANT_PHOTOGRAPHER, WATER_WARRIOR,
};
pub use achievements_model::{
    AchievementKind, AchievementRecord, AchievementState, StreakScope, UnlockedAchievement,
};
pub use achievements_traits::{
    AchievementRepositoryTrait, ProgressionServiceTrait, StreakServiceTrait,
};
pub use progression_service::ProgressionService;
pub use streak_service::StreakService;
