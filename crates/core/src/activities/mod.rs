//! Activities module - append-only history with transactional XP credit.

mod activities_constants;
mod activities_model;
mod activities_service;
mod activities_traits;

pub use activities_constants::ActivityType;
pub use activities_model::{ActivityLog, NewActivity};
pub use activities_service::ActivityService;
pub use activities_traits::{ActivityRepositoryTrait, ActivityServiceTrait};
