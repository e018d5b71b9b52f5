//! Users module - accounts, progression state, and notification preferences.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{NotificationSettingsUpdate, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
