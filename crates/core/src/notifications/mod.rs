//! Notifications module - watering reminder sweep and push transport seam.

mod notifications_model;
mod notifications_service;
mod notifications_traits;


pub use notifications_model::{build_reminder, parse_reminder_time, ReminderMessage};
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationServiceTrait, PushSenderTrait};
