//! Tasks module - the per-day task/XP ledger.

pub mod ledger;
mod tasks_model;
mod tasks_service;
mod tasks_traits;


pub use tasks_model::{LevelUp, TaskCompletionResult};
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
