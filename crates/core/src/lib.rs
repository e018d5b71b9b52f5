//! Verdant Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Verdant, a plant-care
//! tracker with an achievement and XP progression engine.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod achievements;
pub mod activities;
pub mod constants;
pub mod errors;
pub mod levels;
pub mod notifications;
pub mod plants;
pub mod tasks;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
