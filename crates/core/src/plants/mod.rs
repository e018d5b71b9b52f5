//! Plants module - domain models, care scheduling, services, and traits.

pub mod care_schedule;
mod plants_model;
mod plants_service;
mod plants_traits;

pub use plants_model::{
    CareTaskType, FertilizingFrequency, MaintenanceFrequency, NewPlant, Plant, PlantUpdate,
    WateringFrequency,
};
pub use plants_service::PlantService;
pub use plants_traits::{PlantRepositoryTrait, PlantServiceTrait};
