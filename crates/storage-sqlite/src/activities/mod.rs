mod model;
mod repository;

pub use model::ActivityLogDB;
pub use repository::ActivityRepository;
