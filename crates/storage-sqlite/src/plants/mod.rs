mod model;
mod repository;

pub use model::PlantDB;
pub use repository::PlantRepository;

pub(crate) use repository::{count_photographed, count_plants, load_plants};
