mod model;
mod repository;

pub use model::AchievementDB;
pub use repository::AchievementRepository;
