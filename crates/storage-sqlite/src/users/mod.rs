mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;

pub(crate) use repository::{load_user_db, save_user};
