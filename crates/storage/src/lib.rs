pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod pictures;
pub mod repository;
pub mod store;

pub use database::Database;
pub use pictures::PictureStore;
pub use store::ProfileStore;
