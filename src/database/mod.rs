pub mod db;
pub mod repository;
pub mod store;

pub use db::Database;
pub use store::{KeyValueStore, MemoryStore};
