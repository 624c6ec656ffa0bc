pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{AtlasError, Result};
pub use models::{
    CardState, DifficultyRating, Progress, ReferenceData, ReviewCard, ReviewEngine, ReviewSession,
};
