//! Error types shared by the review engine, its storage and the front-end.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid rating: {0} (expected 1-4)")]
    InvalidRating(u8),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid session state: {0}")]
    InvalidSessionState(&'static str),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, AtlasError>;
