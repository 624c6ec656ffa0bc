//! Loading and saving of the persisted blobs.
//!
//! Reads never fail: absent or malformed data falls back to the default value,
//! as if the learner were new. Writes are best effort and only logged.

use super::store::KeyValueStore;
use crate::error::AtlasError;
use crate::models::{Progress, ReviewState};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn load_review_state<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> ReviewState {
    load_or_default(store, key)
}

pub fn save_review_state<S: KeyValueStore + ?Sized>(store: &S, key: &str, state: &ReviewState) {
    save_best_effort(store, key, state)
}

pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Progress {
    load_or_default(store, key)
}

pub fn save_progress<S: KeyValueStore + ?Sized>(store: &S, key: &str, progress: &Progress) {
    save_best_effort(store, key, progress)
}

fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("Nothing stored under '{}', starting fresh", key);
            return T::default();
        }
        Err(e) => {
            log::warn!("Could not read '{}': {}", key, e);
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("Discarding malformed data under '{}': {}", key, e);
        T::default()
    })
}

fn save_best_effort<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(AtlasError::from)
        .and_then(|raw| store.set(key, &raw));
    if let Err(e) = result {
        log::warn!("Could not save '{}': {}", key, e);
    }
}
