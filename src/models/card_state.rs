use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scheduling record for one flashcard, keyed by card id in `ReviewState`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Days until the next review, never below 1 once rated.
    pub interval: u32,
    /// Interval multiplier, kept within `[1.3, 3.0]`.
    pub ease_factor: f64,
    pub next_review: NaiveDate,
    pub reviews: u32,
    /// Times the card was rated Forgot.
    pub lapses: u32,
}
