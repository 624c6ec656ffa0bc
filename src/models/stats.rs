//! Lifetime and per-day review statistics.
use super::DifficultyRating;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviewed: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Running percentage in `[0, 100]`.
    pub average_accuracy: u32,
    pub correct_today: u32,
    pub incorrect_today: u32,
}

impl ReviewStats {
    /// Folds one rating into the counters.
    ///
    /// The correct count is reconstructed from the rounded accuracy, so the
    /// running figure can drift by a point from the exact history.
    pub fn record(&mut self, rating: DifficultyRating) {
        let is_correct = rating.is_correct();
        let prior_correct = (f64::from(self.average_accuracy) / 100.0
            * f64::from(self.total_reviewed))
        .round() as u32;

        self.total_reviewed += 1;
        if is_correct {
            self.correct_today += 1;
        } else {
            self.incorrect_today += 1;
        }
        self.average_accuracy =
            calculate_accuracy(prior_correct + u32::from(is_correct), self.total_reviewed);
    }

    pub fn reset_today(&mut self) {
        self.correct_today = 0;
        self.incorrect_today = 0;
    }

    pub fn extend_streak(&mut self) {
        self.current_streak += 1;
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }
}

/// Summary of the current day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodayStats {
    pub reviewed: usize,
    pub correct: u32,
    pub accuracy: u32,
}

/// Rounded percentage of `correct` out of `total`, 0 when nothing was rated.
pub fn calculate_accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}
