//! The persisted review aggregate: every card's schedule plus statistics.

use super::calendar::{optional_iso_date, yesterday};
use super::sm2::{create_initial_card_state, update_card_state};
use super::stats::{ReviewStats, TodayStats, calculate_accuracy};
use super::{CardState, DifficultyRating};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewState {
    pub cards: HashMap<String, CardState>,
    /// Ids rated today, in rating order.
    pub today_reviewed: Vec<String>,
    #[serde(with = "optional_iso_date")]
    pub last_review_date: Option<NaiveDate>,
    pub stats: ReviewStats,
    /// Day the rollover below was last applied.
    #[serde(with = "optional_iso_date")]
    pub last_rollover_date: Option<NaiveDate>,
}

impl ReviewState {
    /// Starts a new day: clears today's counters and updates the streak.
    ///
    /// Runs at most once per day. Returns true if anything changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_review_date == Some(today) || self.last_rollover_date == Some(today) {
            return false;
        }

        self.today_reviewed.clear();
        self.stats.reset_today();

        match self.last_review_date {
            Some(last) if last == yesterday(today) => self.stats.extend_streak(),
            Some(_) => self.stats.current_streak = 0,
            None => {}
        }

        self.last_rollover_date = Some(today);
        log::debug!(
            "Rolled over to {}, streak is {}",
            today,
            self.stats.current_streak
        );
        true
    }

    /// Registers a newly generated card. Returns false if it already existed.
    pub fn ensure_card(&mut self, card_id: &str, today: NaiveDate) -> bool {
        if self.cards.contains_key(card_id) {
            return false;
        }
        self.cards
            .insert(card_id.to_string(), create_initial_card_state(today));
        true
    }

    /// Applies a rating to a card, creating its state if it was never seen.
    pub fn record_review(
        &mut self,
        card_id: &str,
        rating: DifficultyRating,
        today: NaiveDate,
    ) -> &CardState {
        // A rating on a new day must not land on the previous day's counters.
        self.roll_over(today);

        let current = self
            .cards
            .get(card_id)
            .cloned()
            .unwrap_or_else(|| create_initial_card_state(today));
        let updated = update_card_state(&current, rating, today);

        self.today_reviewed.push(card_id.to_string());
        self.last_review_date = Some(today);
        self.stats.record(rating);

        self.cards.insert(card_id.to_string(), updated);
        &self.cards[card_id]
    }

    pub fn is_reviewed_today(&self, card_id: &str) -> bool {
        self.today_reviewed.iter().any(|id| id == card_id)
    }

    pub fn today_stats(&self) -> TodayStats {
        let reviewed = self.today_reviewed.len();
        let correct = self.stats.correct_today;
        TodayStats {
            reviewed,
            correct,
            accuracy: calculate_accuracy(correct, reviewed as u32),
        }
    }

    pub fn reset_today_progress(&mut self) {
        self.today_reviewed.clear();
        self.stats.reset_today();
    }
}
