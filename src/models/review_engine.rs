//! Stateful review service tying together card generation, scheduling,
//! statistics and persistence.

use super::calendar::Clock;
use super::card_generator::generate_cards;
use super::sm2::is_card_due;
use super::stats::{ReviewStats, TodayStats};
use super::{CardState, DifficultyRating, Progress, ReferenceData, ReviewCard, ReviewState};
use crate::database::KeyValueStore;
use crate::database::repository::{load_review_state, save_review_state};
use chrono::NaiveDate;

/// Owns the review state and writes it back after every change.
pub struct ReviewEngine<S, C> {
    store: S,
    clock: C,
    reference: ReferenceData,
    storage_key: String,
    state: ReviewState,
    due_cards: Vec<ReviewCard>,
}

impl<S: KeyValueStore, C: Clock> ReviewEngine<S, C> {
    /// Loads the stored state and starts a new day if needed.
    pub fn new(
        store: S,
        clock: C,
        reference: ReferenceData,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let mut state = load_review_state(&store, &storage_key);
        state.roll_over(clock.today());

        let engine = Self {
            store,
            clock,
            reference,
            storage_key,
            state,
            due_cards: Vec::new(),
        };
        engine.persist();
        log::debug!(
            "Review state loaded: {} cards, streak {}",
            engine.state.cards.len(),
            engine.state.stats.current_streak
        );
        engine
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Regenerates cards from `progress` and returns the ones due today that
    /// have not been rated yet today.
    pub fn generate(&mut self, progress: &Progress) -> &[ReviewCard] {
        let today = self.clock.today();
        self.state.roll_over(today);

        let cards = generate_cards(progress, &self.reference);
        let mut added = 0;
        for card in &cards {
            if self.state.ensure_card(&card.id, today) {
                added += 1;
            }
        }

        self.due_cards = cards
            .into_iter()
            .filter(|card| {
                self.state
                    .cards
                    .get(&card.id)
                    .is_some_and(|state| is_card_due(state, today))
            })
            .filter(|card| !self.state.is_reviewed_today(&card.id))
            .collect();

        log::debug!(
            "Generated cards: {} new, {} due",
            added,
            self.due_cards.len()
        );
        self.persist();
        &self.due_cards
    }

    /// Rates a card, reschedules it and drops it from the due queue.
    pub fn rate(&mut self, card_id: &str, rating: DifficultyRating) -> &CardState {
        let today = self.clock.today();
        self.due_cards.retain(|card| card.id != card_id);
        self.state.record_review(card_id, rating, today);
        self.persist();
        &self.state.cards[card_id]
    }

    pub fn due_cards(&self) -> &[ReviewCard] {
        &self.due_cards
    }

    pub fn due_count(&self) -> usize {
        self.due_cards.len()
    }

    pub fn stats(&self) -> &ReviewStats {
        &self.state.stats
    }

    pub fn card_state(&self, card_id: &str) -> Option<&CardState> {
        self.state.cards.get(card_id)
    }

    pub fn today_stats(&self) -> TodayStats {
        self.state.today_stats()
    }

    pub fn reset_today_progress(&mut self) {
        self.state.reset_today_progress();
        self.persist();
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Swaps in a whole state, e.g. one restored from a backup file.
    pub fn replace_state(&mut self, mut state: ReviewState) {
        state.roll_over(self.clock.today());
        self.state = state;
        self.due_cards.clear();
        self.persist();
    }

    fn persist(&self) {
        save_review_state(&self.store, &self.storage_key, &self.state);
    }
}
