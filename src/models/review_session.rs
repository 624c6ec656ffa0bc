//! Review session management.
//! Walks through the cards due today one at a time: show the question, reveal
//! the answer, rate it, move on.

use super::calendar::Clock;
use super::stats::calculate_accuracy;
use super::{DifficultyRating, Progress, ReviewCard, ReviewEngine};
use crate::database::KeyValueStore;
use crate::error::{AtlasError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPhase {
    QuestionShown,
    AnswerRevealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress(CardPhase),
    Completed,
}

/// One pass over the due queue. Every rating is saved as it happens, so a
/// session can be dropped at any point.
pub struct ReviewSession {
    cards: Vec<ReviewCard>,
    current_index: usize,
    phase: SessionPhase,
    show_hint: bool,
    correct: u32,
    incorrect: u32,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            current_index: 0,
            phase: SessionPhase::NotStarted,
            show_hint: false,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Builds the due queue and shows its first card. With nothing due the
    /// session is immediately complete.
    pub fn start<S: KeyValueStore, C: Clock>(
        &mut self,
        engine: &mut ReviewEngine<S, C>,
        progress: &Progress,
    ) -> Result<()> {
        if self.phase != SessionPhase::NotStarted {
            log::error!("Starting a session that already started.");
            return Err(AtlasError::InvalidSessionState("session already started"));
        }

        self.cards = engine.generate(progress).to_vec();
        self.phase = if self.cards.is_empty() {
            SessionPhase::Completed
        } else {
            SessionPhase::InProgress(CardPhase::QuestionShown)
        };
        log::info!("Review session started with {} cards", self.cards.len());
        Ok(())
    }

    /// Throws away this session's counters and starts over.
    pub fn restart<S: KeyValueStore, C: Clock>(
        &mut self,
        engine: &mut ReviewEngine<S, C>,
        progress: &Progress,
    ) -> Result<()> {
        *self = Self::new();
        self.start(engine, progress)
    }

    pub fn reveal(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::InProgress(CardPhase::QuestionShown) => {
                self.phase = SessionPhase::InProgress(CardPhase::AnswerRevealed);
                Ok(())
            }
            SessionPhase::InProgress(CardPhase::AnswerRevealed) => {
                log::error!("Revealing a card that is already revealed.");
                Err(AtlasError::InvalidSessionState("answer already revealed"))
            }
            _ => Err(AtlasError::InvalidSessionState("no card to reveal")),
        }
    }

    /// Rates the current card and advances to the next one.
    pub fn rate<S: KeyValueStore, C: Clock>(
        &mut self,
        engine: &mut ReviewEngine<S, C>,
        rating: DifficultyRating,
    ) -> Result<()> {
        if self.phase != SessionPhase::InProgress(CardPhase::AnswerRevealed) {
            log::error!("Rating a card that is not revealed.");
            return Err(AtlasError::InvalidSessionState("answer not revealed"));
        }
        let Some(card) = self.cards.get(self.current_index) else {
            return Err(AtlasError::InvalidSessionState("no current card"));
        };

        let state = engine.rate(&card.id, rating);
        log::debug!(
            "Rated '{}' as {}, next review in {} days",
            card.id,
            rating.label(),
            state.interval
        );

        if rating.is_correct() {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        self.current_index += 1;
        self.show_hint = false;
        if self.current_index < self.cards.len() {
            self.phase = SessionPhase::InProgress(CardPhase::QuestionShown);
        } else {
            self.phase = SessionPhase::Completed;
            log::info!(
                "Review session completed: {}/{} correct",
                self.correct,
                self.cards.len()
            );
        }
        Ok(())
    }

    pub fn toggle_hint(&mut self) {
        if matches!(self.phase, SessionPhase::InProgress(CardPhase::QuestionShown)) {
            self.show_hint = !self.show_hint;
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_card(&self) -> Option<&ReviewCard> {
        match self.phase {
            SessionPhase::InProgress(_) => self.cards.get(self.current_index),
            _ => None,
        }
    }

    pub fn is_answer_revealed(&self) -> bool {
        self.phase == SessionPhase::InProgress(CardPhase::AnswerRevealed)
    }

    pub fn is_hint_shown(&self) -> bool {
        self.show_hint
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Completed without any card to review.
    pub fn is_caught_up(&self) -> bool {
        self.is_completed() && self.cards.is_empty()
    }

    /// One-based position of the current card.
    pub fn position(&self) -> usize {
        (self.current_index + 1).min(self.cards.len())
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    /// Fraction of the queue already rated.
    pub fn progress(&self) -> f32 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.current_index as f32 / self.cards.len() as f32
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect
    }

    pub fn accuracy(&self) -> u32 {
        calculate_accuracy(self.correct, self.correct + self.incorrect)
    }

    pub fn encouragement(&self) -> &'static str {
        match self.accuracy() {
            80.. => "Outstanding memory! The ancient scholars would be proud.",
            60..=79 => "Good work! Keep practicing to master these myths.",
            _ => "Every review strengthens your knowledge. Keep at it!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::ReferenceData;
    use crate::models::calendar::{FixedClock, parse_iso_date};

    fn engine(store: &MemoryStore) -> ReviewEngine<&MemoryStore, FixedClock> {
        ReviewEngine::new(
            store,
            FixedClock(parse_iso_date("2024-01-15").unwrap()),
            ReferenceData::builtin(),
            "mythos-atlas-review",
        )
    }

    fn learner() -> Progress {
        let mut progress = Progress::default();
        progress.track_deity_view("apollo");
        progress
    }

    #[test]
    fn test_full_session() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut session = ReviewSession::new();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.current_card().is_none());

        session.start(&mut engine, &learner()).unwrap();
        assert_eq!(session.total_count(), 3);
        assert_eq!(
            session.phase(),
            SessionPhase::InProgress(CardPhase::QuestionShown)
        );
        assert_eq!(session.current_card().unwrap().id, "domain-match:apollo");

        let ratings = [
            DifficultyRating::Good,
            DifficultyRating::Forgot,
            DifficultyRating::Easy,
        ];
        for (i, rating) in ratings.into_iter().enumerate() {
            assert_eq!(session.position(), i + 1);
            session.reveal().unwrap();
            assert!(session.is_answer_revealed());
            session.rate(&mut engine, rating).unwrap();
        }

        assert!(session.is_completed());
        assert!(!session.is_caught_up());
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.incorrect_count(), 1);
        assert_eq!(session.accuracy(), 67);
        assert_eq!(session.progress(), 1.0);
        assert_eq!(
            session.encouragement(),
            "Good work! Keep practicing to master these myths."
        );

        assert_eq!(engine.due_count(), 0);
        assert_eq!(engine.today_stats().reviewed, 3);
        assert_eq!(engine.card_state("symbol-match:apollo").unwrap().lapses, 1);
    }

    #[test]
    fn test_nothing_due_completes_immediately() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut session = ReviewSession::new();
        session.start(&mut engine, &Progress::default()).unwrap();

        assert!(session.is_caught_up());
        assert_eq!(session.progress(), 0.0);
        assert!(session.reveal().is_err());
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut session = ReviewSession::new();

        assert!(session.reveal().is_err());
        assert!(session.rate(&mut engine, DifficultyRating::Good).is_err());

        session.start(&mut engine, &learner()).unwrap();
        assert!(matches!(
            session.start(&mut engine, &learner()),
            Err(AtlasError::InvalidSessionState(_))
        ));

        // Rating before the answer is shown changes nothing.
        assert!(session.rate(&mut engine, DifficultyRating::Good).is_err());
        assert_eq!(engine.stats().total_reviewed, 0);
        assert_eq!(session.position(), 1);

        session.reveal().unwrap();
        assert!(session.reveal().is_err());
        assert!(session.is_answer_revealed());
    }

    #[test]
    fn test_hint_toggles_only_on_question() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut session = ReviewSession::new();
        session.start(&mut engine, &learner()).unwrap();

        session.toggle_hint();
        assert!(session.is_hint_shown());
        session.reveal().unwrap();
        session.toggle_hint();
        assert!(session.is_hint_shown());

        session.rate(&mut engine, DifficultyRating::Hard).unwrap();
        assert!(!session.is_hint_shown());
    }

    #[test]
    fn test_abandoned_session_keeps_ratings_and_restart_skips_them() {
        let store = MemoryStore::new();
        let mut engine = engine(&store);
        let mut session = ReviewSession::new();
        session.start(&mut engine, &learner()).unwrap();
        session.reveal().unwrap();
        session.rate(&mut engine, DifficultyRating::Good).unwrap();
        drop(session);

        let mut session = ReviewSession::new();
        session.start(&mut engine, &learner()).unwrap();
        assert_eq!(session.total_count(), 2);
        assert_eq!(engine.stats().total_reviewed, 1);

        session.restart(&mut engine, &learner()).unwrap();
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.total_count(), 2);
    }
}
