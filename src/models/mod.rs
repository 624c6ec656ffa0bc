pub mod calendar;
pub mod card_generator;
pub mod card_state;
pub mod progress;
pub mod rating;
pub mod reference;
pub mod review_card;
pub mod review_engine;
pub mod review_session;
pub mod review_state;
pub mod sm2;
pub mod stats;

pub use card_state::CardState;
pub use progress::Progress;
pub use rating::DifficultyRating;
pub use reference::{DeityInfo, ReferenceData, StoryInfo};
pub use review_card::{CardMetadata, FlashcardType, ReviewCard};
pub use review_engine::ReviewEngine;
pub use review_session::{CardPhase, ReviewSession, SessionPhase};
pub use review_state::ReviewState;
pub use stats::{ReviewStats, TodayStats};
