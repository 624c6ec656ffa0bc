//! SM-2 style spaced repetition scheduling.
//!
//! Each card carries an ease factor that grows with easy answers and shrinks
//! with hard ones:
//! - Forgot: the interval restarts at one day and ease drops by 0.2
//! - Hard: the interval grows by 20% and ease drops by 0.15
//! - Good: the interval is multiplied by the ease factor
//! - Easy: like Good with a 1.3 bonus, and ease rises by 0.1
//!
//! Good and Easy also scale by `ease / 2.5`, so cards above the default ease
//! accelerate and cards below it slow down. Ease is clamped to `[1.3, 3.0]`
//! and intervals never fall below one day.

use super::calendar::add_days;
use super::{CardState, DifficultyRating};
use chrono::NaiveDate;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 3.0;

const EASY_BONUS: f64 = 1.3;
const HARD_MODIFIER: f64 = 1.2;
const MIN_INTERVAL: u32 = 1;

/// New interval and ease factor produced by a rating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NextReview {
    pub interval: u32,
    pub ease_factor: f64,
}

/// Calculates the next interval (in days) and ease factor for a rating.
pub fn calculate_next_review(
    current_interval: u32,
    rating: DifficultyRating,
    ease_factor: f64,
) -> NextReview {
    let current = f64::from(current_interval);
    let (interval, new_ease) = match rating {
        DifficultyRating::Forgot => (1.0, (ease_factor - 0.2).max(MIN_EASE_FACTOR)),
        DifficultyRating::Hard => (
            (current * HARD_MODIFIER).round(),
            (ease_factor - 0.15).max(MIN_EASE_FACTOR),
        ),
        DifficultyRating::Good => (
            (current * ease_factor * (ease_factor / DEFAULT_EASE_FACTOR)).round(),
            ease_factor,
        ),
        DifficultyRating::Easy => (
            (current * ease_factor * EASY_BONUS * (ease_factor / DEFAULT_EASE_FACTOR)).round(),
            (ease_factor + 0.1).min(MAX_EASE_FACTOR),
        ),
    };

    NextReview {
        // `as` saturates, so huge products stay in range.
        interval: (interval as u32).max(MIN_INTERVAL),
        ease_factor: new_ease.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR),
    }
}

pub fn next_review_date(today: NaiveDate, interval: u32) -> NaiveDate {
    add_days(today, interval)
}

/// State for a card seen for the first time: due immediately.
pub fn create_initial_card_state(today: NaiveDate) -> CardState {
    CardState {
        interval: 1,
        ease_factor: DEFAULT_EASE_FACTOR,
        next_review: today,
        reviews: 0,
        lapses: 0,
    }
}

pub fn is_card_due(state: &CardState, today: NaiveDate) -> bool {
    state.next_review <= today
}

/// Returns the state after rating a card on `today`. The input is untouched.
pub fn update_card_state(
    state: &CardState,
    rating: DifficultyRating,
    today: NaiveDate,
) -> CardState {
    let next = calculate_next_review(state.interval, rating, state.ease_factor);

    CardState {
        interval: next.interval,
        ease_factor: next.ease_factor,
        next_review: next_review_date(today, next.interval),
        reviews: state.reviews + 1,
        lapses: if rating == DifficultyRating::Forgot {
            state.lapses + 1
        } else {
            state.lapses
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::parse_iso_date;
    use crate::models::DifficultyRating::*;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn state(interval: u32, next_review: &str, reviews: u32, lapses: u32) -> CardState {
        CardState {
            interval,
            ease_factor: 2.5,
            next_review: date(next_review),
            reviews,
            lapses,
        }
    }

    #[test]
    fn test_reference_values() {
        let cases = [
            (Forgot, 1, 2.3),
            (Hard, 12, 2.35),
            (Good, 25, 2.5),
            (Easy, 33, 2.6),
        ];
        for (rating, interval, ease) in cases {
            let next = calculate_next_review(10, rating, 2.5);
            assert_eq!(next.interval, interval, "{rating:?}");
            assert!((next.ease_factor - ease).abs() < 1e-9, "{rating:?}");
        }
    }

    #[test]
    fn test_forgot_floors_ease() {
        assert_eq!(calculate_next_review(10, Forgot, 1.4).ease_factor, 1.3);
        assert_eq!(calculate_next_review(10, Hard, 1.35).ease_factor, 1.3);
    }

    #[test]
    fn test_easy_caps_ease() {
        assert_eq!(calculate_next_review(10, Easy, 2.95).ease_factor, 3.0);
    }

    #[test]
    fn test_ease_stays_clamped_under_repetition() {
        let mut ease = DEFAULT_EASE_FACTOR;
        for _ in 0..20 {
            ease = calculate_next_review(5, Easy, ease).ease_factor;
            assert!(ease <= MAX_EASE_FACTOR);
        }
        assert_eq!(ease, MAX_EASE_FACTOR);

        for rating in [Forgot, Hard] {
            let mut ease = DEFAULT_EASE_FACTOR;
            for _ in 0..20 {
                ease = calculate_next_review(5, rating, ease).ease_factor;
                assert!(ease >= MIN_EASE_FACTOR);
            }
            assert_eq!(ease, MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_interval_never_below_one() {
        for rating in DifficultyRating::ALL {
            for interval in [0, 1, 2, 100] {
                for ease in [MIN_EASE_FACTOR, DEFAULT_EASE_FACTOR, MAX_EASE_FACTOR] {
                    let next = calculate_next_review(interval, rating, ease);
                    assert!(next.interval >= 1);
                    assert!((MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&next.ease_factor));
                }
            }
        }
    }

    #[test]
    fn test_ease_term_scales_good_interval() {
        // 10 * 3.0 * (3.0 / 2.5) = 36
        assert_eq!(calculate_next_review(10, Good, 3.0).interval, 36);
        // 10 * 1.3 * (1.3 / 2.5) = 6.76
        assert_eq!(calculate_next_review(10, Good, 1.3).interval, 7);
    }

    #[test]
    fn test_is_card_due() {
        let today = date("2024-01-15");
        assert!(is_card_due(&state(1, "2024-01-10", 1, 0), today));
        assert!(is_card_due(&state(1, "2024-01-15", 1, 0), today));
        assert!(!is_card_due(&state(1, "2024-01-20", 1, 0), today));
    }

    #[test]
    fn test_initial_state() {
        let initial = create_initial_card_state(date("2024-01-15"));
        assert_eq!(initial.interval, 1);
        assert_eq!(initial.ease_factor, 2.5);
        assert_eq!(initial.next_review, date("2024-01-15"));
        assert_eq!(initial.reviews, 0);
        assert_eq!(initial.lapses, 0);
    }

    #[test]
    fn test_update_counts_reviews_and_lapses() {
        let today = date("2024-01-15");
        let initial = state(1, "2024-01-15", 3, 1);

        assert_eq!(update_card_state(&initial, Good, today).reviews, 4);
        assert_eq!(update_card_state(&initial, Forgot, today).lapses, 2);
        assert_eq!(update_card_state(&initial, Hard, today).lapses, 1);
        assert_eq!(update_card_state(&initial, Good, today).lapses, 1);
        assert_eq!(update_card_state(&initial, Easy, today).lapses, 1);
    }

    #[test]
    fn test_update_does_not_touch_input() {
        let today = date("2024-01-15");
        let initial = state(1, "2024-01-15", 3, 1);
        let before = initial.clone();

        let updated = update_card_state(&initial, Good, today);
        assert_eq!(initial, before);
        assert_ne!(updated, initial);
    }

    #[test]
    fn test_update_moves_next_review() {
        let today = date("2024-01-15");
        let updated = update_card_state(&state(1, "2024-01-15", 0, 0), Good, today);
        // round(1 * 2.5) = 3
        assert_eq!(updated.interval, 3);
        assert_eq!(updated.next_review, date("2024-01-18"));
    }

    #[test]
    fn test_consecutive_good_reviews_grow() {
        let mut today = date("2024-01-15");
        let mut card = create_initial_card_state(today);
        let mut intervals = vec![card.interval];

        for _ in 0..4 {
            card = update_card_state(&card, Good, today);
            assert_eq!(card.ease_factor, DEFAULT_EASE_FACTOR);
            intervals.push(card.interval);
            today = today.succ_opt().unwrap();
        }

        assert_eq!(intervals, vec![1, 3, 8, 20, 50]);
        assert!(intervals.windows(2).all(|w| w[1] > w[0]));
    }
}
