//! Difficulty ratings a learner gives after revealing an answer.

use crate::error::AtlasError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifficultyRating {
    Forgot = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl DifficultyRating {
    pub const ALL: [DifficultyRating; 4] = [
        DifficultyRating::Forgot,
        DifficultyRating::Hard,
        DifficultyRating::Good,
        DifficultyRating::Easy,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Good and Easy count towards accuracy.
    pub fn is_correct(self) -> bool {
        self.value() >= 3
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyRating::Forgot => "Forgot",
            DifficultyRating::Hard => "Hard",
            DifficultyRating::Good => "Good",
            DifficultyRating::Easy => "Easy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DifficultyRating::Forgot => "Could not remember",
            DifficultyRating::Hard => "Remembered with difficulty",
            DifficultyRating::Good => "Remembered correctly",
            DifficultyRating::Easy => "Remembered easily",
        }
    }
}

impl TryFrom<u8> for DifficultyRating {
    type Error = AtlasError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DifficultyRating::Forgot),
            2 => Ok(DifficultyRating::Hard),
            3 => Ok(DifficultyRating::Good),
            4 => Ok(DifficultyRating::Easy),
            other => Err(AtlasError::InvalidRating(other)),
        }
    }
}
