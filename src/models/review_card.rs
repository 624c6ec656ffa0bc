//! A generated flashcard. Only its scheduling state is persisted; the card
//! itself is rebuilt from viewing history each session.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashcardType {
    DeityRecognition,
    DomainMatch,
    SymbolMatch,
    PantheonMatch,
    StoryCharacter,
}

impl FlashcardType {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashcardType::DeityRecognition => "deity-recognition",
            FlashcardType::DomainMatch => "domain-match",
            FlashcardType::SymbolMatch => "symbol-match",
            FlashcardType::PantheonMatch => "pantheon-match",
            FlashcardType::StoryCharacter => "story-character",
        }
    }

    /// Short badge text shown above the question.
    pub fn label(self) -> &'static str {
        match self {
            FlashcardType::DeityRecognition => "Visual ID",
            FlashcardType::DomainMatch => "Domain",
            FlashcardType::SymbolMatch => "Symbol",
            FlashcardType::PantheonMatch => "Pantheon",
            FlashcardType::StoryCharacter => "Story",
        }
    }
}

impl fmt::Display for FlashcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// References back to the content a card was generated from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantheon_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    pub id: String,
    #[serde(rename = "type")]
    pub card_type: FlashcardType,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata: CardMetadata,
}

/// Stable card id: the same content always maps to the same id.
pub fn generate_card_id(card_type: FlashcardType, key: &str) -> String {
    format!("{}:{}", card_type.as_str(), key)
}
