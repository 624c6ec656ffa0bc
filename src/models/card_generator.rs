//! Builds flashcards from the deities and stories a learner has seen.

use super::review_card::{CardMetadata, FlashcardType, ReviewCard, generate_card_id};
use super::{DeityInfo, Progress, ReferenceData};
use std::collections::HashSet;

/// Generates cards for every viewed deity and read story the reference
/// tables know about. Unknown ids are skipped.
pub fn generate_cards(progress: &Progress, reference: &ReferenceData) -> Vec<ReviewCard> {
    let mut cards = Vec::new();

    for deity_id in &progress.deities_viewed {
        match reference.deity(deity_id) {
            Some(deity) => push_deity_cards(&mut cards, deity_id, deity, reference),
            None => log::debug!("No reference data for deity '{}'", deity_id),
        }
    }

    for story_id in &progress.stories_read {
        let Some(story) = reference.story(story_id) else {
            log::debug!("No reference data for story '{}'", story_id);
            continue;
        };
        for character in &story.characters {
            let key = format!("{}-{}", story_id, character);
            cards.push(ReviewCard {
                id: generate_card_id(FlashcardType::StoryCharacter, &key),
                card_type: FlashcardType::StoryCharacter,
                question: format!("Does {} appear in \"{}\"?", character, story.title),
                answer: "Yes".to_string(),
                hint: None,
                image_url: None,
                metadata: CardMetadata {
                    story_id: Some(story_id.clone()),
                    ..CardMetadata::default()
                },
            });
        }
    }

    // Progress may list the same id twice; keep the first card per id.
    let mut seen = HashSet::new();
    cards.retain(|card| seen.insert(card.id.clone()));
    cards
}

fn push_deity_cards(
    cards: &mut Vec<ReviewCard>,
    deity_id: &str,
    deity: &DeityInfo,
    reference: &ReferenceData,
) {
    let pantheon = reference.pantheon_name(&deity.pantheon_id);

    if !deity.domains.is_empty() {
        let domains: Vec<&str> = deity.domains.iter().take(2).map(String::as_str).collect();
        cards.push(ReviewCard {
            id: generate_card_id(FlashcardType::DomainMatch, deity_id),
            card_type: FlashcardType::DomainMatch,
            question: format!(
                "Which deity is the god/goddess of {}?",
                domains.join(" and ")
            ),
            answer: deity.name.clone(),
            hint: Some(format!(
                "Hint: This deity belongs to the {} pantheon",
                pantheon
            )),
            image_url: None,
            metadata: CardMetadata {
                deity_id: Some(deity_id.to_string()),
                pantheon_id: Some(deity.pantheon_id.clone()),
                domains: deity.domains.clone(),
                ..CardMetadata::default()
            },
        });
    }

    if let Some((first, rest)) = deity.symbols.split_first() {
        cards.push(ReviewCard {
            id: generate_card_id(FlashcardType::SymbolMatch, deity_id),
            card_type: FlashcardType::SymbolMatch,
            question: format!("Which deity is symbolized by the {}?", first),
            answer: deity.name.clone(),
            hint: (!rest.is_empty())
                .then(|| format!("Hint: Other symbols include {}", rest.join(", "))),
            image_url: None,
            metadata: CardMetadata {
                deity_id: Some(deity_id.to_string()),
                pantheon_id: Some(deity.pantheon_id.clone()),
                symbols: deity.symbols.clone(),
                ..CardMetadata::default()
            },
        });
    }

    cards.push(ReviewCard {
        id: generate_card_id(FlashcardType::PantheonMatch, deity_id),
        card_type: FlashcardType::PantheonMatch,
        question: format!("Which pantheon does {} belong to?", deity.name),
        answer: pantheon.to_string(),
        hint: None,
        image_url: None,
        metadata: CardMetadata {
            deity_id: Some(deity_id.to_string()),
            pantheon_id: Some(deity.pantheon_id.clone()),
            ..CardMetadata::default()
        },
    });

    if let Some(image_url) = &deity.image_url {
        cards.push(ReviewCard {
            id: generate_card_id(FlashcardType::DeityRecognition, deity_id),
            card_type: FlashcardType::DeityRecognition,
            question: "Which deity is shown in this image?".to_string(),
            answer: deity.name.clone(),
            hint: Some(format!(
                "Hint: This deity belongs to the {} pantheon",
                pantheon
            )),
            image_url: Some(image_url.clone()),
            metadata: CardMetadata {
                deity_id: Some(deity_id.to_string()),
                pantheon_id: Some(deity.pantheon_id.clone()),
                ..CardMetadata::default()
            },
        });
    }
}
