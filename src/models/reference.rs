//! Curated deity and story tables used to build flashcards.
//!
//! The tables cover a subset of the encyclopedia, so a missing id is normal
//! and not an error.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeityInfo {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    pub pantheon_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryInfo {
    pub title: String,
    #[serde(default)]
    pub characters: Vec<String>,
}

type DeityRow = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
    &'static str,
);

#[rustfmt::skip]
const DEITIES: &[DeityRow] = &[
    ("zeus", "Zeus", &["Sky", "Thunder", "Lightning"], &["Thunderbolt", "Eagle", "Oak"], "greek"),
    ("poseidon", "Poseidon", &["Sea", "Earthquakes", "Horses"], &["Trident", "Horse", "Dolphin"], "greek"),
    ("hades", "Hades", &["Underworld", "Death", "Wealth"], &["Helm of Darkness", "Cerberus"], "greek"),
    ("athena", "Athena", &["Wisdom", "War", "Crafts"], &["Owl", "Olive Tree", "Aegis"], "greek"),
    ("apollo", "Apollo", &["Sun", "Music", "Prophecy"], &["Lyre", "Laurel Wreath", "Sun Chariot"], "greek"),
    ("artemis", "Artemis", &["Hunt", "Moon", "Wilderness"], &["Bow and Arrow", "Deer", "Crescent Moon"], "greek"),
    ("odin", "Odin", &["Wisdom", "War", "Death"], &["Spear Gungnir", "Ravens", "Eye Patch"], "norse"),
    ("thor", "Thor", &["Thunder", "Lightning", "Storms"], &["Mjolnir", "Goats", "Belt of Strength"], "norse"),
    ("freya", "Freya", &["Love", "Beauty", "Fertility"], &["Cats", "Falcon Cloak", "Brisingamen"], "norse"),
    ("loki", "Loki", &["Mischief", "Trickery", "Fire"], &["Flames", "Serpent", "Net"], "norse"),
    ("ra", "Ra", &["Sun", "Creation", "Order"], &["Sun Disk", "Falcon", "Ankh"], "egyptian"),
    ("osiris", "Osiris", &["Afterlife", "Agriculture", "Resurrection"], &["Crook", "Flail", "Green Skin"], "egyptian"),
    ("isis", "Isis", &["Magic", "Wisdom", "Motherhood"], &["Throne", "Wings", "Ankh"], "egyptian"),
    ("anubis", "Anubis", &["Mummification", "Afterlife", "Protection"], &["Jackal", "Scales", "Black Color"], "egyptian"),
];

#[rustfmt::skip]
const STORIES: &[(&str, &str, &[&str])] = &[
    ("trojan-war", "The Trojan War", &["Zeus", "Athena", "Apollo", "Aphrodite", "Hera"]),
    ("odyssey", "The Odyssey", &["Poseidon", "Athena", "Zeus", "Hermes"]),
    ("ragnarok", "Ragnarok", &["Odin", "Thor", "Loki", "Freya", "Heimdall"]),
    ("osiris-myth", "The Myth of Osiris", &["Osiris", "Isis", "Set", "Horus", "Anubis"]),
];

/// Lookup tables keyed by lower-case id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub pantheons: HashMap<String, String>,
    #[serde(default)]
    pub deities: HashMap<String, DeityInfo>,
    #[serde(default)]
    pub stories: HashMap<String, StoryInfo>,
}

impl ReferenceData {
    pub fn deity(&self, id: &str) -> Option<&DeityInfo> {
        self.deities.get(&id.to_lowercase())
    }

    pub fn story(&self, id: &str) -> Option<&StoryInfo> {
        self.stories.get(&id.to_lowercase())
    }

    /// Display name of a pantheon, falling back to its id.
    pub fn pantheon_name<'a>(&'a self, pantheon_id: &'a str) -> &'a str {
        self.pantheons
            .get(pantheon_id)
            .map(String::as_str)
            .unwrap_or(pantheon_id)
    }

    /// Deity ids sorted by display name.
    pub fn sorted_deity_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.deities.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| self.deities[*a].name.cmp(&self.deities[*b].name));
        ids
    }

    /// Story ids sorted by title.
    pub fn sorted_story_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.stories.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| self.stories[*a].title.cmp(&self.stories[*b].title));
        ids
    }

    pub fn builtin() -> Self {
        let pantheons = [
            ("greek", "Greek"),
            ("norse", "Norse"),
            ("egyptian", "Egyptian"),
            ("celtic", "Celtic"),
            ("japanese", "Japanese"),
            ("hindu", "Hindu"),
            ("mesopotamian", "Mesopotamian"),
            ("chinese", "Chinese"),
        ]
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();

        let deities = DEITIES
            .iter()
            .map(|&(id, name, domains, symbols, pantheon_id)| {
                (
                    id.to_string(),
                    DeityInfo {
                        name: name.to_string(),
                        domains: to_strings(domains),
                        symbols: to_strings(symbols),
                        pantheon_id: pantheon_id.to_string(),
                        image_url: None,
                    },
                )
            })
            .collect();

        let stories = STORIES
            .iter()
            .map(|&(id, title, characters)| {
                (
                    id.to_string(),
                    StoryInfo {
                        title: title.to_string(),
                        characters: to_strings(characters),
                    },
                )
            })
            .collect();

        Self {
            pantheons,
            deities,
            stories,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
