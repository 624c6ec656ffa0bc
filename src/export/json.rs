//! JSON backup of the review state and loading of custom reference tables.

use crate::error::Result;
use crate::models::{ReferenceData, ReviewState};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes the review state as pretty JSON, in the same shape it is persisted.
pub fn export_review_state_to_path(state: &ReviewState, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(state)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    log::info!(
        "Exported {} card states to '{}'",
        state.cards.len(),
        path.display()
    );
    Ok(())
}

/// Reads a review state backup.
/// Unlike the persisted blob, a broken backup is reported rather than ignored.
pub fn import_review_state(path: &Path) -> Result<ReviewState> {
    let contents = read_to_string(path)?;
    let state: ReviewState = serde_json::from_str(&contents)?;
    log::info!(
        "Imported {} card states from '{}'",
        state.cards.len(),
        path.display()
    );
    Ok(state)
}

/// Reads deity, story and pantheon tables. Ids are lower-cased to match lookups.
pub fn import_reference_data(path: &Path) -> Result<ReferenceData> {
    let contents = read_to_string(path)?;
    let raw: ReferenceData = serde_json::from_str(&contents)?;

    let reference = ReferenceData {
        pantheons: raw.pantheons,
        deities: raw
            .deities
            .into_iter()
            .map(|(id, deity)| (id.to_lowercase(), deity))
            .collect(),
        stories: raw
            .stories
            .into_iter()
            .map(|(id, story)| (id.to_lowercase(), story))
            .collect(),
    };
    log::info!(
        "Loaded {} deities and {} stories from '{}'",
        reference.deities.len(),
        reference.stories.len(),
        path.display()
    );
    Ok(reference)
}

fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;
    use crate::models::DifficultyRating;
    use crate::models::calendar::parse_iso_date;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_state() -> ReviewState {
        let today = parse_iso_date("2024-01-15").unwrap();
        let mut state = ReviewState::default();
        state.roll_over(today);
        state.ensure_card("domain-match:zeus", today);
        state.record_review("domain-match:zeus", DifficultyRating::Good, today);
        state.ensure_card("symbol-match:thor", today);
        state
    }

    #[test]
    fn test_export_writes_persisted_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");

        export_review_state_to_path(&create_test_state(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"todayReviewed\""));
        assert!(written.contains("\"nextReview\": \"2024-01-18\""));
        assert!(written.contains("\"lastReviewDate\": \"2024-01-15\""));
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let original = create_test_state();

        export_review_state_to_path(&original, &path).unwrap();
        let imported = import_review_state(&path).unwrap();

        assert_eq!(imported, original);
    }

    #[test]
    fn test_import_backup_from_older_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(
            &path,
            r#"{
  "cards": {
    "pantheon-match:ra": {
      "interval": 3,
      "easeFactor": 2.6,
      "nextReview": "2024-02-01",
      "reviews": 2,
      "lapses": 0
    }
  },
  "todayReviewed": [],
  "lastReviewDate": "",
  "stats": {
    "totalReviewed": 2,
    "currentStreak": 1,
    "longestStreak": 4,
    "averageAccuracy": 100,
    "correctToday": 0,
    "incorrectToday": 0
  }
}"#,
        )
        .unwrap();

        let state = import_review_state(&path).unwrap();
        assert_eq!(state.cards["pantheon-match:ra"].interval, 3);
        assert_eq!(state.last_review_date, None);
        assert_eq!(state.stats.longest_streak, 4);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempdir().unwrap();
        let result = import_review_state(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AtlasError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_review_state(&path), Err(AtlasError::Json(_))));
    }

    #[test]
    fn test_import_reference_data_lowercases_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reference.json");
        fs::write(
            &path,
            r#"{
  "pantheons": { "celtic": "Celtic" },
  "deities": {
    "Brigid": {
      "name": "Brigid",
      "domains": ["Poetry", "Healing"],
      "symbols": ["Flame"],
      "pantheonId": "celtic"
    }
  }
}"#,
        )
        .unwrap();

        let reference = import_reference_data(&path).unwrap();
        let brigid = reference.deity("brigid").unwrap();
        assert_eq!(brigid.domains, vec!["Poetry", "Healing"]);
        assert_eq!(reference.pantheon_name("celtic"), "Celtic");
        assert!(reference.stories.is_empty());
    }
}
