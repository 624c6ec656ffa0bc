//! Content the learner has viewed, used as the source for flashcards.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progress {
    pub deities_viewed: Vec<String>,
    pub stories_read: Vec<String>,
}

impl Progress {
    /// Records a deity page view. Returns false if it was already recorded.
    pub fn track_deity_view(&mut self, deity_id: &str) -> bool {
        push_unique(&mut self.deities_viewed, deity_id)
    }

    /// Records a story as read. Returns false if it was already recorded.
    pub fn track_story_read(&mut self, story_id: &str) -> bool {
        push_unique(&mut self.stories_read, story_id)
    }

    pub fn has_viewed_deity(&self, deity_id: &str) -> bool {
        self.deities_viewed.iter().any(|id| id == deity_id)
    }

    pub fn has_read_story(&self, story_id: &str) -> bool {
        self.stories_read.iter().any(|id| id == story_id)
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_ignores_duplicates() {
        let mut progress = Progress::default();
        assert!(progress.track_deity_view("zeus"));
        assert!(!progress.track_deity_view("zeus"));
        assert!(progress.track_story_read("odyssey"));
        assert!(!progress.track_story_read("odyssey"));

        assert_eq!(progress.deities_viewed, vec!["zeus"]);
        assert!(progress.has_read_story("odyssey"));
        assert!(!progress.has_viewed_deity("thor"));
    }

    #[test]
    fn test_deserialize_ignores_other_progress_fields() {
        let json = r#"{"deitiesViewed":["thor"],"totalXP":120,"achievements":[]}"#;
        let progress: Progress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.deities_viewed, vec!["thor"]);
        assert!(progress.stories_read.is_empty());
    }
}
