//! The in-memory collection of saved tales.

use crate::tale::{SaveStatus, Tale};

/// Saved tales for the signed-in user.
///
/// The collection mirrors the backend: fetches replace it wholesale, and
/// save toggles apply the status the backend reports rather than guessing.
#[derive(Debug, Clone, Default)]
pub struct SavedTales {
    tales: Vec<Tale>,
}

impl SavedTales {
    pub fn tales(&self) -> &[Tale] {
        &self.tales
    }

    pub fn len(&self) -> usize {
        self.tales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tales.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tales.iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Tale> {
        self.tales.iter().find(|t| t.id == id)
    }

    /// Replaces the whole collection with a fresh fetch, newest first.
    pub fn replace_all(&mut self, mut tales: Vec<Tale>) {
        tales.sort_by(|a, b| b.date.cmp(&a.date));
        self.tales = tales;
    }

    /// Drops all tales, e.g. on logout.
    pub fn clear(&mut self) {
        self.tales.clear();
    }

    /// Applies the status the backend reported for a toggle.
    ///
    /// `Saved` inserts the tale (once), `Unsaved` removes it. Either way the
    /// result converges on what the backend holds.
    pub fn apply_status(&mut self, tale: &Tale, status: SaveStatus) {
        match status {
            SaveStatus::Saved => {
                if !self.contains(&tale.id) {
                    self.tales.insert(0, tale.clone());
                }
            }
            SaveStatus::Unsaved => self.remove(&tale.id),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.tales.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn tale(id: &str, hours_ago: i64) -> Tale {
        Tale {
            id: id.to_string(),
            text: format!("Tale {id}"),
            date: Utc::now() - Duration::hours(hours_ago),
            audio_url: None,
        }
    }

    #[test]
    fn replace_all_sorts_newest_first() {
        let mut library = SavedTales::default();
        library.replace_all(vec![tale("old", 10), tale("new", 1), tale("mid", 5)]);
        let ids: Vec<&str> = library.tales().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut library = SavedTales::default();
        library.replace_all(vec![tale("a", 1)]);
        library.replace_all(vec![tale("b", 2)]);
        assert!(!library.contains("a"));
        assert!(library.contains("b"));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn saved_status_inserts_once() {
        let mut library = SavedTales::default();
        let t = tale("x", 1);
        library.apply_status(&t, SaveStatus::Saved);
        library.apply_status(&t, SaveStatus::Saved);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn unsaved_status_removes() {
        let mut library = SavedTales::default();
        let t = tale("x", 1);
        library.apply_status(&t, SaveStatus::Saved);
        library.apply_status(&t, SaveStatus::Unsaved);
        assert!(library.is_empty());

        // Removing an unknown tale is a no-op.
        library.apply_status(&t, SaveStatus::Unsaved);
        assert!(library.is_empty());
    }
}
