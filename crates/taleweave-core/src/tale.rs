//! Tale types shared across the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated fairy tale with optional audio narration.
///
/// Tales are replaced wholesale, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tale {
    /// Client-generated unique id (uuid v4) or backend id for loaded tales.
    pub id: String,
    /// Raw generated text; cleaned for display by [`crate::text::clean_text`].
    pub text: String,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
    /// Narration location, relative to the backend base URL or absolute.
    pub audio_url: Option<String>,
}

impl Tale {
    /// Creates a freshly generated tale with a new client-side id.
    pub fn generated(text: String, audio_url: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            date: Utc::now(),
            audio_url,
        }
    }
}

/// A saved story row as the backend returns it from `GET /stories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendTale {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BackendTale> for Tale {
    fn from(row: BackendTale) -> Self {
        Self {
            id: row.id,
            text: row.content,
            date: row.created_at,
            audio_url: row.audio_url,
        }
    }
}

impl From<&Tale> for BackendTale {
    fn from(tale: &Tale) -> Self {
        Self {
            id: tale.id.clone(),
            content: tale.text.clone(),
            audio_url: tale.audio_url.clone(),
            created_at: tale.date,
        }
    }
}

/// Net effect of the backend's save toggle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saved,
    Unsaved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tales_get_unique_ids() {
        let a = Tale::generated("Once".to_string(), None);
        let b = Tale::generated("Twice".to_string(), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn backend_row_round_trips() {
        let tale = Tale::generated("A story".to_string(), Some("/audio/x.mp3".to_string()));
        let row = BackendTale::from(&tale);
        let back = Tale::from(row);
        assert_eq!(back, tale);
    }

    #[test]
    fn save_status_parses_backend_strings() {
        let saved: SaveStatus = serde_json::from_str("\"saved\"").unwrap();
        let unsaved: SaveStatus = serde_json::from_str("\"unsaved\"").unwrap();
        assert_eq!(saved, SaveStatus::Saved);
        assert_eq!(unsaved, SaveStatus::Unsaved);
    }
}
