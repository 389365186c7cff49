//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs network calls or touches the audio engine directly.

use std::time::Duration;

use taleweave_core::api::GenerateRequest;
use taleweave_core::tale::Tale;

use crate::overlays::AuthMode;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Generate a story from the submitted form.
    Generate { request: GenerateRequest },

    /// Exchange credentials for a token (login or register).
    Authenticate {
        mode: AuthMode,
        name: String,
        email: String,
        password: String,
    },

    /// Fetch the user's saved stories.
    FetchStories,

    /// Toggle the saved state of a tale on the backend.
    ToggleSave { tale: Tale },

    /// Clear the persisted token and session.
    Logout,

    /// Download narration audio for a tale.
    FetchAudio { tale: Tale },

    /// Load downloaded audio bytes into the playback engine and start
    /// playing.
    LoadAudio { tale_id: String, bytes: Vec<u8> },

    /// Pause or resume playback.
    AudioToggle,

    /// Seek relative to the current position, in whole seconds.
    AudioSeekBy { seconds: i64 },

    /// Seek to an absolute playback position.
    AudioSeekTo { position: Duration },

    /// Stop playback and drop the loaded track.
    AudioStop,
}
