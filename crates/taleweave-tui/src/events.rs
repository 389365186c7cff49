//! UI event types.
//!
//! Events are inputs to the reducer: terminal input, ticks, and results of
//! async work the runtime spawned. The runtime collects them each frame and
//! feeds them through `update`.

use std::time::Duration;

use taleweave_core::tale::{SaveStatus, Tale};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};
use crate::overlays::AuthMode;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick for spinner animation and audio progress.
    Tick,
    /// Raw terminal event (key, resize, paste).
    Terminal(crossterm::event::Event),

    /// An async task started; records its id and cancel token.
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    /// An async task finished; the boxed result event is re-dispatched if
    /// the task is still the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Story generation finished.
    Generated(Result<Tale, String>),
    /// Login or registration finished.
    AuthFinished {
        mode: AuthMode,
        name: String,
        email: String,
        result: Result<(), String>,
    },
    /// Saved-stories fetch finished.
    StoriesLoaded(Result<Vec<Tale>, String>),
    /// A save toggle round-trip finished with the backend's verdict.
    SaveToggled {
        tale: Tale,
        result: Result<SaveStatus, String>,
    },

    /// Audio playback events.
    Audio(AudioEvent),
}

/// Events from the audio pipeline (download and playback engine).
#[derive(Debug)]
pub enum AudioEvent {
    /// Narration bytes downloaded for a tale.
    Fetched { tale_id: String, bytes: Vec<u8> },
    /// Narration download failed.
    FetchFailed { tale_id: String, error: String },
    /// The engine decoded the audio and started playback.
    Loaded {
        tale_id: String,
        duration: Option<Duration>,
    },
    /// The engine could not decode the audio.
    LoadFailed { tale_id: String, error: String },
    /// Periodic playback progress from the engine.
    Progress { position: Duration, playing: bool },
    /// Playback reached the end of the track.
    Finished,
}
