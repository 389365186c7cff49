//! Application state composition.
//!
//! Top-level state hierarchy for the TUI:
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── form: FormState        (story draft, focus, collapse)
//! │   ├── active_tale            (the tale being read)
//! │   ├── library: SavedTales    (saved collection)
//! │   ├── player: PlayerState    (audio playback mirror)
//! │   ├── tasks / task_seq       (async task lifecycle)
//! │   └── user / banner / ...
//! └── overlay: Option<Overlay>   (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut self` and `&TuiState` without borrow conflicts.

use ratatui::layout::Rect;
use taleweave_core::config::Config;
use taleweave_core::draft::Language;
use taleweave_core::library::SavedTales;
use taleweave_core::session::User;
use taleweave_core::tale::Tale;

use crate::common::{TaskSeq, Tasks};
use crate::features::form::FormState;
use crate::features::player::PlayerState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    /// Story form state.
    pub form: FormState,
    /// The tale currently shown in the reading view.
    pub active_tale: Option<Tale>,
    /// Tale id requested on the command line, applied once the collection
    /// loads.
    pub deep_link: Option<String>,
    /// True when the app was opened straight onto a saved tale; the form
    /// stays hidden in that case.
    pub opened_via_deep_link: bool,
    /// Scroll offset of the reading view.
    pub story_scroll: u16,
    /// Saved tales for the signed-in user.
    pub library: SavedTales,
    /// Signed-in user, if any.
    pub user: Option<User>,
    /// Audio playback state mirrored from the engine.
    pub player: PlayerState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Terminal size, tracked for mouse hit-testing.
    pub viewport: Rect,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Alert banner shown at the bottom of the screen.
    pub banner: Option<String>,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        let language = config.language.as_deref().and_then(Language::from_label);
        Self {
            should_quit: false,
            form: FormState::with_language(language),
            active_tale: None,
            deep_link: None,
            opened_via_deep_link: false,
            story_scroll: 0,
            library: SavedTales::default(),
            user: None,
            player: PlayerState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            viewport: Rect::default(),
            spinner_frame: 0,
            banner: None,
            config,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.tasks.generate.is_running()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the active tale is in the saved collection.
    pub fn active_tale_is_saved(&self) -> bool {
        self.active_tale
            .as_ref()
            .is_some_and(|tale| self.library.contains(&tale.id))
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(Config::default())
    }
}
