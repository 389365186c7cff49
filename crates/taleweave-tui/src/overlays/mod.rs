//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.
//!
//! - `auth.rs`: sign-in / sign-up modal
//! - `library.rs`: saved-tales collection
//! - `confirm.rs`: unsave confirmation
//! - `render_utils.rs`: shared rendering utilities

pub mod auth;
pub mod confirm;
pub mod library;
pub mod render_utils;

pub use auth::{AuthMode, AuthState};
pub use confirm::ConfirmUnsaveState;
use crossterm::event::KeyEvent;
pub use library::LibraryState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Domain actions an overlay asks the reducer to apply.
#[derive(Debug)]
pub enum OverlayAction {
    /// Open a saved tale for reading.
    ReadTale { tale_id: String },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
    pub action: Option<OverlayAction>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
            action: None,
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: OverlayAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn closes(&self) -> bool {
        matches!(self.transition, OverlayTransition::Close)
    }
}

#[derive(Debug)]
pub enum Overlay {
    Auth(AuthState),
    Library(LibraryState),
    ConfirmUnsave(ConfirmUnsaveState),
}

impl Overlay {
    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Auth(a) => a.handle_key(tui, key),
            Overlay::Library(l) => l.handle_key(tui, key),
            Overlay::ConfirmUnsave(c) => c.handle_key(key),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::Auth(a) => a.render(frame, area, tui.tasks.auth.is_running()),
            Overlay::Library(l) => l.render(frame, area, &tui.library),
            Overlay::ConfirmUnsave(c) => c.render(frame, area),
        }
    }
}
