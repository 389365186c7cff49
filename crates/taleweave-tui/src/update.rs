//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use taleweave_core::session::User;
use taleweave_core::tale::Tale;

use crate::effects::UiEffect;
use crate::events::{AudioEvent, UiEvent};
use crate::features::form::{self, FormOutcome};
use crate::features::player::{PlayerPhase, SEEK_STEP_SECS};
use crate::overlays::{AuthState, ConfirmUnsaveState, LibraryState, Overlay, OverlayAction};
use crate::render;
use crate::state::{AppState, TuiState};

const GENERATE_FAILED_BANNER: &str = "Failed to generate story. Are you logged in?";
const AUTH_FAILED_ERROR: &str = "Authentication failed.";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::Generated(result) => handle_generated(&mut app.tui, result),
        UiEvent::AuthFinished {
            mode: _,
            name,
            email,
            result,
        } => handle_auth_finished(app, name, email, result),
        UiEvent::StoriesLoaded(result) => handle_stories_loaded(&mut app.tui, result),
        UiEvent::SaveToggled { tale, result } => handle_save_toggled(app, &tale, result),
        UiEvent::Audio(audio_event) => handle_audio_event(&mut app.tui, audio_event),
    }
}

// ============================================================================
// Async Result Handlers
// ============================================================================

fn handle_generated(tui: &mut TuiState, result: Result<Tale, String>) -> Vec<UiEffect> {
    match result {
        Ok(tale) => {
            tracing::info!(tale_id = %tale.id, "story generated");
            tui.active_tale = Some(tale);
            tui.form.collapsed = true;
            tui.story_scroll = 0;
            tui.banner = None;
            // Narration from a previous tale stops with the old tale.
            let was_playing = tui.player.phase != PlayerPhase::Idle;
            tui.player.reset();
            if was_playing {
                vec![UiEffect::AudioStop]
            } else {
                vec![]
            }
        }
        Err(error) => {
            tracing::error!(%error, "story generation failed");
            tui.banner = Some(GENERATE_FAILED_BANNER.to_string());
            vec![]
        }
    }
}

fn handle_auth_finished(
    app: &mut AppState,
    name: String,
    email: String,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            let name = if name.is_empty() {
                "User".to_string()
            } else {
                name
            };
            tracing::info!(%email, "signed in");
            app.tui.user = Some(User { name, email });
            if matches!(app.overlay, Some(Overlay::Auth(_))) {
                app.overlay = None;
            }
            // The collection is fetched fresh on every sign-in.
            vec![UiEffect::FetchStories]
        }
        Err(error) => {
            tracing::error!(%error, "authentication failed");
            if let Some(Overlay::Auth(auth)) = &mut app.overlay {
                auth.set_error(AUTH_FAILED_ERROR.to_string());
            } else {
                app.tui.banner = Some(AUTH_FAILED_ERROR.to_string());
            }
            vec![]
        }
    }
}

fn handle_stories_loaded(tui: &mut TuiState, result: Result<Vec<Tale>, String>) -> Vec<UiEffect> {
    match result {
        Ok(tales) => {
            tracing::debug!(count = tales.len(), "saved tales loaded");
            tui.library.replace_all(tales);
            if let Some(id) = tui.deep_link.take() {
                match tui.library.get(&id) {
                    Some(tale) => {
                        tui.active_tale = Some(tale.clone());
                        tui.form.collapsed = true;
                        tui.story_scroll = 0;
                    }
                    None => {
                        tracing::warn!(tale_id = %id, "deep-linked tale not in collection");
                        tui.opened_via_deep_link = false;
                    }
                }
            }
        }
        Err(error) => {
            // Fetch failures are logged, never surfaced as alerts.
            tracing::warn!(%error, "failed to fetch saved tales");
        }
    }
    vec![]
}

fn handle_save_toggled(
    app: &mut AppState,
    tale: &Tale,
    result: Result<taleweave_core::tale::SaveStatus, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(status) => {
            tracing::debug!(tale_id = %tale.id, ?status, "save toggled");
            app.tui.library.apply_status(tale, status);
            // Keep the library selection valid after a removal.
            if let Some(Overlay::Library(library)) = &mut app.overlay {
                let count = app.tui.library.len();
                if count == 0 {
                    library.selected = 0;
                } else {
                    library.selected = library.selected.min(count - 1);
                }
            }
        }
        Err(error) => {
            // Sync failures are logged, never surfaced as alerts.
            tracing::warn!(tale_id = %tale.id, %error, "failed to sync save state");
        }
    }
    vec![]
}

fn handle_audio_event(tui: &mut TuiState, event: AudioEvent) -> Vec<UiEffect> {
    match event {
        AudioEvent::Fetched { tale_id, bytes } => {
            // Ignore downloads for a tale the user has moved away from.
            if tui.player.is_for(&tale_id) && tui.player.phase == PlayerPhase::Loading {
                vec![UiEffect::LoadAudio { tale_id, bytes }]
            } else {
                vec![]
            }
        }
        AudioEvent::FetchFailed { tale_id, error } => {
            tracing::warn!(%tale_id, %error, "narration download failed");
            if tui.player.is_for(&tale_id) {
                tui.player.reset();
            }
            vec![]
        }
        AudioEvent::Loaded { tale_id, duration } => {
            if tui.player.is_for(&tale_id) {
                tui.player.loaded(duration);
            }
            vec![]
        }
        AudioEvent::LoadFailed { tale_id, error } => {
            tracing::warn!(%tale_id, %error, "narration decode failed");
            if tui.player.is_for(&tale_id) {
                tui.player.reset();
            }
            vec![]
        }
        AudioEvent::Progress { position, playing } => {
            if tui.player.phase == PlayerPhase::Ready {
                tui.player.position = position;
                tui.player.playing = playing;
            }
            vec![]
        }
        AudioEvent::Finished => {
            if tui.player.phase == PlayerPhase::Ready {
                tui.player.playing = false;
                if let Some(duration) = tui.player.duration {
                    tui.player.position = duration;
                }
            }
            vec![]
        }
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if !matches!(key.kind, KeyEventKind::Release) => {
            // A key press dismisses the alert banner, like closing an alert.
            app.tui.banner = None;
            handle_key(app, key)
        }
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            if app.tui.form.editing
                && let Some(value) = app.tui.form.text_value_mut()
            {
                value.push_str(&text);
            }
            vec![]
        }
        Event::Resize(width, height) => {
            app.tui.viewport = Rect::new(0, 0, width, height);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    // Overlays are keyboard-driven; the mouse works the reading view only.
    if app.overlay.is_some() || form_interactive(&app.tui) {
        return vec![];
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.tui.story_scroll = app.tui.story_scroll.saturating_sub(1);
            vec![]
        }
        MouseEventKind::ScrollDown => {
            app.tui.story_scroll = app.tui.story_scroll.saturating_add(1);
            vec![]
        }
        MouseEventKind::Down(MouseButton::Left) => {
            seek_to_click(&mut app.tui, mouse.column, mouse.row)
        }
        _ => vec![],
    }
}

/// Maps a click on the progress track to a playback position, proportional
/// to the horizontal offset within the track.
fn seek_to_click(tui: &mut TuiState, column: u16, row: u16) -> Vec<UiEffect> {
    if tui.player.phase != PlayerPhase::Ready {
        return vec![];
    }
    let Some(duration) = tui.player.duration else {
        return vec![];
    };
    let Some(track) = render::player_track_area(tui, tui.viewport) else {
        return vec![];
    };
    if row != track.y || column < track.x || track.width == 0 {
        return vec![];
    }
    let offset = column - track.x;
    if offset >= track.width {
        return vec![];
    }
    let position = duration.mul_f64(f64::from(offset) / f64::from(track.width));
    // Visual progress and playback position move together; the engine
    // confirms on the next progress sample.
    tui.player.position = position;
    vec![UiEffect::AudioSeekTo { position }]
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    // Modal overlays take all input first.
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        if update.closes() {
            app.overlay = None;
        }
        if let Some(action) = update.action {
            apply_overlay_action(&mut app.tui, action);
        }
        return update.effects;
    }

    // While editing a text field, the form owns the keyboard.
    if app.tui.form.editing && form_interactive(&app.tui) {
        return handle_form_key(&mut app.tui, key);
    }

    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('a') if !app.tui.is_signed_in() => {
            app.overlay = Some(Overlay::Auth(AuthState::open()));
            vec![]
        }
        KeyCode::Char('o') if app.tui.is_signed_in() => {
            tracing::info!("signed out");
            app.tui.user = None;
            app.tui.library.clear();
            vec![UiEffect::Logout]
        }
        KeyCode::Char('m') => {
            if app.tui.is_signed_in() {
                app.overlay = Some(Overlay::Library(LibraryState::open()));
            } else {
                app.overlay = Some(Overlay::Auth(AuthState::open()));
            }
            vec![]
        }
        KeyCode::Char('s') => toggle_save_active_tale(app),
        KeyCode::Char(' ') | KeyCode::Char('p') => handle_play_pause(&mut app.tui),
        KeyCode::Char('n') if !app.tui.opened_via_deep_link => {
            app.tui.form.collapsed = false;
            vec![]
        }
        KeyCode::Char('b') if app.tui.opened_via_deep_link => {
            // Back out of a deep-linked tale into the collection.
            app.tui.opened_via_deep_link = false;
            app.tui.active_tale = None;
            app.tui.form.collapsed = false;
            app.overlay = Some(Overlay::Library(LibraryState::open()));
            vec![]
        }
        KeyCode::Left | KeyCode::Right if !form_interactive(&app.tui) => {
            if app.tui.player.phase == PlayerPhase::Ready {
                let seconds = if key.code == KeyCode::Left {
                    -SEEK_STEP_SECS
                } else {
                    SEEK_STEP_SECS
                };
                vec![UiEffect::AudioSeekBy { seconds }]
            } else {
                vec![]
            }
        }
        KeyCode::Up | KeyCode::PageUp if !form_interactive(&app.tui) => {
            let step = if key.code == KeyCode::PageUp { 10 } else { 1 };
            app.tui.story_scroll = app.tui.story_scroll.saturating_sub(step);
            vec![]
        }
        KeyCode::Down | KeyCode::PageDown if !form_interactive(&app.tui) => {
            let step = if key.code == KeyCode::PageDown { 10 } else { 1 };
            app.tui.story_scroll = app.tui.story_scroll.saturating_add(step);
            vec![]
        }
        _ if form_interactive(&app.tui) => handle_form_key(&mut app.tui, key),
        _ => vec![],
    }
}

/// Whether the expanded form currently receives navigation keys.
fn form_interactive(tui: &TuiState) -> bool {
    !tui.opened_via_deep_link && !tui.form.collapsed
}

fn handle_form_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match form::handle_key(&mut tui.form, key) {
        FormOutcome::Submit => {
            // A generation in flight swallows repeat submissions.
            if tui.is_generating() {
                return vec![];
            }
            // The topic is the form's one required field.
            if tui.form.draft.topic.trim().is_empty() {
                tui.form.field = form::FormField::Topic;
                return vec![];
            }
            let request = tui.form.draft.to_request();
            tracing::info!(length = %request.length, language = %request.language, "generating story");
            vec![UiEffect::Generate { request }]
        }
        FormOutcome::Handled | FormOutcome::Ignored => vec![],
    }
}

fn toggle_save_active_tale(app: &mut AppState) -> Vec<UiEffect> {
    let Some(tale) = app.tui.active_tale.clone() else {
        return vec![];
    };
    // Saving requires an account; prompt instead of calling the backend.
    if !app.tui.is_signed_in() {
        app.overlay = Some(Overlay::Auth(AuthState::open()));
        return vec![];
    }
    if app.tui.tasks.save_toggle.is_running() {
        return vec![];
    }
    if app.tui.library.contains(&tale.id) {
        // Removal is destructive enough to warrant a confirmation.
        app.overlay = Some(Overlay::ConfirmUnsave(ConfirmUnsaveState::open(tale)));
        vec![]
    } else {
        vec![UiEffect::ToggleSave { tale }]
    }
}

fn handle_play_pause(tui: &mut TuiState) -> Vec<UiEffect> {
    let Some(tale) = tui.active_tale.clone() else {
        return vec![];
    };
    if tale.audio_url.is_none() {
        return vec![];
    }

    if tui.player.is_for(&tale.id) {
        match tui.player.phase {
            PlayerPhase::Loading => vec![],
            PlayerPhase::Ready => {
                tui.player.playing = !tui.player.playing;
                vec![UiEffect::AudioToggle]
            }
            PlayerPhase::Idle => {
                tui.player.start_loading(&tale.id);
                vec![UiEffect::FetchAudio { tale }]
            }
        }
    } else {
        tui.player.start_loading(&tale.id);
        vec![UiEffect::FetchAudio { tale }]
    }
}

fn apply_overlay_action(tui: &mut TuiState, action: OverlayAction) {
    match action {
        OverlayAction::ReadTale { tale_id } => {
            if let Some(tale) = tui.library.get(&tale_id) {
                tui.active_tale = Some(tale.clone());
                tui.form.collapsed = true;
                tui.story_scroll = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use taleweave_core::config::Config;
    use taleweave_core::tale::SaveStatus;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
    use crate::features::form::FormField;
    use crate::overlays::AuthMode;

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn tale(id: &str) -> Tale {
        Tale {
            id: id.to_string(),
            text: format!("Tale {id}\nOnce upon a time.\nThe End."),
            date: chrono::Utc::now(),
            audio_url: None,
        }
    }

    fn start_task(app: &mut AppState, kind: TaskKind, id: u64) {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted {
                    id: TaskId(id),
                    cancel: None,
                },
            },
        );
    }

    fn submit_form(app: &mut AppState) -> Vec<UiEffect> {
        app.tui.form.draft.topic = "Dragons".to_string();
        app.tui.form.field = FormField::Submit;
        update(app, key_event(KeyCode::Enter))
    }

    #[test]
    fn submit_requires_a_topic() {
        let mut app = app();
        app.tui.form.field = FormField::Submit;
        let effects = update(&mut app, key_event(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.tui.form.field, FormField::Topic);
    }

    #[test]
    fn submit_emits_generate_effect() {
        let mut app = app();
        let effects = submit_form(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::Generate { .. }]));
    }

    #[test]
    fn submit_is_ignored_while_generating() {
        let mut app = app();
        start_task(&mut app, TaskKind::Generate, 1);
        let effects = submit_form(&mut app);
        assert!(effects.is_empty());
    }

    #[test]
    fn generated_ok_collapses_form_and_shows_tale() {
        let mut app = app();
        update(&mut app, UiEvent::Generated(Ok(tale("t1"))));
        assert!(app.tui.form.collapsed);
        assert_eq!(app.tui.active_tale.as_ref().map(|t| t.id.as_str()), Some("t1"));
        assert!(app.tui.banner.is_none());
    }

    #[test]
    fn generated_err_raises_alert_banner() {
        let mut app = app();
        update(&mut app, UiEvent::Generated(Err("boom".to_string())));
        assert_eq!(app.tui.banner.as_deref(), Some(GENERATE_FAILED_BANNER));
        assert!(!app.tui.form.collapsed);

        // Any key dismisses the banner.
        update(&mut app, key_event(KeyCode::Down));
        assert!(app.tui.banner.is_none());
    }

    #[test]
    fn save_while_signed_out_opens_auth_without_network() {
        let mut app = app();
        app.tui.active_tale = Some(tale("t1"));
        app.tui.form.collapsed = true;

        let effects = update(&mut app, key_event(KeyCode::Char('s')));
        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::Auth(_))));
    }

    #[test]
    fn save_unsaved_tale_emits_toggle() {
        let mut app = app();
        app.tui.user = Some(User {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
        });
        app.tui.active_tale = Some(tale("t1"));
        app.tui.form.collapsed = true;

        let effects = update(&mut app, key_event(KeyCode::Char('s')));
        assert!(matches!(effects.as_slice(), [UiEffect::ToggleSave { .. }]));
    }

    #[test]
    fn save_saved_tale_asks_for_confirmation() {
        let mut app = app();
        app.tui.user = Some(User {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
        });
        let t = tale("t1");
        app.tui.library.replace_all(vec![t.clone()]);
        app.tui.active_tale = Some(t);
        app.tui.form.collapsed = true;

        let effects = update(&mut app, key_event(KeyCode::Char('s')));
        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::ConfirmUnsave(_))));

        // Confirming emits the toggle.
        let effects = update(&mut app, key_event(KeyCode::Char('y')));
        assert!(matches!(effects.as_slice(), [UiEffect::ToggleSave { .. }]));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn save_toggled_converges_on_backend_status() {
        let mut app = app();
        let t = tale("t1");

        // Saved inserts exactly once, even if reported twice.
        update(
            &mut app,
            UiEvent::SaveToggled {
                tale: t.clone(),
                result: Ok(SaveStatus::Saved),
            },
        );
        update(
            &mut app,
            UiEvent::SaveToggled {
                tale: t.clone(),
                result: Ok(SaveStatus::Saved),
            },
        );
        assert_eq!(app.tui.library.len(), 1);

        update(
            &mut app,
            UiEvent::SaveToggled {
                tale: t.clone(),
                result: Ok(SaveStatus::Unsaved),
            },
        );
        assert!(app.tui.library.is_empty());
    }

    #[test]
    fn save_toggle_failure_is_silent() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::SaveToggled {
                tale: tale("t1"),
                result: Err("offline".to_string()),
            },
        );
        assert!(app.tui.banner.is_none());
        assert!(app.tui.library.is_empty());
    }

    #[test]
    fn auth_success_closes_overlay_and_fetches_stories() {
        let mut app = app();
        app.overlay = Some(Overlay::Auth(AuthState::open()));

        let effects = update(
            &mut app,
            UiEvent::AuthFinished {
                mode: AuthMode::Login,
                name: String::new(),
                email: "a@b.c".to_string(),
                result: Ok(()),
            },
        );
        assert!(matches!(effects.as_slice(), [UiEffect::FetchStories]));
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.user.as_ref().map(|u| u.name.as_str()), Some("User"));
    }

    #[test]
    fn auth_failure_keeps_overlay_open_with_error() {
        let mut app = app();
        app.overlay = Some(Overlay::Auth(AuthState::open()));

        let effects = update(
            &mut app,
            UiEvent::AuthFinished {
                mode: AuthMode::Login,
                name: String::new(),
                email: "a@b.c".to_string(),
                result: Err("401".to_string()),
            },
        );
        assert!(effects.is_empty());
        match &app.overlay {
            Some(Overlay::Auth(auth)) => assert_eq!(auth.error.as_deref(), Some(AUTH_FAILED_ERROR)),
            other => panic!("expected auth overlay, got {other:?}"),
        }
        assert!(app.tui.user.is_none());
    }

    #[test]
    fn stories_loaded_replaces_wholesale() {
        let mut app = app();
        app.tui.library.replace_all(vec![tale("old")]);
        update(
            &mut app,
            UiEvent::StoriesLoaded(Ok(vec![tale("a"), tale("b")])),
        );
        assert_eq!(app.tui.library.len(), 2);
        assert!(!app.tui.library.contains("old"));
    }

    #[test]
    fn stories_load_failure_is_silent() {
        let mut app = app();
        update(&mut app, UiEvent::StoriesLoaded(Err("offline".to_string())));
        assert!(app.tui.banner.is_none());
    }

    #[test]
    fn deep_link_resolves_when_collection_loads() {
        let mut app = app();
        app.tui.deep_link = Some("b".to_string());
        app.tui.opened_via_deep_link = true;

        update(
            &mut app,
            UiEvent::StoriesLoaded(Ok(vec![tale("a"), tale("b")])),
        );
        assert_eq!(app.tui.active_tale.as_ref().map(|t| t.id.as_str()), Some("b"));
        assert!(app.tui.form.collapsed);
        assert!(app.tui.opened_via_deep_link);
    }

    #[test]
    fn missing_deep_link_falls_back_to_the_form() {
        let mut app = app();
        app.tui.deep_link = Some("nope".to_string());
        app.tui.opened_via_deep_link = true;

        update(&mut app, UiEvent::StoriesLoaded(Ok(vec![tale("a")])));
        assert!(app.tui.active_tale.is_none());
        assert!(!app.tui.opened_via_deep_link);
    }

    #[test]
    fn logout_clears_user_and_collection() {
        let mut app = app();
        app.tui.user = Some(User {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
        });
        app.tui.library.replace_all(vec![tale("t1")]);
        app.tui.form.collapsed = true;

        let effects = update(&mut app, key_event(KeyCode::Char('o')));
        assert!(matches!(effects.as_slice(), [UiEffect::Logout]));
        assert!(app.tui.user.is_none());
        assert!(app.tui.library.is_empty());
    }

    #[test]
    fn play_fetches_then_toggles() {
        let mut app = app();
        let mut t = tale("t1");
        t.audio_url = Some("/audio/t1.mp3".to_string());
        app.tui.active_tale = Some(t);
        app.tui.form.collapsed = true;

        let effects = update(&mut app, key_event(KeyCode::Char(' ')));
        assert!(matches!(effects.as_slice(), [UiEffect::FetchAudio { .. }]));
        assert_eq!(app.tui.player.phase, PlayerPhase::Loading);

        // A second press while loading does nothing.
        let effects = update(&mut app, key_event(KeyCode::Char(' ')));
        assert!(effects.is_empty());

        // Bytes arriving for the loading tale go to the engine.
        let effects = update(
            &mut app,
            UiEvent::Audio(AudioEvent::Fetched {
                tale_id: "t1".to_string(),
                bytes: vec![1, 2, 3],
            }),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::LoadAudio { .. }]));

        update(
            &mut app,
            UiEvent::Audio(AudioEvent::Loaded {
                tale_id: "t1".to_string(),
                duration: Some(std::time::Duration::from_secs(90)),
            }),
        );
        assert_eq!(app.tui.player.phase, PlayerPhase::Ready);
        assert!(app.tui.player.playing);

        let effects = update(&mut app, key_event(KeyCode::Char(' ')));
        assert!(matches!(effects.as_slice(), [UiEffect::AudioToggle]));
        assert!(!app.tui.player.playing);
    }

    fn mouse_click(column: u16, row: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn app_with_ready_player() -> AppState {
        let mut app = app();
        app.tui.viewport = Rect::new(0, 0, 80, 24);
        let mut t = tale("t1");
        t.audio_url = Some("/audio/t1.mp3".to_string());
        app.tui.active_tale = Some(t);
        app.tui.form.collapsed = true;
        app.tui.player.start_loading("t1");
        app.tui
            .player
            .loaded(Some(std::time::Duration::from_secs(100)));
        app
    }

    #[test]
    fn click_on_the_track_seeks_proportionally() {
        let mut app = app_with_ready_player();
        let track = crate::render::player_track_area(&app.tui, app.tui.viewport)
            .expect("track should be on screen");

        // Halfway along the track maps to the middle of the tale.
        let effects = update(&mut app, mouse_click(track.x + track.width / 2, track.y));
        match effects.as_slice() {
            [UiEffect::AudioSeekTo { position }] => {
                assert_eq!(position.as_secs(), 50);
                assert_eq!(app.tui.player.position, *position);
            }
            other => panic!("expected a seek effect, got {other:?}"),
        }
    }

    #[test]
    fn click_off_the_track_does_not_seek() {
        let mut app = app_with_ready_player();
        let effects = update(&mut app, mouse_click(0, 0));
        assert!(effects.is_empty());
    }

    #[test]
    fn click_with_unknown_duration_does_not_seek() {
        let mut app = app_with_ready_player();
        app.tui.player.duration = None;
        let track = crate::render::player_track_area(&app.tui, app.tui.viewport)
            .expect("track should be on screen");
        let effects = update(&mut app, mouse_click(track.x, track.y));
        assert!(effects.is_empty());
    }

    #[test]
    fn resize_updates_the_viewport() {
        let mut app = app();
        update(&mut app, UiEvent::Terminal(Event::Resize(120, 40)));
        assert_eq!(app.tui.viewport, Rect::new(0, 0, 120, 40));
    }

    #[test]
    fn stale_audio_bytes_are_dropped() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Audio(AudioEvent::Fetched {
                tale_id: "gone".to_string(),
                bytes: vec![1],
            }),
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_task_results_are_dropped() {
        let mut app = app();
        start_task(&mut app, TaskKind::Generate, 2);

        // A completion for an older task id is ignored.
        let effects = update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Generate,
                completed: TaskCompleted {
                    id: TaskId(1),
                    result: Box::new(UiEvent::Generated(Ok(tale("stale")))),
                },
            },
        );
        assert!(effects.is_empty());
        assert!(app.tui.active_tale.is_none());
        assert!(app.tui.is_generating());

        // The active task id lands normally.
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Generate,
                completed: TaskCompleted {
                    id: TaskId(2),
                    result: Box::new(UiEvent::Generated(Ok(tale("fresh")))),
                },
            },
        );
        assert!(!app.tui.is_generating());
        assert_eq!(
            app.tui.active_tale.as_ref().map(|t| t.id.as_str()),
            Some("fresh")
        );
    }
}
