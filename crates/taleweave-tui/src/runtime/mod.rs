//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results arrive through a single "inbox" channel:
//! - Handlers send `UiEvent`s to `inbox_tx` when they finish
//! - The runtime drains `inbox_rx` each frame
//!
//! Structure:
//! - `mod.rs`: Core runtime (event loop, effect dispatch, task spawning)
//! - `handlers.rs`: Async effect handlers (backend I/O)
//! - `audio.rs`: Playback engine wrapper

mod audio;
mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use audio::AudioEngine;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use taleweave_core::api::TaleClient;
use taleweave_core::config::Config;
use taleweave_core::session::{Session, User};
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{AudioEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Target frame rate while something is animating (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle; a longer timeout keeps CPU usage down when
/// nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    /// Backend API client shared with spawned handlers.
    client: TaleClient,
    /// Playback engine, opened lazily on the first narration load.
    audio: Option<AudioEngine>,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - the runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// `tale` is an optional saved-tale id to open directly in the reading
    /// view once the collection has loaded.
    pub fn new(config: Config, tale: Option<String>) -> Result<Self> {
        // Set up the panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();

        let session = Arc::new(Session::load());
        let signed_in = session.is_authenticated();
        let client = TaleClient::new(&config.base_url, session)
            .context("Failed to create backend client")?;

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let size = terminal.size().context("Failed to query terminal size")?;

        let mut state = AppState::new(config);
        // Resize events keep this current; see the reducer.
        state.tui.viewport = ratatui::layout::Rect::new(0, 0, size.width, size.height);
        if signed_in {
            // The persisted token carries no profile; the name is refined
            // only when the user signs in through the form.
            state.tui.user = Some(User {
                name: "User".to_string(),
                email: String::new(),
            });
        }
        if let Some(tale_id) = tale {
            state.tui.deep_link = Some(tale_id);
            // Without a token the collection never loads, so fall back to
            // the form instead of a spinner that cannot resolve.
            state.tui.opened_via_deep_link = signed_in;
        }

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            audio: None,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        if self.state.tui.is_signed_in() {
            self.execute_effect(UiEffect::FetchStories);
        }
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render; terminal events update state
                // but batch renders to the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (terminal, inbox, audio engine).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a spinner is animating, audio is playing, or
        // the user is actively typing; slow polling otherwise.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let audio_active = self.audio.as_ref().is_some_and(AudioEngine::is_loaded);
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || audio_active
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain the inbox - all async results arrive here.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();

            // Sample playback once per tick so the progress bar advances.
            if let Some(engine) = &mut self.audio
                && let Some(audio_event) = engine.poll()
            {
                events.push(UiEvent::Audio(audio_event));
            }
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle. Stale completions are dropped by the reducer when a newer
    /// task of the same kind has started since.
    fn spawn_task<F, Fut>(&mut self, kind: TaskKind, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let id = self.state.tui.task_seq.next_id();
        let tx = self.inbox_tx.clone();
        let started = TaskStarted { id, cancel: None };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Backend effects
            UiEffect::Generate { request } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Generate, move || {
                    handlers::generate(client, request)
                });
            }
            UiEffect::Authenticate {
                mode,
                name,
                email,
                password,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Auth, move || {
                    handlers::authenticate(client, mode, name, email, password)
                });
            }
            UiEffect::FetchStories => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::StoriesFetch, move || {
                    handlers::fetch_stories(client)
                });
            }
            UiEffect::ToggleSave { tale } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SaveToggle, move || {
                    handlers::toggle_save(client, tale)
                });
            }
            UiEffect::Logout => {
                if let Err(error) = self.client.session().clear_token() {
                    tracing::warn!(%error, "failed to clear persisted token");
                }
            }

            // Audio effects
            UiEffect::FetchAudio { tale } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::AudioFetch, move || {
                    handlers::fetch_audio(client, tale)
                });
            }
            UiEffect::LoadAudio { tale_id, bytes } => {
                let event = self.load_audio(tale_id, bytes);
                self.dispatch_event(UiEvent::Audio(event));
            }
            UiEffect::AudioToggle => {
                if let Some(engine) = &self.audio {
                    engine.toggle();
                }
            }
            UiEffect::AudioSeekBy { seconds } => {
                if let Some(engine) = &self.audio {
                    engine.seek_by(seconds);
                }
            }
            UiEffect::AudioSeekTo { position } => {
                if let Some(engine) = &self.audio {
                    engine.seek_to(position);
                }
            }
            UiEffect::AudioStop => {
                if let Some(engine) = &mut self.audio {
                    engine.stop();
                }
            }
        }
    }

    /// Loads downloaded narration into the engine, opening the output
    /// device on first use.
    fn load_audio(&mut self, tale_id: String, bytes: Vec<u8>) -> AudioEvent {
        let engine = match &mut self.audio {
            Some(engine) => engine,
            None => match AudioEngine::new() {
                Ok(engine) => self.audio.insert(engine),
                Err(error) => {
                    tracing::error!(%error, "audio output unavailable");
                    return AudioEvent::LoadFailed {
                        tale_id,
                        error: format!("{error:#}"),
                    };
                }
            },
        };

        match engine.load(bytes) {
            Ok(duration) => AudioEvent::Loaded { tale_id, duration },
            Err(error) => {
                tracing::error!(%error, "failed to load narration");
                AudioEvent::LoadFailed {
                    tale_id,
                    error: format!("{error:#}"),
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
