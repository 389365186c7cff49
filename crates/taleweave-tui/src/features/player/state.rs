//! Audio player state mirrored from the playback engine.
//!
//! The engine itself lives in the runtime (the output stream is not `Send`);
//! the reducer only tracks what the engine reported so the UI can render
//! play state and progress.

use std::time::Duration;

/// Seek step for left/right keys.
pub const SEEK_STEP_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPhase {
    /// Nothing loaded.
    #[default]
    Idle,
    /// Narration download or decode in progress.
    Loading,
    /// A track is loaded and playing or paused.
    Ready,
}

/// Playback state for the active tale's narration.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    /// Tale whose narration is loaded (or loading).
    pub tale_id: Option<String>,
    pub phase: PlayerPhase,
    pub playing: bool,
    pub position: Duration,
    /// Track length; unknown until the decoder reports one.
    pub duration: Option<Duration>,
}

impl PlayerState {
    pub fn is_for(&self, tale_id: &str) -> bool {
        self.tale_id.as_deref() == Some(tale_id)
    }

    pub fn start_loading(&mut self, tale_id: &str) {
        *self = Self {
            tale_id: Some(tale_id.to_string()),
            phase: PlayerPhase::Loading,
            ..Self::default()
        };
    }

    pub fn loaded(&mut self, duration: Option<Duration>) {
        self.phase = PlayerPhase::Ready;
        self.playing = true;
        self.position = Duration::ZERO;
        self.duration = duration;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Progress display, e.g. "1:05 / 3:30".
    pub fn progress_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(Some(self.position)),
            format_time(self.duration)
        )
    }
}

/// Formats a duration as `m:ss`. An unknown duration renders as "0:00".
pub fn format_time(duration: Option<Duration>) -> String {
    let total = duration.map_or(0, |d| d.as_secs());
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(Some(Duration::from_secs(0))), "0:00");
        assert_eq!(format_time(Some(Duration::from_secs(5))), "0:05");
        assert_eq!(format_time(Some(Duration::from_secs(65))), "1:05");
        assert_eq!(format_time(Some(Duration::from_secs(600))), "10:00");
    }

    #[test]
    fn unknown_duration_renders_as_zero() {
        assert_eq!(format_time(None), "0:00");
    }

    #[test]
    fn loading_resets_previous_track() {
        let mut player = PlayerState::default();
        player.start_loading("a");
        player.loaded(Some(Duration::from_secs(90)));
        player.position = Duration::from_secs(30);

        player.start_loading("b");
        assert!(player.is_for("b"));
        assert_eq!(player.phase, PlayerPhase::Loading);
        assert_eq!(player.position, Duration::ZERO);
        assert_eq!(player.duration, None);
    }

    #[test]
    fn progress_label_pairs_position_and_duration() {
        let mut player = PlayerState::default();
        player.start_loading("a");
        player.loaded(Some(Duration::from_secs(125)));
        player.position = Duration::from_secs(65);
        assert_eq!(player.progress_label(), "1:05 / 2:05");
    }
}
