//! Audio bar for the reading view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{PlayerPhase, PlayerState};

/// Columns taken by the play icon to the left of the track.
const ICON_COLS: u16 = 2;
/// Columns reserved right of the track for the time label.
const LABEL_COLS: u16 = 20;

/// The span of the progress track within the bar row.
///
/// Shared with the reducer so a mouse click lands on the same cells the
/// track is drawn in.
pub fn track_area(bar: Rect) -> Rect {
    Rect::new(
        bar.x.saturating_add(ICON_COLS),
        bar.y,
        bar.width.saturating_sub(LABEL_COLS),
        1,
    )
}

/// Renders the one-line narration bar.
pub fn render(player: &PlayerState, frame: &mut Frame, area: Rect) {
    let line = match player.phase {
        PlayerPhase::Idle => Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Magenta)),
            Span::styled(" play narration", Style::default().fg(Color::DarkGray)),
        ]),
        PlayerPhase::Loading => Line::from(Span::styled(
            "Loading narration...",
            Style::default().fg(Color::Yellow),
        )),
        PlayerPhase::Ready => {
            let icon = if player.playing { "▶" } else { "⏸" };
            let bar = progress_bar(player, track_area(area).width as usize);
            Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(Color::Magenta)),
                Span::styled(bar, Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!(" {}", player.progress_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn progress_bar(player: &PlayerState, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let ratio = match player.duration {
        Some(duration) if !duration.is_zero() => {
            (player.position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn unknown_duration_draws_an_empty_bar() {
        let mut player = PlayerState::default();
        player.start_loading("a");
        player.loaded(None);
        player.position = Duration::from_secs(30);
        assert_eq!(progress_bar(&player, 4), "────");
    }

    #[test]
    fn progress_fills_proportionally() {
        let mut player = PlayerState::default();
        player.start_loading("a");
        player.loaded(Some(Duration::from_secs(100)));
        player.position = Duration::from_secs(50);
        assert_eq!(progress_bar(&player, 4), "━━──");
    }
}
