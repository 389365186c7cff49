//! The reading view: cleaned title, story body, save state and narration.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taleweave_core::text;

use crate::features::player;
use crate::state::TuiState;

/// Renders the active tale inside `area`. Does nothing if no tale is open.
pub fn render(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let Some(tale) = &tui.active_tale else {
        return;
    };
    let cleaned = text::clean_text(&tale.text);

    let saved = tui.active_tale_is_saved();
    let save_label = if saved { " Saved " } else { " s Save Tale " };
    let save_color = if saved { Color::Green } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" {} ", cleaned.title))
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(
            Line::from(Span::styled(save_label, Style::default().fg(save_color)))
                .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve the last inner row for the narration bar when there is audio.
    let has_audio = tale.audio_url.is_some();
    let body_height = if has_audio {
        inner.height.saturating_sub(1)
    } else {
        inner.height
    };
    let body = Rect::new(inner.x, inner.y, inner.width, body_height);

    let lines: Vec<Line> = cleaned
        .story
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((tui.story_scroll, 0));
    frame.render_widget(paragraph, body);

    if has_audio && inner.height > 0 {
        let bar = Rect::new(inner.x, inner.y + body_height, inner.width, 1);
        player::render(&tui.player, frame, bar);
    }
}
