//! Top-level rendering.
//!
//! Pure view of `AppState`: no mutation, no I/O. The runtime calls this
//! once per dirty frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{form, player, story};
use crate::state::{AppState, TuiState};

/// Renders the whole frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let has_banner = app.tui.banner.is_some();
    let [header, main, banner] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(u16::from(has_banner)),
    ])
    .areas(area);

    render_header(&app.tui, frame, header);
    render_main(&app.tui, frame, main);
    if let Some(message) = &app.tui.banner {
        render_banner(message, frame, banner);
    }

    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, &app.tui);
    }
}

/// On-screen span of the narration progress track, when it is drawn.
///
/// Mirrors the layout in [`render`]; the reducer uses it to map a mouse
/// click to a playback position.
pub fn player_track_area(tui: &TuiState, frame_area: Rect) -> Option<Rect> {
    let tale = tui.active_tale.as_ref()?;
    tale.audio_url.as_ref()?;
    if !(tui.form.collapsed || tui.opened_via_deep_link) {
        return None;
    }

    let has_banner = tui.banner.is_some();
    let [_, main, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(u16::from(has_banner)),
    ])
    .areas(frame_area);

    let show_bar = !tui.opened_via_deep_link;
    let [story_area, _] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::from(show_bar)),
    ])
    .areas(main);

    // The story block draws a border on every side.
    let inner = story_area.inner(Margin::new(1, 1));
    if inner.height == 0 {
        return None;
    }
    let bar = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    Some(player::track_area(bar))
}

fn render_header(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        "Taleweave",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    match &tui.user {
        Some(user) => {
            spans.push(Span::styled(
                format!("  {}", user.name),
                Style::default().fg(Color::Green),
            ));
            spans.push(hint_span("  m", " my tales"));
            spans.push(hint_span("  o", " sign out"));
        }
        None => {
            spans.push(hint_span("  a", " sign in"));
        }
    }
    spans.push(hint_span("  q", " quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint_span(key: &str, action: &str) -> Span<'static> {
    Span::styled(
        format!("{key}{action}"),
        Style::default().fg(Color::DarkGray),
    )
}

fn render_main(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let reading = tui.active_tale.is_some() && (tui.form.collapsed || tui.opened_via_deep_link);

    if reading {
        let show_bar = !tui.opened_via_deep_link;
        let [story_area, bar] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(u16::from(show_bar)),
        ])
        .areas(area);
        story::render(tui, frame, story_area);
        if show_bar {
            form::render::render_collapsed(frame, bar);
        }
        return;
    }

    if tui.opened_via_deep_link {
        // Deep link still resolving; the collection has not loaded yet.
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Loading your tale...",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    form::render::render(
        &tui.form,
        tui.is_generating(),
        tui.spinner_frame,
        frame,
        area,
    );
}

fn render_banner(message: &str, frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::White).bg(Color::Red),
        ))),
        area,
    );
}
