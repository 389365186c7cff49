//! Shared rendering helpers for overlays.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_with_ellipsis;

/// Centers an overlay within the frame area.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Overlay container configuration.
pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Layout rectangles for an overlay body and footer.
pub struct OverlayLayout {
    pub body: Rect,
    pub footer: Rect,
}

/// Clears the background, draws the bordered container and hint footer, and
/// returns the inner layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.border_color))
        .title(format!(" {} ", config.title))
        .title_style(
            Style::default()
                .fg(config.border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body_height = inner.height.saturating_sub(footer_height);
    OverlayLayout {
        body: Rect::new(inner.x, inner.y, inner.width, body_height),
        footer: Rect::new(inner.x, inner.y + body_height, inner.width, footer_height),
    }
}

/// A key/action pair for the hint footer.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// A labeled single-line input: "Label: value█".
pub struct LabeledInput<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    pub masked: bool,
}

/// Renders a labeled input line with a block cursor when focused.
pub fn render_labeled_input(frame: &mut Frame, area: Rect, input: &LabeledInput<'_>) {
    let label_color = if input.focused {
        Color::Magenta
    } else {
        Color::DarkGray
    };
    let value: String = if input.masked {
        "*".repeat(input.value.chars().count())
    } else {
        input.value.to_string()
    };
    let max_value_width = (area.width as usize).saturating_sub(input.label.len() + 3);
    let value = truncate_with_ellipsis(&value, max_value_width);

    let mut spans = vec![
        Span::styled(format!("{}: ", input.label), Style::default().fg(label_color)),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if input.focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a dim horizontal separator inside the body.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        separator_area,
    );
}
