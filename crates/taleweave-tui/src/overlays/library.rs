//! Saved-tales collection overlay.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use taleweave_core::library::SavedTales;
use taleweave_core::text;

use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::{OverlayAction, OverlayUpdate};
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// State for the saved-tales overlay.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub selected: usize,
    /// Tale id pending delete confirmation.
    pub confirm_delete: Option<String>,
}

impl LibraryState {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let count = tui.library.len();

        // Delete confirmation captures input until answered.
        if let Some(tale_id) = self.confirm_delete.clone() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_delete = None;
                    match tui.library.get(&tale_id) {
                        Some(tale) => OverlayUpdate::stay().with_effects(vec![
                            UiEffect::ToggleSave { tale: tale.clone() },
                        ]),
                        None => OverlayUpdate::stay(),
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_delete = None;
                    OverlayUpdate::stay()
                }
                _ => OverlayUpdate::stay(),
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match tui.library.tales().get(self.selected) {
                Some(tale) => OverlayUpdate::close().with_action(OverlayAction::ReadTale {
                    tale_id: tale.id.clone(),
                }),
                None => OverlayUpdate::stay(),
            },
            KeyCode::Char('d') => {
                if let Some(tale) = tui.library.tales().get(self.selected) {
                    self.confirm_delete = Some(tale.id.clone());
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, library: &SavedTales) {
        let hints = [
            InputHint::new("Enter", "read"),
            InputHint::new("d", "delete"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Your Magical Collection",
                border_color: Color::Magenta,
                width: 70,
                height: 20,
                hints: &hints,
            },
        );

        if library.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No Tales Saved Yet",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Your magical tales will appear here once you save them",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
                layout.body,
            );
            return;
        }

        let rows_per_item = 2usize;
        let visible = (layout.body.height as usize / rows_per_item).max(1);
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let mut y = layout.body.y;
        for (idx, tale) in library.tales().iter().enumerate().skip(first).take(visible) {
            let selected = idx == self.selected;
            let cleaned = text::clean_text(&tale.text);
            let date = tale.date.with_timezone(&Local).format("%B %-d, %Y");

            let marker = if selected { "> " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut title_line = vec![
                Span::styled(marker, Style::default().fg(Color::Magenta)),
                Span::styled(
                    truncate_with_ellipsis(&cleaned.title, layout.body.width as usize / 2),
                    title_style,
                ),
                Span::styled(format!("  {date}"), Style::default().fg(Color::DarkGray)),
            ];
            if selected && self.confirm_delete.is_some() {
                title_line.push(Span::styled(
                    "  delete? (y/n)",
                    Style::default().fg(Color::Red),
                ));
            }
            frame.render_widget(
                Paragraph::new(Line::from(title_line)),
                Rect::new(layout.body.x, y, layout.body.width, 1),
            );

            let preview = text::preview(&tale.text, layout.body.width.saturating_sub(4) as usize);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {preview}"),
                    Style::default().fg(Color::DarkGray),
                ))),
                Rect::new(layout.body.x, y + 1, layout.body.width, 1),
            );
            y += rows_per_item as u16;
        }
    }
}
