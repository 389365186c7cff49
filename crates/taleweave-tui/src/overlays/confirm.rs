//! Confirmation prompt before removing a tale from the collection.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use taleweave_core::tale::Tale;
use taleweave_core::text;

use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::OverlayUpdate;
use crate::common::truncate_with_ellipsis;
use crate::effects::UiEffect;

/// State for the unsave confirmation overlay.
#[derive(Debug, Clone)]
pub struct ConfirmUnsaveState {
    pub tale: Tale,
}

impl ConfirmUnsaveState {
    pub fn open(tale: Tale) -> Self {
        Self { tale }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                OverlayUpdate::close().with_effects(vec![UiEffect::ToggleSave {
                    tale: self.tale.clone(),
                }])
            }
            KeyCode::Char('n') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("y", "remove"), InputHint::new("n", "keep")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Remove from collection?",
                border_color: Color::Red,
                width: 50,
                height: 6,
                hints: &hints,
            },
        );

        let title = text::clean_text(&self.tale.text).title;
        let lines = vec![
            Line::from(Span::styled(
                truncate_with_ellipsis(&title, layout.body.width as usize),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "This tale will be removed from your saved collection.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), layout.body);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tale() -> Tale {
        Tale::generated("A Title\nBody.".to_string(), None)
    }

    #[test]
    fn confirming_emits_toggle_and_closes() {
        let mut state = ConfirmUnsaveState::open(tale());
        let update = state.handle_key(key(KeyCode::Char('y')));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::ToggleSave { .. }]
        ));
        assert!(update.closes());
    }

    #[test]
    fn declining_closes_without_effects() {
        let mut state = ConfirmUnsaveState::open(tale());
        let update = state.handle_key(key(KeyCode::Esc));
        assert!(update.effects.is_empty());
        assert!(update.closes());
    }
}
