//! Sign-in / sign-up overlay.
//!
//! One overlay serves both modes; Tab flips between them and keeps whatever
//! was typed, so switching from sign-in to sign-up does not lose the email
//! or password.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{
    InputHint, LabeledInput, OverlayConfig, render_labeled_input, render_overlay, render_separator,
};
use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Whether the overlay submits to the login or the registration endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthField {
    Name,
    Email,
    Password,
}

/// State for the authentication overlay.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub mode: AuthMode,
    field: AuthField,
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl AuthState {
    pub fn open() -> Self {
        Self {
            mode: AuthMode::Login,
            field: AuthField::Email,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        // The name row only exists in register mode.
        if self.mode == AuthMode::Login && self.field == AuthField::Name {
            self.field = AuthField::Email;
        }
    }

    fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Register => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    fn shift_field(&mut self, delta: isize) {
        let fields = self.fields();
        let len = fields.len() as isize;
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0) as isize;
        self.field = fields[(idx + delta).rem_euclid(len) as usize];
    }

    fn value_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Tab => {
                self.toggle_mode();
                OverlayUpdate::stay()
            }
            KeyCode::Up => {
                self.shift_field(-1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                self.shift_field(1);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if self.email.trim().is_empty() || self.password.is_empty() {
                    self.error = Some("Email and password are required".to_string());
                    return OverlayUpdate::stay();
                }
                if tui.tasks.auth.is_running() {
                    self.error = Some("Already signing in...".to_string());
                    return OverlayUpdate::stay();
                }
                OverlayUpdate::stay().with_effects(vec![UiEffect::Authenticate {
                    mode: self.mode,
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                }])
            }
            KeyCode::Backspace => {
                self.value_mut().pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.value_mut().push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, signing_in: bool) {
        let (title, subtitle) = match self.mode {
            AuthMode::Login => (
                "Welcome Back!",
                "Enter your details to access your magical tales",
            ),
            AuthMode::Register => (
                "Create Account",
                "Join us to create and save your magical tales",
            ),
        };

        let hints = [
            InputHint::new("Enter", "submit"),
            InputHint::new("Tab", "switch mode"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title,
                border_color: Color::Magenta,
                width: 54,
                height: 12,
                hints: &hints,
            },
        );

        let subtitle_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                subtitle,
                Style::default().fg(Color::DarkGray),
            ))),
            subtitle_area,
        );
        render_separator(frame, layout.body, 1);

        let mut y = layout.body.y + 2;
        if self.mode == AuthMode::Register {
            let row = Rect::new(layout.body.x, y, layout.body.width, 1);
            render_labeled_input(
                frame,
                row,
                &LabeledInput {
                    label: "Name",
                    value: &self.name,
                    focused: self.field == AuthField::Name,
                    masked: false,
                },
            );
            y += 1;
        }
        let email_row = Rect::new(layout.body.x, y, layout.body.width, 1);
        render_labeled_input(
            frame,
            email_row,
            &LabeledInput {
                label: "Email",
                value: &self.email,
                focused: self.field == AuthField::Email,
                masked: false,
            },
        );
        let password_row = Rect::new(layout.body.x, y + 1, layout.body.width, 1);
        render_labeled_input(
            frame,
            password_row,
            &LabeledInput {
                label: "Password",
                value: &self.password,
                focused: self.field == AuthField::Password,
                masked: true,
            },
        );

        let status_area = Rect::new(layout.body.x, y + 3, layout.body.width, 1);
        let status = if let Some(error) = &self.error {
            Span::styled(error.as_str(), Style::default().fg(Color::Red))
        } else if signing_in {
            Span::styled("Signing in...", Style::default().fg(Color::Yellow))
        } else {
            let prompt = match self.mode {
                AuthMode::Login => "Need an account? Press Tab to sign up",
                AuthMode::Register => "Already have an account? Press Tab to sign in",
            };
            Span::styled(prompt, Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(Line::from(status)), status_area);
    }
}
