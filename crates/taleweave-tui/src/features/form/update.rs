//! Key handling for the story form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{FormField, FormState};

/// What a key press did to the form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// The form consumed the key.
    Handled,
    /// The user asked to generate a story.
    Submit,
    /// The key is not a form key.
    Ignored,
}

/// Handles a key press for the expanded form.
///
/// Text fields capture raw characters while `editing`; Enter or Esc leaves
/// edit mode. Outside edit mode, arrows navigate and cycle values, Enter
/// starts editing a text field, cycles a select, or submits on the
/// generate row.
pub fn handle_key(form: &mut FormState, key: KeyEvent) -> FormOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if form.editing {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                form.editing = false;
                FormOutcome::Handled
            }
            KeyCode::Backspace => {
                if let Some(value) = form.text_value_mut() {
                    value.pop();
                }
                FormOutcome::Handled
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(value) = form.text_value_mut() {
                    value.push(c);
                }
                FormOutcome::Handled
            }
            _ => FormOutcome::Handled,
        }
    } else {
        match key.code {
            KeyCode::Up => {
                form.focus_prev();
                FormOutcome::Handled
            }
            KeyCode::Down => {
                form.focus_next();
                FormOutcome::Handled
            }
            KeyCode::Left => {
                form.cycle_value(false);
                FormOutcome::Handled
            }
            KeyCode::Right => {
                form.cycle_value(true);
                FormOutcome::Handled
            }
            KeyCode::Enter => match form.field {
                FormField::Submit => FormOutcome::Submit,
                _ if form.is_text_field() => {
                    form.editing = true;
                    FormOutcome::Handled
                }
                _ => {
                    form.cycle_value(true);
                    FormOutcome::Handled
                }
            },
            _ => FormOutcome::Ignored,
        }
    }
}
