//! Story form state: the draft plus focus and collapse handling.

use taleweave_core::draft::{
    AgeGroup, CulturalFit, Language, ScientificTopic, StoryLength, TaleDraft,
};

/// Focusable rows of the story form.
///
/// `ScientificTopic` and `CustomTopic` only exist while the scientific
/// toggle (and the custom topic choice) make them meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Age,
    Topic,
    Moral,
    Length,
    Language,
    CulturalFit,
    ScientificNote,
    ScientificTopic,
    CustomTopic,
    WithAudio,
    Submit,
}

/// Form state: the draft being edited plus UI concerns.
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: TaleDraft,
    pub field: FormField,
    /// True while a text field captures raw character input.
    pub editing: bool,
    /// Collapsed to a single row after a story is generated.
    pub collapsed: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            draft: TaleDraft::default(),
            field: FormField::Age,
            editing: false,
            collapsed: false,
        }
    }
}

impl FormState {
    pub fn with_language(language: Option<Language>) -> Self {
        let mut form = Self::default();
        if let Some(language) = language {
            form.draft.language = language;
        }
        form
    }

    /// Currently visible fields, in navigation order.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Age,
            FormField::Topic,
            FormField::Moral,
            FormField::Length,
            FormField::Language,
            FormField::CulturalFit,
            FormField::ScientificNote,
        ];
        if self.draft.scientific_note {
            fields.push(FormField::ScientificTopic);
            if self.draft.scientific_topic == ScientificTopic::Custom {
                fields.push(FormField::CustomTopic);
            }
        }
        fields.push(FormField::WithAudio);
        fields.push(FormField::Submit);
        fields
    }

    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, delta: isize) {
        let fields = self.visible_fields();
        let len = fields.len() as isize;
        let current = fields
            .iter()
            .position(|f| *f == self.field)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.field = fields[next];
    }

    /// Keeps focus on a visible field after a toggle hides the current one.
    pub fn clamp_focus(&mut self) {
        if !self.visible_fields().contains(&self.field) {
            self.field = FormField::ScientificNote;
        }
    }

    /// Cycles the value of the focused field, `forward` for right/space.
    pub fn cycle_value(&mut self, forward: bool) {
        match self.field {
            FormField::Age => {
                self.draft.age = cycled(&AgeGroup::ALL, self.draft.age, forward);
            }
            FormField::Length => {
                self.draft.length = cycled(&StoryLength::ALL, self.draft.length, forward);
            }
            FormField::Language => {
                self.draft.language = cycled(&Language::ALL, self.draft.language, forward);
            }
            FormField::CulturalFit => {
                self.draft.cultural_fit =
                    cycled(&CulturalFit::ALL, self.draft.cultural_fit, forward);
            }
            FormField::ScientificNote => {
                self.draft.scientific_note = !self.draft.scientific_note;
                self.clamp_focus();
            }
            FormField::ScientificTopic => {
                self.draft.scientific_topic =
                    cycled(&ScientificTopic::ALL, self.draft.scientific_topic, forward);
            }
            FormField::WithAudio => {
                self.draft.with_audio = !self.draft.with_audio;
            }
            FormField::Topic | FormField::Moral | FormField::CustomTopic | FormField::Submit => {}
        }
    }

    /// Whether the focused field is free text.
    pub fn is_text_field(&self) -> bool {
        matches!(
            self.field,
            FormField::Topic | FormField::Moral | FormField::CustomTopic
        )
    }

    pub fn text_value_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Topic => Some(&mut self.draft.topic),
            FormField::Moral => Some(&mut self.draft.moral),
            FormField::CustomTopic => Some(&mut self.draft.custom_scientific_note),
            _ => None,
        }
    }
}

fn cycled<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    let next = if forward { idx + 1 } else { idx - 1 }.rem_euclid(len) as usize;
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_fields_are_skipped() {
        let form = FormState::default();
        let fields = form.visible_fields();
        assert!(!fields.contains(&FormField::ScientificTopic));
        assert!(!fields.contains(&FormField::CustomTopic));
    }

    #[test]
    fn enabling_scientific_note_reveals_topic() {
        let mut form = FormState::default();
        form.field = FormField::ScientificNote;
        form.cycle_value(true);
        assert!(form.draft.scientific_note);
        assert!(form.visible_fields().contains(&FormField::ScientificTopic));

        // Custom topic row appears only for the custom choice.
        form.draft.scientific_topic = ScientificTopic::Custom;
        assert!(form.visible_fields().contains(&FormField::CustomTopic));
    }

    #[test]
    fn disabling_scientific_note_moves_focus_off_hidden_field() {
        let mut form = FormState::default();
        form.draft.scientific_note = true;
        form.draft.scientific_topic = ScientificTopic::Custom;
        form.field = FormField::CustomTopic;

        form.field = FormField::ScientificNote;
        form.cycle_value(true); // toggles off
        assert!(!form.draft.scientific_note);
        assert!(form.visible_fields().contains(&form.field));
    }

    #[test]
    fn toggling_topic_fields_preserves_entered_text() {
        let mut form = FormState::default();
        form.draft.scientific_note = true;
        form.draft.scientific_topic = ScientificTopic::Custom;
        form.draft.custom_scientific_note = "volcanoes".to_string();

        // Hide and re-show the section; the text survives.
        form.draft.scientific_note = false;
        form.draft.scientific_note = true;
        assert_eq!(form.draft.custom_scientific_note, "volcanoes");
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = FormState::default();
        form.field = FormField::Submit;
        form.focus_next();
        assert_eq!(form.field, FormField::Age);
        form.focus_prev();
        assert_eq!(form.field, FormField::Submit);
    }

    #[test]
    fn cycling_language_reaches_kazakh() {
        let mut form = FormState::default();
        form.field = FormField::Language;
        form.cycle_value(true);
        assert_eq!(form.draft.language, Language::Kazakh);
        form.cycle_value(false);
        assert_eq!(form.draft.language, Language::English);
    }
}
