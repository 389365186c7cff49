//! Rendering for the story form.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{FormField, FormState};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the expanded form inside `area`.
pub fn render(form: &FormState, generating: bool, spinner_frame: usize, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Customize Your Fairy Tale ")
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for field in form.visible_fields() {
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        render_field(form, field, generating, spinner_frame, frame, row);
        y += 1;
    }
}

/// Renders the one-line collapsed form bar.
pub fn render_collapsed(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("n", Style::default().fg(Color::Magenta)),
        Span::styled(" Create Another Tale", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_field(
    form: &FormState,
    field: FormField,
    generating: bool,
    spinner_frame: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let focused = form.field == field;
    let draft = &form.draft;

    if field == FormField::Submit {
        let label = if generating {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            format!("{spinner} Creating Your Magical Tale...")
        } else {
            "Generate Fairy Tale".to_string()
        };
        let style = if generating {
            Style::default().fg(Color::Yellow)
        } else if focused {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if focused { "> " } else { "  " };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Magenta)),
                Span::styled(label, style),
            ])),
            area,
        );
        return;
    }

    let (label, value, is_text): (&str, String, bool) = match field {
        FormField::Age => ("Age Group", draft.age.label().to_string(), false),
        FormField::Topic => ("Topic", draft.topic.clone(), true),
        FormField::Moral => ("Moral", draft.moral.clone(), true),
        FormField::Length => ("Length", draft.length.label().to_string(), false),
        FormField::Language => ("Language", draft.language.label().to_string(), false),
        FormField::CulturalFit => ("Cultural Fit", draft.cultural_fit.label().to_string(), false),
        FormField::ScientificNote => (
            "Scientific Enhancement",
            if draft.scientific_note { "on" } else { "off" }.to_string(),
            false,
        ),
        FormField::ScientificTopic => (
            "Scientific Topic",
            draft.scientific_topic.label().to_string(),
            false,
        ),
        FormField::CustomTopic => (
            "Custom Topic",
            draft.custom_scientific_note.clone(),
            true,
        ),
        FormField::WithAudio => (
            "Generate Audio Narration",
            if draft.with_audio { "on" } else { "off" }.to_string(),
            false,
        ),
        FormField::Submit => unreachable!("handled above"),
    };

    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let placeholder = is_text && value.is_empty();
    let shown = if placeholder {
        placeholder_for(field).to_string()
    } else if is_text {
        value
    } else {
        format!("< {value} >")
    };
    let value_style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Magenta)),
        Span::styled(format!("{label}: "), label_style),
        Span::styled(shown, value_style),
    ];
    if focused && form.editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Magenta)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn placeholder_for(field: FormField) -> &'static str {
    match field {
        FormField::Topic => "e.g. Dragons, Friendship, Adventure",
        FormField::Moral => "e.g. Kindness pays off, Honesty is important",
        FormField::CustomTopic => "Describe the scientific concept you'd like to include...",
        _ => "",
    }
}
