//! Cleaning of raw generated tale text for display.
//!
//! Generated output can carry model reasoning wrapped in `<think>` tags and
//! trailing chatter after the closing "The End." marker. Cleaning strips
//! both, then splits the remainder into a title line and story body.

use std::sync::LazyLock;

use regex::Regex;

/// Title used when the generated text yields no usable first line.
pub const DEFAULT_TITLE: &str = "Your Magical Tale";

const END_MARKER: &str = "The End.";

static THINK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    // (?is): case-insensitive, dot matches newlines. Non-greedy so multiple
    // think blocks are each removed on their own.
    Regex::new(r"(?is)<think>.*?</think>").unwrap_or_else(|err| {
        unreachable!("invalid think-block pattern: {err}");
    })
});

/// A cleaned tale ready for display: a title plus the story body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTale {
    pub title: String,
    pub story: String,
}

/// Cleans raw generated text into a displayable title and story.
///
/// Steps, in order:
/// 1. Remove every `<think>...</think>` block (case-insensitive, spanning
///    newlines).
/// 2. Truncate after the first occurrence of "The End." (the marker itself
///    is kept).
/// 3. Split into non-empty trimmed lines; the first becomes the title with
///    `*`, `_`, `` ` `` and `"` stripped, the rest join into the story.
///
/// Empty input, or input that cleans down to nothing, yields
/// [`DEFAULT_TITLE`] and an empty story.
pub fn clean_text(raw: &str) -> CleanTale {
    let without_think = THINK_BLOCK.replace_all(raw, "");

    let truncated = match without_think.find(END_MARKER) {
        Some(idx) => &without_think[..idx + END_MARKER.len()],
        None => &without_think,
    };

    let lines: Vec<&str> = truncated
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return CleanTale {
            title: DEFAULT_TITLE.to_string(),
            story: String::new(),
        };
    };

    let title: String = first
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '"'))
        .collect();
    let title = title.trim().to_string();

    CleanTale {
        title: if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        },
        story: rest.join("\n"),
    }
}

/// First line of the cleaned story, shortened for list views.
pub fn preview(raw: &str, max_chars: usize) -> String {
    let cleaned = clean_text(raw);
    let source = if cleaned.story.is_empty() {
        cleaned.title
    } else {
        cleaned.story
    };
    let first_line = source.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max_chars {
        return first_line.to_string();
    }
    let shortened: String = first_line.chars().take(max_chars).collect();
    format!("{}...", shortened.trim_end())
}
