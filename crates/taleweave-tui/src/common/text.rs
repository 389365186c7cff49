//! Small text helpers for rendering.

use unicode_width::UnicodeWidthStr;

/// Truncates the end of a string to fit within `max_width` display columns,
/// appending "..." when truncation happens.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0u8; 4]) as &str);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
    }

    #[test]
    fn wide_chars_count_two_columns() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("ひらがなのはなし", 9), "ひらが...");
    }

    #[test]
    fn tiny_budgets_degrade_to_dots() {
        assert_eq!(truncate_with_ellipsis("hello", 2), "..");
    }
}
