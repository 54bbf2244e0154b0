//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//! Character widths come from `unicode-width`: ASCII is 1 cell, CJK and most
//! emoji are 2, zero-width and control characters are 0.

use unicode_width::UnicodeWidthChar;

fn char_width(c: char) -> u16 {
    UnicodeWidthChar::width(c).unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
///
/// For multi-line strings this is the width of the widest line.
pub fn string_width(s: &str) -> u16 {
    s.split('\n')
        .map(|line| line.chars().fold(0u16, |acc, c| acc.saturating_add(char_width(c))))
        .max()
        .unwrap_or(0)
}

/// Measure the height of text when wrapped to a given width.
///
/// Returns the number of lines (minimum 1 for non-empty text, 0 for empty).
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    if available_width == 0 {
        return 1;
    }

    let mut lines = 1u16;
    let mut current_line_width = 0u16;

    for c in text.chars() {
        if c == '\n' {
            lines = lines.saturating_add(1);
            current_line_width = 0;
            continue;
        }

        let w = char_width(c);
        if current_line_width + w > available_width && current_line_width > 0 {
            lines = lines.saturating_add(1);
            current_line_width = 0;
        }
        current_line_width += w;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("[ Home ]"), 8);
    }

    #[test]
    fn test_string_width_wide_chars() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width("a日"), 3);
    }

    #[test]
    fn test_string_width_multiline_takes_widest() {
        assert_eq!(string_width("ab\nabcd\na"), 4);
    }

    #[test]
    fn test_measure_text_height() {
        assert_eq!(measure_text_height("hello", 10), 1);
        assert_eq!(measure_text_height("hello world", 5), 3); // hello, " worl", d
        assert_eq!(measure_text_height("", 10), 0);
        assert_eq!(measure_text_height("a\nb\nc", 10), 3);
    }
}
