//! Text measurement and word wrapping for the builtin Helvetica faces.
//!
//! The document uses only the PDF base-14 Helvetica family, so no font
//! files are parsed; widths come from an average-advance heuristic that is
//! accurate enough for wrapping proportional text (≈0.5 × size per glyph,
//! bold ≈10 % wider).

use crate::theme::LINE_FACTOR;

/// Approximate rendered width of `text` at `size` points.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let avg = if bold { 0.55 } else { 0.5 };
    text.chars().count() as f32 * size * avg
}

/// Line height in points for the given font size.
pub fn line_height(size: f32) -> f32 {
    size * LINE_FACTOR
}

/// Word-wrap `text` to fit within `max_width` points. Returns at least one
/// line; existing newlines start new lines.
pub fn wrap(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in &words {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate, size, bold) > max_width && !current.is_empty() {
                lines.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_text_width() {
        let w = text_width("Hello", 16.0, false);
        // 5 chars × 16 × 0.5 = 40
        assert!((w - 40.0).abs() < 0.1);
    }

    #[test]
    fn bold_is_wider() {
        assert!(text_width("Hello", 16.0, true) > text_width("Hello", 16.0, false));
    }

    #[test]
    fn word_wrap_basic() {
        let lines = wrap("Hello world foo bar", 16.0, false, 60.0);
        assert!(lines.len() >= 2, "Expected wrapping, got {:?}", lines);
    }

    #[test]
    fn wrap_never_returns_empty() {
        assert_eq!(wrap("", 11.0, false, 100.0), vec![String::new()]);
    }
}
