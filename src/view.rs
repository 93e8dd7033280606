//! Layout helpers for the terminal front end. Everything here is pure so the
//! screen maths can be tested without a terminal.

/// Hard-wraps `text` at `width` columns, honouring newlines, and returns the
/// wrapped lines plus the (row, column) of the char index `cursor`.
pub fn wrap(text: &str, width: usize, cursor: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut lines = vec![String::new()];
    let mut col = 0;
    let mut cursor_pos = None;

    for (i, c) in text.chars().enumerate() {
        if c != '\n' && col == width {
            lines.push(String::new());
            col = 0;
        }
        if i == cursor {
            cursor_pos = Some((lines.len() - 1, col));
        }
        if c == '\n' {
            lines.push(String::new());
            col = 0;
        } else if let Some(line) = lines.last_mut() {
            line.push(c);
            col += 1;
        }
    }

    let cursor_pos = cursor_pos.unwrap_or_else(|| {
        if col == width {
            lines.push(String::new());
            (lines.len() - 1, 0)
        } else {
            (lines.len() - 1, col)
        }
    });

    (lines, cursor_pos)
}

/// Cuts `text` to `width` characters, ending in `…` when something was dropped.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// A `[====    ]` bar `width` columns wide, brackets included.
pub fn progress_bar(percent: usize, width: usize) -> String {
    let inner = width.saturating_sub(2);
    let filled = inner * percent.min(100) / 100;
    format!("[{}{}]", "=".repeat(filled), " ".repeat(inner - filled))
}

pub fn streak_label(streak: u32) -> Option<String> {
    match streak {
        0 => None,
        1 => Some("1 day streak".to_string()),
        n => Some(format!("{} day streak", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_long_lines_and_newlines() {
        let (lines, cursor) = wrap("abcdef\ngh", 4, 9);
        assert_eq!(lines, vec!["abcd", "ef", "gh"]);
        assert_eq!(cursor, (2, 2));
    }

    #[test]
    fn wrap_tracks_cursor_inside_text() {
        let (_, cursor) = wrap("abcdef", 4, 5);
        assert_eq!(cursor, (1, 1));
        let (_, cursor) = wrap("ab\ncd", 10, 3);
        assert_eq!(cursor, (1, 0));
    }

    #[test]
    fn cursor_at_full_line_end_moves_down() {
        let (lines, cursor) = wrap("abcd", 4, 4);
        assert_eq!(lines, vec!["abcd", ""]);
        assert_eq!(cursor, (1, 0));
    }

    #[test]
    fn empty_text_has_one_line() {
        let (lines, cursor) = wrap("", 10, 0);
        assert_eq!(lines, vec![""]);
        assert_eq!(cursor, (0, 0));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Mär. 2024", 20), "Mär. 2024");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(50, 12), "[=====     ]");
        assert_eq!(progress_bar(150, 6), "[====]");
        assert_eq!(progress_bar(0, 2), "[]");
    }

    #[test]
    fn streak_label_pluralises() {
        assert_eq!(streak_label(0), None);
        assert_eq!(streak_label(1).as_deref(), Some("1 day streak"));
        assert_eq!(streak_label(12).as_deref(), Some("12 day streak"));
    }
}
