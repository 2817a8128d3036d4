//! Measuring and wrapping text that carries ANSI styling.
//!
//! Styling escapes occupy bytes but no columns. Everything that measures or
//! cuts rendered text goes through here so that escapes never count towards
//! a width and are never split.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Remove all escape sequences.
pub fn strip_styling(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

/// Columns `text` occupies on screen once styling is removed.
pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        strip_styling(text).width()
    } else {
        text.width()
    }
}

/// Word-wrap a single line of styled text to `width` columns.
///
/// Breaks at the last whitespace that keeps the line within `width`; a run
/// without whitespace is hard-wrapped. The whitespace at a break is dropped.
/// Escape sequences are copied whole to whichever line they fall on. A width
/// of zero disables wrapping.
pub fn wrap_styled(line: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(line) <= width {
        return vec![line.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    // Byte offset in `current` of the last whitespace character.
    let mut last_space: Option<usize> = None;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '\x1b' {
            let len = escape_len(rest);
            current.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }
        rest = &rest[c.len_utf8()..];
        let w = c.width().unwrap_or(0);

        if c == ' ' || c == '\t' {
            if current_width + w > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                last_space = None;
                continue;
            }
            last_space = Some(current.len());
            current.push(c);
            current_width += w;
            continue;
        }

        if current_width + w > width {
            match last_space.take() {
                Some(at) => {
                    let carried = current.split_off(at);
                    lines.push(std::mem::replace(&mut current, carried[1..].to_string()));
                    current_width = display_width(&current);
                }
                None => {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
            }
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
        }
        current.push(c);
        current_width += w;
    }

    match lines.last_mut() {
        // Trailing escapes (usually a reset) belong to the last visible line.
        Some(last) if display_width(&current) == 0 => last.push_str(&current),
        _ => lines.push(current),
    }
    lines
}

/// Byte length of the escape sequence at the start of `s`.
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        // CSI: ESC [ params final-byte
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |p| p + 3),
        // OSC: ESC ] ... terminated by BEL or ESC \
        Some(b']') => {
            let mut i = 2;
            while i < bytes.len() {
                if bytes[i] == 0x07 {
                    return i + 1;
                }
                if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                    return i + 2;
                }
                i += 1;
            }
            bytes.len()
        }
        Some(b) if b.is_ascii() => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    #[test]
    fn test_display_width_ignores_styling() {
        assert_eq!(display_width(&format!("{RED}abc{RESET}")), 3);
        assert_eq!(display_width("● [0]"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_short_lines_untouched() {
        assert_eq!(wrap_styled("short line", 20), vec!["short line"]);
        assert_eq!(wrap_styled("anything", 0), vec!["anything"]);
    }

    #[test]
    fn test_wraps_at_whitespace() {
        assert_eq!(
            wrap_styled("alpha beta gamma delta", 11),
            vec!["alpha beta", "gamma delta"]
        );
    }

    #[test]
    fn test_hard_wraps_without_whitespace() {
        assert_eq!(wrap_styled("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_never_splits_escapes() {
        let line = format!("{RED}alpha{RESET} {RED}beta{RESET} {RED}gamma{RESET}");
        let wrapped = wrap_styled(&line, 10);
        assert_eq!(wrapped.len(), 2);
        for piece in &wrapped {
            assert!(display_width(piece) <= 10);
            // every ESC starts a complete sequence
            for (idx, _) in piece.match_indices('\x1b') {
                assert_eq!(escape_len(&piece[idx..]), if piece[idx..].starts_with(RESET) { 4 } else { 5 });
            }
        }
        let rejoined: String = wrapped.iter().map(|p| strip_styling(p)).collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, "alpha beta gamma");
    }

    #[test]
    fn test_escape_len() {
        assert_eq!(escape_len("\x1b[38;5;208mX"), 11);
        assert_eq!(escape_len("\x1b]8;;http://x\x07rest"), 14);
        assert_eq!(escape_len("\x1b"), 1);
    }
}
