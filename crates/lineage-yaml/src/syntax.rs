//! Line-level YAML grammar.
//!
//! Block-style YAML can be read one line at a time if you only need to know
//! what kind of line you are looking at: a mapping entry, a sequence entry, a
//! comment, or the body of a block scalar. These helpers answer exactly that
//! and nothing more. They are shared by the highlighter and by the path
//! reconstructor, which must agree on where a key ends and its value begins.

use std::borrow::Cow;

/// Width of the `- ` marker that introduces a sequence entry.
pub const SEQUENCE_MARKER_WIDTH: usize = 2;

/// A `key: value` mapping entry found on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// The key with any quoting removed.
    pub key: Cow<'a, str>,
    /// The key exactly as written, quotes included.
    pub raw_key: &'a str,
    /// Everything after the `:` separator, trimmed.
    pub value: &'a str,
}

/// Number of leading spaces.
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

pub fn is_comment(content: &str) -> bool {
    content.starts_with('#')
}

/// Strip one `- ` sequence marker from the start of `content`.
///
/// Returns the remainder and the column offset of that remainder relative to
/// the dash. A bare `-` (an entry whose content starts on the next line)
/// yields an empty remainder.
pub fn strip_sequence_marker(content: &str) -> Option<(&str, usize)> {
    if content == "-" {
        return Some(("", SEQUENCE_MARKER_WIDTH));
    }
    let rest = content.strip_prefix("- ")?;
    let trimmed = rest.trim_start_matches(' ');
    Some((trimmed, content.len() - trimmed.len()))
}

/// Block scalar header: `|` or `>` followed by chomping and indentation
/// indicators (`|-`, `>+`, `|2-`, ...).
pub fn is_block_indicator(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c == '-' || c == '+' || c.is_ascii_digit())
}

/// True when the value of an entry continues on the following lines.
pub fn opens_nested(value: &str) -> bool {
    value.is_empty() || value == "{}" || value == "[]" || is_block_indicator(value)
}

/// Drop a trailing ` # comment` from an entry value.
///
/// Quoted scalars are returned untouched; a `#` inside the quotes is text.
pub fn strip_trailing_comment(value: &str) -> &str {
    if value.starts_with('#') {
        return "";
    }
    if value.starts_with('"') || value.starts_with('\'') {
        return value;
    }
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

/// Split a line's content (indentation already removed) into a mapping entry.
///
/// The separator is the first `:` followed by a space or the end of the line.
/// Flow collections (`{...}`, `[...]`) and comments are never entries, and a
/// quoted key may contain anything, including `:`.
pub fn split_entry(content: &str) -> Option<Entry<'_>> {
    let first = content.chars().next()?;
    match first {
        '"' | '\'' => {
            let close = closing_quote(content, first)?;
            let rest = content[close + 1..].strip_prefix(':')?;
            if !(rest.is_empty() || rest.starts_with(' ')) {
                return None;
            }
            let raw_key = &content[..=close];
            Some(Entry {
                key: unquote(raw_key, first),
                raw_key,
                value: rest.trim(),
            })
        }
        '{' | '[' | '#' => None,
        _ => {
            let bytes = content.as_bytes();
            for (i, &b) in bytes.iter().enumerate() {
                match b {
                    b':' if i + 1 == bytes.len() || bytes[i + 1] == b' ' => {
                        let raw_key = content[..i].trim_end();
                        if raw_key.is_empty() {
                            return None;
                        }
                        return Some(Entry {
                            key: Cow::Borrowed(raw_key),
                            raw_key,
                            value: content[i + 1..].trim(),
                        });
                    }
                    b' ' if bytes.get(i + 1) == Some(&b'#') => return None,
                    _ => {}
                }
            }
            None
        }
    }
}

/// Byte index of the quote closing the scalar that starts at index 0.
fn closing_quote(content: &str, quote: char) -> Option<usize> {
    let bytes = content.as_bytes();
    let q = quote as u8;
    let mut i = 1;
    while i < bytes.len() {
        let b = bytes[i];
        if quote == '"' && b == b'\\' {
            i += 2;
            continue;
        }
        if b == q {
            if quote == '\'' && bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

fn unquote(raw: &str, quote: char) -> Cow<'_, str> {
    let inner = &raw[1..raw.len() - 1];
    if quote == '\'' {
        if inner.contains("''") {
            Cow::Owned(inner.replace("''", "'"))
        } else {
            Cow::Borrowed(inner)
        }
    } else if inner.contains('\\') {
        // YAML double-quoted escapes are a superset of JSON's; fall back to
        // the raw text for the YAML-only ones.
        serde_json::from_str::<String>(raw)
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(inner))
    } else {
        Cow::Borrowed(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("    - a"), 4);
        assert_eq!(indent_of("key: v"), 0);
        assert_eq!(indent_of(""), 0);
    }

    #[test]
    fn test_split_plain_entry() {
        let entry = split_entry("name: widget").unwrap();
        assert_eq!(entry.key, "name");
        assert_eq!(entry.value, "widget");

        let entry = split_entry("vars:").unwrap();
        assert_eq!(entry.key, "vars");
        assert_eq!(entry.value, "");
    }

    #[test]
    fn test_colon_without_space_is_not_a_separator() {
        assert_eq!(split_entry("http://example.com"), None);
        assert_eq!(split_entry("10:30"), None);
        let entry = split_entry("url: http://example.com").unwrap();
        assert_eq!(entry.key, "url");
        assert_eq!(entry.value, "http://example.com");
    }

    #[test]
    fn test_quoted_keys() {
        let entry = split_entry("\"a: b\": 1").unwrap();
        assert_eq!(entry.key, "a: b");
        assert_eq!(entry.raw_key, "\"a: b\"");
        assert_eq!(entry.value, "1");

        let entry = split_entry("'it''s': yes").unwrap();
        assert_eq!(entry.key, "it's");

        // A quoted scalar that is not followed by a separator is a value.
        assert_eq!(split_entry("'a: b'"), None);
    }

    #[test]
    fn test_flow_and_comments_are_not_entries() {
        assert_eq!(split_entry("{a: 1}"), None);
        assert_eq!(split_entry("[a, b]"), None);
        assert_eq!(split_entry("# note: x"), None);
        assert_eq!(split_entry("value #: not a key"), None);
    }

    #[test]
    fn test_strip_trailing_comment() {
        assert_eq!(strip_trailing_comment("# note"), "");
        assert_eq!(strip_trailing_comment("1 # one"), "1");
        assert_eq!(strip_trailing_comment("|- # body"), "|-");
        assert_eq!(strip_trailing_comment("a#b"), "a#b");
        assert_eq!(strip_trailing_comment("'x # y'"), "'x # y'");

        // The entry itself keeps the comment so the highlighter can print it.
        let entry = split_entry("vars: # shared").unwrap();
        assert_eq!(entry.value, "# shared");
        assert!(opens_nested(strip_trailing_comment(entry.value)));
    }

    #[test]
    fn test_strip_sequence_marker() {
        assert_eq!(strip_sequence_marker("- a"), Some(("a", 2)));
        assert_eq!(strip_sequence_marker("- - a"), Some(("- a", 2)));
        assert_eq!(strip_sequence_marker("-"), Some(("", 2)));
        assert_eq!(strip_sequence_marker("-1"), None);
        assert_eq!(strip_sequence_marker("key: v"), None);
    }

    #[test]
    fn test_block_indicators() {
        for indicator in ["|", "|-", ">", ">-", "|+", "|2-"] {
            assert!(is_block_indicator(indicator), "{indicator}");
        }
        assert!(!is_block_indicator(">x"));
        assert!(!is_block_indicator(""));
        assert!(opens_nested(""));
        assert!(opens_nested("{}"));
        assert!(opens_nested("[]"));
        assert!(!opens_nested("value"));
    }
}
