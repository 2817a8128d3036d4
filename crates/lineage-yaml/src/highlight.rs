/*
 * highlight.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * ANSI syntax highlighting for block-style YAML using crossterm.
 */

use crate::HighlightError;
use crate::syntax::{indent_of, is_block_indicator, is_comment, split_entry, strip_sequence_marker};
use crossterm::style::Stylize;

/// Adds display-only styling to serialized text.
///
/// Implementations must only insert escape sequences: removing them has to
/// give back the input unchanged, because structure is later recovered from
/// the unstyled text.
pub trait Highlighter {
    fn highlight(&self, text: &str) -> Result<String, HighlightError>;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, text: &str) -> Result<String, HighlightError> {
        Ok(text.to_string())
    }
}

/// Line-oriented YAML highlighter.
///
/// Keys are blue, strings green, numbers and booleans yellow, block scalar
/// headers magenta; nulls, empty collections, sequence dashes and comments are
/// dimmed. Bodies of block scalars are styled as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlHighlighter;

impl Highlighter for YamlHighlighter {
    fn highlight(&self, text: &str) -> Result<String, HighlightError> {
        if text.contains('\x1b') {
            return Err(HighlightError::Unrecognized(
                "input already contains escape sequences".into(),
            ));
        }

        let mut out = String::with_capacity(text.len() * 2);
        let mut block_indent: Option<usize> = None;

        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let indent = indent_of(line);
            let content = &line[indent..];

            if let Some(open) = block_indent {
                if content.is_empty() {
                    out.push_str(line);
                    continue;
                }
                if indent > open {
                    out.push_str(&line[..indent]);
                    out.push_str(&content.green().to_string());
                    continue;
                }
                block_indent = None;
            }

            if content.is_empty() {
                out.push_str(line);
                continue;
            }
            if is_comment(content) {
                out.push_str(&line[..indent]);
                out.push_str(&content.dark_grey().to_string());
                continue;
            }

            out.push_str(&line[..indent]);
            let mut col = indent;
            let mut content = content;
            while let Some((rest, offset)) = strip_sequence_marker(content) {
                out.push_str(&"-".dark_grey().to_string());
                out.push_str(&content[1..offset.min(content.len())]);
                col += offset;
                content = rest;
            }

            match split_entry(content) {
                Some(entry) => {
                    let after_key = &content[entry.raw_key.len()..];
                    let body = after_key.trim_end();
                    let separator = &body[..body.len() - entry.value.len()];
                    out.push_str(&entry.raw_key.blue().to_string());
                    out.push_str(separator);
                    out.push_str(&style_value(entry.value));
                    out.push_str(&after_key[body.len()..]);
                    if is_block_indicator(entry.value) {
                        block_indent = Some(col);
                    }
                }
                None => {
                    out.push_str(&style_value(content));
                    if is_block_indicator(content.trim_end()) {
                        block_indent = Some(col.saturating_sub(crate::syntax::SEQUENCE_MARKER_WIDTH));
                    }
                }
            }
        }

        Ok(out)
    }
}

fn style_value(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value {
        "null" | "~" | "{}" | "[]" => value.dark_grey().to_string(),
        "true" | "false" => value.yellow().to_string(),
        _ if is_block_indicator(value) => value.magenta().to_string(),
        _ if looks_numeric(value) => value.yellow().to_string(),
        _ => value.green().to_string(),
    }
}

fn looks_numeric(value: &str) -> bool {
    matches!(value, ".inf" | "-.inf" | ".nan") || value.parse::<f64>().is_ok()
}
