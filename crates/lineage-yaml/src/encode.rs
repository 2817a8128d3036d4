//! Block-style YAML encoding.

use crate::{Document, EncodeError};
use indexmap::IndexMap;

/// Folded lines never get narrower than this, however deep they are nested.
const MIN_FOLD_WIDTH: usize = 20;

/// Serializes a [`Document`] to text.
///
/// The renderers only ever see the text this produces, so any encoder works
/// as long as it writes block-style YAML: one entry per line, nesting
/// expressed purely through indentation.
pub trait DocumentEncoder {
    /// Encode `doc` using `indent_width` spaces per nesting level.
    fn encode(&self, doc: &Document, indent_width: usize) -> Result<String, EncodeError>;
}

/// The default encoder.
///
/// - mappings and sequences in block style, sequences indented under their key
/// - the first entry of a mapping or sequence nested in a sequence shares the
///   `- ` line (`- name: x`, `- - a`)
/// - empty collections as `{}` / `[]`
/// - multi-line strings as literal blocks (`|`, `|-`)
/// - [`Document::Folded`] strings as folded blocks (`>-`)
/// - scalars quoted exactly as `serde_yaml` would quote them
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockEncoder;

impl DocumentEncoder for BlockEncoder {
    fn encode(&self, doc: &Document, indent_width: usize) -> Result<String, EncodeError> {
        let mut emitter = Emitter {
            out: String::new(),
            indent: indent_width.max(1),
            path: Vec::new(),
        };
        emitter.root(doc)?;
        tracing::trace!(lines = emitter.out.lines().count(), "encoded document");
        Ok(emitter.out)
    }
}

struct Emitter {
    out: String,
    indent: usize,
    /// Logical path of the node being written, for error messages.
    path: Vec<String>,
}

impl Emitter {
    fn root(&mut self, doc: &Document) -> Result<(), EncodeError> {
        match doc {
            Document::Mapping(entries) if !entries.is_empty() => self.mapping(entries, 0, false),
            Document::Sequence(items) if !items.is_empty() => self.sequence(items, 0, false),
            scalar => {
                let content_col = self.indent;
                self.scalar(scalar, content_col)?;
                // `scalar` writes the separating space expected after a marker.
                if self.out.starts_with(' ') {
                    self.out.remove(0);
                }
                Ok(())
            }
        }
    }

    /// Write mapping entries at column `col`. With `inline_first` the first
    /// key continues a line already started by a `- ` marker.
    fn mapping(
        &mut self,
        entries: &IndexMap<String, Document>,
        col: usize,
        inline_first: bool,
    ) -> Result<(), EncodeError> {
        for (idx, (key, value)) in entries.iter().enumerate() {
            if idx > 0 || !inline_first {
                self.pad(col);
            }
            self.path.push(key.clone());
            let key_text = self.quote(key)?;
            self.out.push_str(&key_text);
            self.out.push(':');

            match value {
                Document::Mapping(children) if !children.is_empty() => {
                    self.out.push('\n');
                    self.mapping(children, col + self.indent, false)?;
                }
                Document::Sequence(items) if !items.is_empty() => {
                    self.out.push('\n');
                    self.sequence(items, col + self.indent, false)?;
                }
                scalar => self.scalar(scalar, col + self.indent)?,
            }
            self.path.pop();
        }
        Ok(())
    }

    fn sequence(
        &mut self,
        items: &[Document],
        col: usize,
        inline_first: bool,
    ) -> Result<(), EncodeError> {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 || !inline_first {
                self.pad(col);
            }
            self.path.push(format!("[{idx}]"));
            self.out.push('-');

            let item_col = col + crate::syntax::SEQUENCE_MARKER_WIDTH;
            match item {
                Document::Mapping(entries) if !entries.is_empty() => {
                    self.out.push(' ');
                    self.mapping(entries, item_col, true)?;
                }
                Document::Sequence(nested) if !nested.is_empty() => {
                    self.out.push(' ');
                    self.sequence(nested, item_col, true)?;
                }
                scalar => self.scalar(scalar, item_col)?,
            }
            self.path.pop();
        }
        Ok(())
    }

    /// Write a scalar that follows a `key:` or `-` marker, including the
    /// leading space and the trailing newline. Block scalar bodies are
    /// indented to `content_col`.
    fn scalar(&mut self, value: &Document, content_col: usize) -> Result<(), EncodeError> {
        match value {
            Document::Null => self.out.push_str(" null\n"),
            Document::Bool(b) => {
                self.out.push(' ');
                self.out.push_str(if *b { "true" } else { "false" });
                self.out.push('\n');
            }
            Document::Number(n) => {
                self.out.push(' ');
                self.out.push_str(&n.to_string());
                self.out.push('\n');
            }
            Document::String(s) if is_literal_block_safe(s) => self.literal_block(s, content_col),
            Document::Folded { text, width } if is_foldable(text) => {
                let line_width = width.saturating_sub(content_col).max(MIN_FOLD_WIDTH);
                self.out.push_str(" >-\n");
                for line in fold_words(text, line_width) {
                    self.pad(content_col);
                    self.out.push_str(&line);
                    self.out.push('\n');
                }
            }
            Document::String(s) | Document::Folded { text: s, .. } => {
                let quoted = self.quote(s)?;
                self.out.push(' ');
                self.out.push_str(&quoted);
                self.out.push('\n');
            }
            Document::Mapping(_) => self.out.push_str(" {}\n"),
            Document::Sequence(_) => self.out.push_str(" []\n"),
        }
        Ok(())
    }

    fn literal_block(&mut self, text: &str, content_col: usize) {
        let (indicator, body) = match text.strip_suffix('\n') {
            Some(body) => ("|", body),
            None => ("|-", text),
        };
        self.out.push(' ');
        self.out.push_str(indicator);
        self.out.push('\n');
        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(content_col);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// Single-line representation of a string, quoted only when YAML needs it.
    fn quote(&self, s: &str) -> Result<String, EncodeError> {
        let encoded = serde_yaml::to_string(s).map_err(|e| EncodeError::Scalar {
            path: self.current_path(),
            message: e.to_string(),
        })?;
        let encoded = encoded.trim_end_matches('\n');
        if encoded.contains('\n') {
            // JSON strings are valid YAML double-quoted scalars.
            serde_json::to_string(s).map_err(|e| EncodeError::Scalar {
                path: self.current_path(),
                message: e.to_string(),
            })
        } else {
            Ok(encoded.to_string())
        }
    }

    fn pad(&mut self, col: usize) {
        self.out.extend(std::iter::repeat_n(' ', col));
    }

    fn current_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }
}

/// Literal blocks can represent a string exactly when it spans lines, has no
/// indented first line, no carriage returns and at most one trailing newline.
fn is_literal_block_safe(s: &str) -> bool {
    s.contains('\n')
        && !s.starts_with([' ', '\t', '\n'])
        && !s.ends_with("\n\n")
        && !s.chars().any(|c| c == '\r' || (c.is_control() && c != '\n' && c != '\t'))
        && s.split('\n').all(|line| line.trim_end() == line)
}

/// Folding joins lines with single spaces, so only single-spaced text folds
/// back to itself.
fn is_foldable(s: &str) -> bool {
    !s.is_empty()
        && !s.contains('\n')
        && !s.contains("  ")
        && s.trim() == s
        && !s.chars().any(char::is_control)
}

/// Greedy word wrap. A word longer than `width` gets a line of its own.
fn fold_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
