//! Path reconstruction for rendered YAML.
//!
//! Once a document has been serialized (and possibly highlighted) the only
//! thing left is text. To annotate that text with provenance we walk it once,
//! top to bottom, and recover the JSONPath-style address of every line from
//! indentation alone:
//!
//! ```text
//! vars:                 vars
//!   tags:               vars.tags
//!     - name: a         vars.tags[0].name
//!       team: x         vars.tags[0].team
//!     - b               vars.tags[1]
//! ```
//!
//! The walk keeps a stack of open containers. Every frame remembers the
//! column its children must exceed and, for sequences, how many entries it
//! has seen so far. The bottom frame is the document root; it is never popped
//! and counts the entries of a top-level sequence.
//!
//! Compact sequences, whose dashes sit at the same column as their parent
//! key (`items:\n- a`), are accepted as well.

use lineage_yaml::syntax::{
    indent_of, is_block_indicator, is_comment, opens_nested, split_entry, strip_sequence_marker,
    strip_trailing_comment,
};

use crate::styled::strip_styling;

/// The address recovered for one rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAddress {
    pub path: String,
    /// The line introduces a mapping key or a sequence entry.
    pub is_key_line: bool,
    /// The line continues the value addressed by an earlier line (block
    /// scalar body, wrapped plain scalar).
    pub is_continuation: bool,
}

impl LineAddress {
    fn key(path: String) -> Self {
        LineAddress {
            path,
            is_key_line: true,
            is_continuation: false,
        }
    }

    fn continuation(path: String) -> Self {
        LineAddress {
            path,
            is_key_line: false,
            is_continuation: true,
        }
    }
}

/// Addresses for every line of a rendered document, indexed by line number.
///
/// Blank lines, comments, and lines that belong to no value have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    lines: Vec<Option<LineAddress>>,
}

impl PathMap {
    pub fn get(&self, line: usize) -> Option<&LineAddress> {
        self.lines.get(line).and_then(Option::as_ref)
    }

    /// Number of lines the map was built from.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Addressed lines with their line numbers.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LineAddress)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, addr)| addr.as_ref().map(|a| (idx, a)))
    }
}

/// Reconstruct the path of every line of a block-style YAML rendering.
///
/// Styling escapes are ignored. Identical input always yields an identical
/// map.
pub fn build_path_map<S: AsRef<str>>(lines: &[S]) -> PathMap {
    let mut walker = Walker::new();
    let lines: Vec<Option<LineAddress>> = lines
        .iter()
        .map(|line| walker.line(line.as_ref()))
        .collect();

    tracing::trace!(
        lines = lines.len(),
        addressed = lines.iter().filter(|l| l.is_some()).count(),
        "reconstructed line paths"
    );
    PathMap { lines }
}

#[derive(Debug)]
struct Frame {
    path: String,
    indent: usize,
    /// Entries seen so far when this frame is a sequence.
    next_index: usize,
    /// Column of this frame's `- ` markers once it has seen one.
    dash_indent: Option<usize>,
    /// Opened by a key with an empty value, so a sequence may follow at the
    /// key's own column.
    accepts_compact: bool,
}

impl Frame {
    fn new(path: String, indent: usize) -> Self {
        Frame {
            path,
            indent,
            next_index: 0,
            dash_indent: None,
            accepts_compact: false,
        }
    }
}

#[derive(Debug)]
struct BlockScalar {
    indent: usize,
    path: String,
}

struct Walker {
    frames: Vec<Frame>,
    block: Option<BlockScalar>,
    last_path: Option<String>,
}

impl Walker {
    fn new() -> Self {
        Walker {
            frames: vec![Frame::new(String::new(), 0)],
            block: None,
            last_path: None,
        }
    }

    fn line(&mut self, raw: &str) -> Option<LineAddress> {
        let plain = strip_styling(raw);
        let indent = indent_of(&plain);
        let content = plain[indent..].trim_end();
        if content.is_empty() {
            return None;
        }

        if let Some(block) = &self.block {
            if indent > block.indent {
                return Some(LineAddress::continuation(block.path.clone()));
            }
            self.block = None;
        }
        if is_comment(content) {
            return None;
        }

        if let Some((rest, offset)) = strip_sequence_marker(content) {
            self.pop_to(indent, true);
            return Some(self.sequence_entry(rest, indent, indent + offset));
        }
        self.pop_to(indent, false);
        match split_entry(content) {
            Some(entry) => {
                let path = self.key_path(&entry.key, indent);
                Some(self.entry(path, entry.value, indent))
            }
            // A wrapped plain scalar.
            None => self.last_path.clone().map(LineAddress::continuation),
        }
    }

    /// Close every container that cannot hold a line at `indent`.
    fn pop_to(&mut self, indent: usize, sequence_item: bool) {
        while self.frames.len() > 1 {
            let top = self.top();
            let keeps_compact = sequence_item && top.accepts_compact && top.indent == indent;
            if top.indent < indent || keeps_compact {
                break;
            }
            self.frames.pop();
        }
    }

    fn top(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    /// Path of a mapping key at `key_col`. Inside a sequence the key belongs
    /// to the entry most recently opened, provided it sits right of the dashes.
    fn key_path(&self, key: &str, key_col: usize) -> String {
        let top = self.top();
        let in_entry = top.dash_indent.is_some_and(|dash| key_col > dash);
        if top.next_index > 0 && in_entry {
            join(&index_path(&top.path, top.next_index - 1), key)
        } else {
            join(&top.path, key)
        }
    }

    fn sequence_entry(&mut self, rest: &str, dash_col: usize, content_col: usize) -> LineAddress {
        let element = {
            let frames_len = self.frames.len();
            let top = &mut self.frames[frames_len - 1];
            let index = top.next_index;
            top.next_index += 1;
            top.dash_indent = Some(dash_col);
            index_path(&top.path, index)
        };

        // `- - x`: the entry is itself a sequence.
        if let Some((inner, offset)) = strip_sequence_marker(rest) {
            self.frames.push(Frame::new(element, dash_col));
            return self.sequence_entry(inner, content_col, content_col + offset);
        }

        // `- key: value` opens a mapping entry on the same line.
        if let Some(entry) = split_entry(rest) {
            let path = join(&element, &entry.key);
            return self.entry(path, entry.value, content_col);
        }

        if rest.is_empty() {
            // Bare `-`: the entry's content starts on the next line.
            self.frames.push(Frame::new(element.clone(), dash_col));
        } else if is_block_indicator(rest) {
            self.block = Some(BlockScalar {
                indent: dash_col,
                path: element.clone(),
            });
        }
        self.last_path = Some(element.clone());
        LineAddress::key(element)
    }

    /// Record a mapping entry at `key_col` whose value is `value`.
    fn entry(&mut self, path: String, value: &str, key_col: usize) -> LineAddress {
        let value = strip_trailing_comment(value);
        if is_block_indicator(value) {
            self.block = Some(BlockScalar {
                indent: key_col,
                path: path.clone(),
            });
        } else if opens_nested(value) {
            let mut frame = Frame::new(path.clone(), key_col);
            frame.accepts_compact = value.is_empty();
            self.frames.push(frame);
        }
        self.last_path = Some(path.clone());
        LineAddress::key(path)
    }
}

/// Append a key to a path. The empty key is written `''`.
fn join(parent: &str, key: &str) -> String {
    if key.is_empty() {
        join(parent, "''")
    } else if parent.is_empty() {
        key.to_string()
    } else if key.starts_with('[') {
        format!("{parent}{key}")
    } else {
        format!("{parent}.{key}")
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
