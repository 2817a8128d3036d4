//! Core provenance record types.

use serde::{Deserialize, Serialize};

/// How a value entered the merged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceKind {
    /// Written directly in the file that recorded it.
    Inline,
    /// Replaced a value from an earlier layer.
    Override,
    /// Pulled in through an import.
    Import,
    /// Supplied by a defaults layer.
    Default,
    /// Produced by a template or function rather than written in a file.
    Computed,
}

/// Where one value of the merged document came from.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    /// Path of the file that produced the value.
    #[serde(rename = "file", default)]
    pub source_file: String,

    /// 1-based line in `source_file`; 0 when unknown.
    #[serde(rename = "line", default)]
    pub source_line: usize,

    pub kind: ProvenanceKind,

    /// Import/inheritance hops between `source_file` and the file being
    /// described. 0 means defined right there.
    #[serde(default)]
    pub depth: usize,
}

impl ProvenanceEntry {
    pub fn new(
        source_file: impl Into<String>,
        source_line: usize,
        kind: ProvenanceKind,
        depth: usize,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            source_line,
            kind,
            depth,
        }
    }

    /// An entry for a computed value with no backing file.
    pub fn computed(depth: usize) -> Self {
        Self::new("", 0, ProvenanceKind::Computed, depth)
    }

    pub fn has_line(&self) -> bool {
        self.source_line > 0
    }

    pub fn is_computed(&self) -> bool {
        self.kind == ProvenanceKind::Computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let entry: ProvenanceEntry =
            serde_json::from_str(r#"{"file": "stacks/dev.yaml", "kind": "override"}"#).unwrap();
        assert_eq!(entry.source_file, "stacks/dev.yaml");
        assert_eq!(entry.source_line, 0);
        assert_eq!(entry.kind, ProvenanceKind::Override);
        assert_eq!(entry.depth, 0);
        assert!(!entry.has_line());
    }

    #[test]
    fn test_serialize_field_names() {
        let entry = ProvenanceEntry::new("a.yaml", 7, ProvenanceKind::Import, 2);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"file": "a.yaml", "line": 7, "kind": "import", "depth": 2})
        );
    }

    #[test]
    fn test_computed() {
        let entry = ProvenanceEntry::computed(1);
        assert!(entry.is_computed());
        assert!(entry.source_file.is_empty());
    }
}
