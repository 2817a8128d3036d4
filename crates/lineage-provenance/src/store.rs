//! The provenance store interface and an in-memory implementation.

use crate::ProvenanceEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read (and narrowly write) access to the provenance recorded during a merge.
///
/// Every path maps to an ordered, non-empty list of entries; index 0 is the
/// value that won the merge. The store belongs to the merge engine: renderers
/// read it, and only the key-rename transform writes to it, always before any
/// renderer reads within the same call.
pub trait ProvenanceStore {
    /// Whether provenance was collected at all.
    fn is_enabled(&self) -> bool;

    /// All recorded paths. Callers must not depend on the order.
    fn paths(&self) -> Vec<&str>;

    /// Entries recorded for `path`, winner first; empty if none.
    fn entries(&self, path: &str) -> &[ProvenanceEntry];

    fn has(&self, path: &str) -> bool {
        !self.entries(path).is_empty()
    }

    /// Append an entry for `path`.
    fn record(&mut self, path: &str, entry: ProvenanceEntry);

    /// The winning entry for `path`.
    fn winner(&self, path: &str) -> Option<&ProvenanceEntry> {
        self.entries(path).first()
    }
}

/// Insertion-ordered in-memory provenance store.
///
/// Deserializes from the dump format `{enabled: bool, paths: {path: [entry]}}`
/// so captured merge results can be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceLog {
    #[serde(default = "default_enabled")]
    enabled: bool,

    #[serde(default)]
    paths: IndexMap<String, Vec<ProvenanceEntry>>,
}

fn default_enabled() -> bool {
    true
}

impl ProvenanceLog {
    /// An empty, enabled log.
    pub fn new() -> Self {
        Self {
            enabled: true,
            paths: IndexMap::new(),
        }
    }

    /// A log that reports provenance as not collected.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            paths: IndexMap::new(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ProvenanceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvenanceStore for ProvenanceLog {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paths(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    fn entries(&self, path: &str) -> &[ProvenanceEntry] {
        self.paths.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    fn record(&mut self, path: &str, entry: ProvenanceEntry) {
        tracing::trace!(path, file = %entry.source_file, "recording provenance");
        self.paths.entry(path.to_string()).or_default().push(entry);
    }
}

impl<P: Into<String>> FromIterator<(P, ProvenanceEntry)> for ProvenanceLog {
    fn from_iter<I: IntoIterator<Item = (P, ProvenanceEntry)>>(iter: I) -> Self {
        let mut log = ProvenanceLog::new();
        for (path, entry) in iter {
            log.record(&path.into(), entry);
        }
        log
    }
}
