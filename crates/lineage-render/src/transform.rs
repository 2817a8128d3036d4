/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document transforms applied before inline rendering.
 */

//! Document transforms applied before inline rendering.
//!
//! - [`DocumentTransform`] - The trait implemented by all transforms
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//! - [`RenameRootKey`] - Renames a root key and migrates its provenance
//! - [`FilterEmptySections`] - Drops root sections nothing was recorded for
//!
//! Transforms run in insertion order. Each one may rewrite the document and
//! may append to the provenance store; the store is never read by a renderer
//! until the whole pipeline has finished.

use lineage_provenance::ProvenanceStore;
use lineage_yaml::Document;

/// A rewrite of the merged document ahead of rendering.
pub trait DocumentTransform {
    /// Human-readable name, used for logging.
    fn name(&self) -> &str;

    fn transform(&self, doc: &mut Document, store: &mut dyn ProvenanceStore);
}

/// A pipeline of document transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn DocumentTransform>>,
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Transforms run in the order they are added.
    pub fn push(&mut self, transform: Box<dyn DocumentTransform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    pub fn execute(&self, doc: &mut Document, store: &mut dyn ProvenanceStore) {
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Running transform");
            transform.transform(doc, store);
        }
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Rename a key of the root mapping, keeping its position.
///
/// Provenance recorded for the old key and for its indexed children
/// (`from[0]`, `from[1]`, ...) is copied, in order, to the new key so the
/// winning entry stays the winner. Nothing happens when the old key is absent
/// or the new key is already taken.
#[derive(Debug, Clone)]
pub struct RenameRootKey {
    from: String,
    to: String,
}

impl RenameRootKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Copy every entry recorded for `from` onto `to`. False when there were none.
fn migrate(store: &mut dyn ProvenanceStore, from: &str, to: &str) -> bool {
    let entries = store.entries(from).to_vec();
    if entries.is_empty() {
        return false;
    }
    for entry in entries {
        store.record(to, entry);
    }
    true
}

impl DocumentTransform for RenameRootKey {
    fn name(&self) -> &str {
        "rename-root-key"
    }

    fn transform(&self, doc: &mut Document, store: &mut dyn ProvenanceStore) {
        let Some(entries) = doc.as_mapping_mut() else {
            return;
        };
        if entries.contains_key(&self.to) {
            tracing::debug!(from = %self.from, to = %self.to, "rename target exists; skipping");
            return;
        }
        let Some(index) = entries.get_index_of(&self.from) else {
            return;
        };
        let Some((_, value)) = entries.shift_remove_index(index) else {
            return;
        };
        entries.shift_insert(index, self.to.clone(), value);

        migrate(store, &self.from, &self.to);
        let mut migrated = 0;
        while migrate(
            store,
            &format!("{}[{migrated}]", self.from),
            &format!("{}[{migrated}]", self.to),
        ) {
            migrated += 1;
        }
        tracing::trace!(from = %self.from, to = %self.to, items = migrated, "renamed root key");
    }
}

/// Drop root sections that have no provenance of their own and none on
/// their first `probe_limit` sequence entries.
#[derive(Debug, Clone)]
pub struct FilterEmptySections {
    probe_limit: usize,
}

impl FilterEmptySections {
    pub fn new(probe_limit: usize) -> Self {
        Self { probe_limit }
    }

    fn has_provenance(&self, store: &dyn ProvenanceStore, key: &str) -> bool {
        store.has(key) || (0..self.probe_limit).any(|i| store.has(&format!("{key}[{i}]")))
    }
}

impl DocumentTransform for FilterEmptySections {
    fn name(&self) -> &str {
        "filter-empty-sections"
    }

    fn transform(&self, doc: &mut Document, store: &mut dyn ProvenanceStore) {
        let Some(entries) = doc.as_mapping_mut() else {
            return;
        };
        let store: &dyn ProvenanceStore = store;
        entries.retain(|key, _| {
            let keep = self.has_provenance(store, key);
            if !keep {
                tracing::trace!(section = %key, "dropping section without provenance");
            }
            keep
        });
    }
}
