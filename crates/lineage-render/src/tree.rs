//! File-grouped provenance tree.
//!
//! ```text
//! Provenance
//! ────────────────────────────────────────────────────────────
//! stacks/
//! ├── catalog/vpc.yaml
//! │  ├─ ○ :12   vars.cidr
//! │  └─ ○ :14   vars.region
//! └── orgs/acme/dev.yaml
//!    └─ ● :3   vars.stage
//! ```

use std::collections::{BTreeMap, HashSet};

use lineage_provenance::{ColorTier, Marker, ProvenanceStore, classify};

use crate::config::RenderConfig;

/// Paths the tree is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One stored path, as listed under its source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub marker: Marker,
    pub tier: ColorTier,
    /// Zero when unknown.
    pub line: usize,
    pub path: String,
}

/// A source file and the paths whose winning value it supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub source_file: String,
    pub items: Vec<TreeItem>,
}

/// Group the winning entry of every allowed path by source file.
///
/// Files come out in lexicographic order; items keep the store's order.
/// Computed values are grouped under the configured pseudo-file.
pub fn build_file_tree(
    store: &dyn ProvenanceStore,
    allow: Option<&AllowList>,
    config: &RenderConfig,
) -> Vec<FileNode> {
    let mut by_file: BTreeMap<String, Vec<TreeItem>> = BTreeMap::new();

    for path in store.paths() {
        if allow.is_some_and(|allow| !allow.contains(path)) {
            continue;
        }
        let Some(entry) = store.winner(path) else {
            continue;
        };
        let file = if entry.is_computed() {
            config.labels.computed_file.clone()
        } else {
            entry.source_file.clone()
        };
        let class = classify(entry.kind, entry.depth);
        by_file.entry(file).or_default().push(TreeItem {
            marker: class.marker,
            tier: class.tier,
            line: entry.source_line,
            path: path.to_string(),
        });
    }

    by_file
        .into_iter()
        .map(|(source_file, items)| FileNode { source_file, items })
        .collect()
}

/// Render the provenance tree.
///
/// Empty when provenance is disabled.
pub fn render_tree(
    store: &dyn ProvenanceStore,
    allow: Option<&AllowList>,
    config: &RenderConfig,
) -> String {
    if !store.is_enabled() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&config.paint(&config.labels.provenance_header, config.palette.header));
    out.push('\n');
    out.push_str(&"─".repeat(config.labels.rule_width));
    out.push('\n');
    out.push_str(&render_tree_body(store, allow, config));
    out
}

/// The tree without its header, as shown in the right-hand column of the
/// side-by-side view.
pub(crate) fn render_tree_body(
    store: &dyn ProvenanceStore,
    allow: Option<&AllowList>,
    config: &RenderConfig,
) -> String {
    if !store.is_enabled() {
        return String::new();
    }
    let tree = build_file_tree(store, allow, config);
    tracing::trace!(files = tree.len(), "rendering provenance tree");

    let mut out = String::new();
    if tree.is_empty() {
        out.push_str(&config.labels.empty);
        out.push('\n');
        return out;
    }

    out.push_str(&config.labels.tree_root);
    out.push('\n');

    for (i, node) in tree.iter().enumerate() {
        let is_last = i + 1 == tree.len();
        let (connector, prefix) = if is_last {
            ("└──", "   ")
        } else {
            ("├──", "│  ")
        };
        out.push_str(connector);
        out.push(' ');
        out.push_str(&config.paint(&node.source_file, config.palette.file));
        out.push('\n');

        for (j, item) in node.items.iter().enumerate() {
            let item_connector = if j + 1 == node.items.len() { "└─" } else { "├─" };
            out.push_str(prefix);
            out.push_str(item_connector);
            out.push(' ');
            out.push_str(&config.paint_tier(config.symbols.glyph(item.marker), item.tier));
            out.push(' ');
            if item.line > 0 {
                out.push_str(&config.paint(&format!(":{}", item.line), config.palette.line));
                out.push_str("   ");
            }
            out.push_str(&item.path);
            out.push('\n');
        }
    }
    out
}
