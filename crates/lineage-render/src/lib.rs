//! # lineage-render
//!
//! Renders merged configuration together with where each value came from.
//!
//! Three views are available through [`ProvenanceRenderer`]:
//!
//! - **tree**: stored paths grouped by the file that supplied them
//! - **side by side**: the document next to the tree
//! - **inline**: the document with a `# ● [0] file:line` comment on every key
//!   line that has provenance
//!
//! The inline view works on text. After serialization and highlighting the
//! logical path of every line is recovered by [`build_path_map`], which only
//! looks at indentation and sequence markers.
//!
//! ## Example
//!
//! ```rust
//! use lineage_provenance::{ProvenanceEntry, ProvenanceKind, ProvenanceLog};
//! use lineage_render::{ProvenanceRenderer, RenderConfig};
//! use lineage_yaml::Document;
//!
//! let doc = Document::from_yaml_str("vars:\n  stage: dev\n").unwrap();
//! let mut store: ProvenanceLog = [
//!     ("vars", ProvenanceEntry::new("orgs/acme/dev.yaml", 2, ProvenanceKind::Inline, 0)),
//!     ("vars.stage", ProvenanceEntry::new("orgs/acme/dev.yaml", 3, ProvenanceKind::Inline, 0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let renderer = ProvenanceRenderer::new(RenderConfig::plain());
//! let out = renderer.render_inline(doc, &mut store, None);
//! assert!(out.contains("stage: dev"));
//! assert!(out.contains("# ● [0] orgs/acme/dev.yaml:3"));
//! ```

mod config;
mod error;
mod inline;
mod path_map;
mod renderer;
mod side_by_side;
pub mod styled;
mod transform;
mod tree;

pub use config::{
    DEFAULT_COMMENT_COLUMN, KeyRename, Labels, MIN_COMMENT_COLUMN, Palette, RenderConfig,
    Symbols, comment_column_for_width,
};
pub use error::RenderError;
pub use inline::{annotate_lines, format_comment, legend, short_file};
pub use path_map::{LineAddress, PathMap, build_path_map};
pub use renderer::ProvenanceRenderer;
pub use side_by_side::{balance_columns, combine_side_by_side};
pub use transform::{DocumentTransform, FilterEmptySections, RenameRootKey, TransformPipeline};
pub use tree::{AllowList, FileNode, TreeItem, build_file_tree, render_tree};

pub use lineage_provenance::{classify, find_provenance};
