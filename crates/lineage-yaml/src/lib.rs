//! # lineage-yaml
//!
//! The document side of provenance rendering.
//!
//! This crate owns everything that turns a merged configuration tree into
//! text the renderers can annotate:
//!
//! - [`Document`]: a tagged value tree (null, bool, number, string, folded
//!   string, sequence, mapping) with insertion-ordered mappings
//! - [`DocumentEncoder`] / [`BlockEncoder`]: block-style YAML serialization
//!   with a configurable indent width
//! - [`fold_long_scalars`]: marks overlong strings so they serialize as
//!   folded block scalars
//! - [`Highlighter`] / [`YamlHighlighter`]: ANSI syntax highlighting
//! - [`syntax`]: the line-level grammar shared by the highlighter and the
//!   path reconstructor in `lineage-render`
//!
//! ## Example
//!
//! ```rust
//! use lineage_yaml::{BlockEncoder, Document, DocumentEncoder};
//!
//! let doc = Document::from_yaml_str("vars:\n  enabled: true\n").unwrap();
//! let text = BlockEncoder.encode(&doc, 2).unwrap();
//! assert_eq!(text, "vars:\n  enabled: true\n");
//! ```

mod document;
mod encode;
mod error;
mod fold;
mod highlight;
pub mod syntax;

pub use document::Document;
pub use encode::{BlockEncoder, DocumentEncoder};
pub use error::{EncodeError, HighlightError};
pub use fold::fold_long_scalars;
pub use highlight::{Highlighter, PlainHighlighter, YamlHighlighter};
