//! Provenance records for merged configuration.
//!
//! The deep-merge engine records, for every logical path it writes, where the
//! value came from. This crate defines that record and the read-side
//! operations the renderers need on it.
//!
//! # Key Features
//!
//! - [`ProvenanceEntry`]: source file, line, kind and inheritance depth
//! - [`ProvenanceStore`]: the interface the merge engine exposes, with
//!   [`ProvenanceLog`] as an in-memory implementation
//! - [`PathNormalizer`]: strips inheritance-scope prefixes so that paths
//!   recorded at one scope match paths rendered at another
//! - [`find_provenance`]: resolves a rendered path to its winning entry
//! - [`classify`]: maps kind and depth to a marker and a color tier
//!
//! # Example
//!
//! ```rust
//! use lineage_provenance::{
//!     PathNormalizer, ProvenanceEntry, ProvenanceKind, ProvenanceLog, ProvenanceStore,
//!     find_provenance,
//! };
//!
//! let mut log = ProvenanceLog::new();
//! log.record(
//!     "components.terraform.vpc.vars.enabled",
//!     ProvenanceEntry::new("stacks/catalog/vpc.yaml", 4, ProvenanceKind::Import, 1),
//! );
//!
//! let entry = find_provenance(&log, &PathNormalizer::default(), "vars.enabled").unwrap();
//! assert_eq!(entry.source_line, 4);
//! ```

mod classify;
mod entry;
mod lookup;
mod normalize;
mod store;

pub use classify::{Classification, ColorTier, DEFINED_DEPTH, Marker, classify};
pub use entry::{ProvenanceEntry, ProvenanceKind};
pub use lookup::find_provenance;
pub use normalize::PathNormalizer;
pub use store::{ProvenanceLog, ProvenanceStore};
