//! Command implementations for the lineage CLI
//!
//! Each command loads its inputs and returns the rendered text; printing is
//! left to `main`.

pub mod inline;
pub mod side_by_side;
pub mod tree;
