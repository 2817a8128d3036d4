//! `lineage tree`

use std::path::PathBuf;

use anyhow::Result;
use lineage_render::{AllowList, ProvenanceRenderer};

use crate::input;

#[derive(Debug)]
pub struct TreeArgs {
    pub provenance: PathBuf,
    /// Restrict the tree to these paths; empty means everything.
    pub only: Vec<String>,
}

pub fn execute(args: TreeArgs, renderer: &ProvenanceRenderer) -> Result<String> {
    let store = input::load_provenance(&args.provenance)?;
    let allow: Option<AllowList> = if args.only.is_empty() {
        None
    } else {
        Some(args.only.into_iter().collect())
    };
    Ok(renderer.render_tree(&store, allow.as_ref()))
}
