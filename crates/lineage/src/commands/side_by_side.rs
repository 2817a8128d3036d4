//! `lineage side-by-side`

use std::path::PathBuf;

use anyhow::Result;
use lineage_render::ProvenanceRenderer;

use crate::input;

#[derive(Debug)]
pub struct SideBySideArgs {
    pub document: PathBuf,
    pub provenance: PathBuf,
    /// Width of the document column.
    pub width: usize,
}

pub fn execute(args: SideBySideArgs, renderer: &ProvenanceRenderer) -> Result<String> {
    let doc = input::load_document(&args.document)?;
    let store = input::load_provenance(&args.provenance)?;
    Ok(renderer.render_side_by_side(&doc, &store, args.width))
}
