//! `lineage inline`

use std::path::PathBuf;

use anyhow::Result;
use lineage_render::ProvenanceRenderer;
use tracing::debug;

use crate::input;

#[derive(Debug)]
pub struct InlineArgs {
    pub document: PathBuf,
    pub provenance: PathBuf,
    /// Label of the file the depths are relative to.
    pub describe: Option<String>,
}

pub fn execute(args: InlineArgs, renderer: &ProvenanceRenderer) -> Result<String> {
    let doc = input::load_document(&args.document)?;
    let mut store = input::load_provenance(&args.provenance)?;
    debug!(
        paths = store.len(),
        comment_column = renderer.config().comment_column,
        "rendering inline provenance"
    );
    Ok(renderer.render_inline(doc, &mut store, args.describe.as_deref()))
}
