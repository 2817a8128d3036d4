/*
 * renderer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Provenance renderer: ties configuration, encoder and highlighter together.
 */

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use lineage_provenance::ProvenanceStore;
use lineage_yaml::{
    BlockEncoder, Document, DocumentEncoder, Highlighter, PlainHighlighter, YamlHighlighter,
    fold_long_scalars,
};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::inline::{annotate_lines, legend};
use crate::path_map::build_path_map;
use crate::side_by_side::combine_side_by_side;
use crate::transform::{FilterEmptySections, RenameRootKey, TransformPipeline};
use crate::tree::{AllowList, render_tree, render_tree_body};

/// Renders merged documents together with their provenance.
///
/// The encoder turns a [`Document`] into block-style YAML and the highlighter
/// styles it. Both can be swapped; the defaults are [`BlockEncoder`] and,
/// depending on [`RenderConfig::color`], [`YamlHighlighter`] or
/// [`PlainHighlighter`].
pub struct ProvenanceRenderer {
    config: RenderConfig,
    encoder: Box<dyn DocumentEncoder>,
    highlighter: Box<dyn Highlighter>,
}

impl ProvenanceRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let highlighter: Box<dyn Highlighter> = if config.color {
            Box::new(YamlHighlighter)
        } else {
            Box::new(PlainHighlighter)
        };
        Self {
            config,
            encoder: Box::new(BlockEncoder),
            highlighter,
        }
    }

    pub fn with_encoder(mut self, encoder: impl DocumentEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The provenance tree, optionally restricted to `allow`.
    pub fn render_tree(&self, store: &dyn ProvenanceStore, allow: Option<&AllowList>) -> String {
        render_tree(store, allow, &self.config)
    }

    /// The document on the left, the full provenance tree on the right.
    pub fn render_side_by_side(
        &self,
        doc: &Document,
        store: &dyn ProvenanceStore,
        left_width: usize,
    ) -> String {
        let text = match self.serialize(doc) {
            Ok(text) => text,
            Err(err) => return format!("Error rendering: {err}\n"),
        };
        let left = self.highlight(&text);
        let right = render_tree_body(store, None, &self.config);
        combine_side_by_side(&left, &right, left_width, &self.config)
    }

    /// The document with a provenance comment on every key line that has one.
    ///
    /// When provenance is enabled the pre-render transforms run first and
    /// may append migrated entries to `store`. `described_file` labels the
    /// file whose point of view the depths are relative to.
    pub fn render_inline(
        &self,
        doc: Document,
        store: &mut dyn ProvenanceStore,
        described_file: Option<&str>,
    ) -> String {
        let mut doc = doc;
        if store.is_enabled() {
            self.pre_render_transforms().execute(&mut doc, store);
        }
        let doc = fold_long_scalars(doc, self.config.fold_width());

        let text = match self.serialize(&doc) {
            Ok(text) => text,
            Err(err) => return format!("Error rendering: {err}\n"),
        };
        let styled = self.highlight(&text);
        let lines: Vec<&str> = styled.lines().collect();
        let map = build_path_map(&lines);

        let mut out = legend(&self.config);
        if let Some(label) = described_file {
            out.push_str(&self.config.paint_muted(&format!("# Describing: {label}")));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&annotate_lines(&lines, &map, &*store, &self.config));
        out
    }

    /// Transforms applied ahead of inline rendering, as configured.
    pub fn pre_render_transforms(&self) -> TransformPipeline {
        let mut pipeline = TransformPipeline::new();
        if let Some(rename) = &self.config.rename {
            pipeline.push(Box::new(RenameRootKey::new(&rename.from, &rename.to)));
        }
        if self.config.filter_empty_sections {
            pipeline.push(Box::new(FilterEmptySections::new(
                self.config.section_probe_limit,
            )));
        }
        pipeline
    }

    /// Encode `doc`, turning encoder panics into errors.
    fn serialize(&self, doc: &Document) -> Result<String, RenderError> {
        let indent = self.config.indent_width;
        match catch_unwind(AssertUnwindSafe(|| self.encoder.encode(doc, indent))) {
            Ok(result) => result.map_err(RenderError::from),
            Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Style `text`, falling back to the plain text.
    fn highlight(&self, text: &str) -> String {
        match self.highlighter.highlight(text) {
            Ok(styled) => styled,
            Err(err) => {
                tracing::debug!(error = %err, "highlighting failed; using plain text");
                text.to_string()
            }
        }
    }
}

impl Default for ProvenanceRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
