//! Inline provenance comments.
//!
//! Every key line of the rendered document that has provenance gets a
//! trailing comment of the form `# <symbol> [<depth>] <file>:<line>`, aligned
//! to the comment column. Lines that reach the column get the comment on a
//! line of its own below them.

use lineage_provenance::{Marker, ProvenanceEntry, ProvenanceStore, classify, find_provenance};

use crate::config::RenderConfig;
use crate::path_map::PathMap;
use crate::styled::display_width;

/// The legend printed above an annotated document.
pub fn legend(config: &RenderConfig) -> String {
    let symbols = &config.symbols;
    let lines = [
        "# Provenance Legend:".to_string(),
        format!("#   {} [0] Defined in this file", symbols.glyph(Marker::Defined)),
        format!(
            "#   {} [N] Inherited/imported (N levels deep)",
            symbols.glyph(Marker::Inherited)
        ),
        format!("#   {} Computed/templated", symbols.glyph(Marker::Computed)),
    ];
    lines
        .iter()
        .map(|line| config.paint_muted(line) + "\n")
        .collect()
}

/// Drop `prefix` from the start of `file`.
pub fn short_file<'a>(file: &'a str, prefix: &str) -> &'a str {
    file.strip_prefix(prefix).unwrap_or(file)
}

/// The comment describing `entry`, e.g. `# ○ [2] catalog/vpc.yaml:12`.
///
/// The line number is left out when unknown. Entries without a file (usually
/// computed values) show the computed pseudo-file instead.
pub fn format_comment(entry: &ProvenanceEntry, config: &RenderConfig) -> String {
    let class = classify(entry.kind, entry.depth);
    let file = if entry.source_file.is_empty() {
        config.labels.computed_file.as_str()
    } else {
        short_file(&entry.source_file, &config.file_prefix)
    };
    let location = if entry.has_line() {
        format!("{file}:{}", entry.source_line)
    } else {
        file.to_string()
    };
    format!(
        "{} {} {} {}",
        config.paint_muted("#"),
        config.paint_muted(config.symbols.glyph(class.marker)),
        config.paint_tier(&format!("[{}]", entry.depth), class.tier),
        config.paint_muted(&location),
    )
}

/// Append provenance comments to the key lines of a rendered document.
///
/// `lines` are the rendered lines and `map` their addresses. Continuation
/// lines, unaddressed lines, and lookup misses are passed through unchanged.
pub fn annotate_lines<S: AsRef<str>>(
    lines: &[S],
    map: &PathMap,
    store: &dyn ProvenanceStore,
    config: &RenderConfig,
) -> String {
    let column = config.comment_column;
    let mut out = String::new();
    let mut annotated = 0;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        out.push_str(line);

        let entry = map
            .get(idx)
            .filter(|addr| addr.is_key_line && !addr.is_continuation)
            .and_then(|addr| {
                let target = config.normalizer.normalize(&addr.path);
                find_provenance(store, &config.normalizer, &target)
            });
        if let Some(entry) = entry {
            let width = display_width(line);
            if width < column {
                out.push_str(&" ".repeat(column - width));
            } else {
                out.push('\n');
                out.push_str(&" ".repeat(column));
            }
            out.push_str(&format_comment(entry, config));
            annotated += 1;
        }
        out.push('\n');
    }

    tracing::trace!(lines = lines.len(), annotated, "annotated rendered lines");
    out
}
