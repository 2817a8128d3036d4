//! Two-column layout: rendered document on the left, provenance on the right.

use crate::config::RenderConfig;
use crate::styled::{display_width, wrap_styled};

const SEPARATOR: &str = " │  ";

/// Pair up the lines of two columns.
///
/// Lines are taken one from each side until one side runs out, after which
/// the other side continues against blanks. The result has exactly as many
/// rows as the longer column. Blank source lines are kept as they are, so a
/// blank line of a literal block can still face an exhausted column.
pub fn balance_columns(left: Vec<String>, right: Vec<String>) -> Vec<(String, String)> {
    let rows = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..rows)
        .map(|_| (left.next().unwrap_or_default(), right.next().unwrap_or_default()))
        .collect()
}

/// Lay out `left` and `right` side by side.
///
/// Each left line is word-wrapped to `left_width` columns and padded to that
/// width by its unstyled display width, so styled and plain input line up
/// the same way.
pub fn combine_side_by_side(left: &str, right: &str, left_width: usize, config: &RenderConfig) -> String {
    let left_lines: Vec<String> = left
        .lines()
        .flat_map(|line| wrap_styled(line, left_width))
        .collect();
    let right_lines: Vec<String> = right.lines().map(str::to_string).collect();
    let rows = balance_columns(left_lines, right_lines);
    tracing::trace!(rows = rows.len(), width = left_width, "combining columns");

    let mut out = String::new();
    let labels = &config.labels;
    out.push_str(&config.paint(&labels.configuration_header, config.palette.header));
    out.push_str(&pad(display_width(&labels.configuration_header), left_width));
    out.push_str(SEPARATOR);
    out.push_str(&config.paint(&labels.provenance_header, config.palette.header));
    out.push('\n');
    out.push_str(&"─".repeat(left_width + 1));
    out.push('┼');
    out.push_str(&"─".repeat(labels.rule_width));
    out.push('\n');

    for (l, r) in rows {
        let mut row = l;
        row.push_str(&pad(display_width(&row), left_width));
        row.push_str(SEPARATOR);
        row.push_str(&r);
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn pad(width: usize, target: usize) -> String {
    " ".repeat(target.saturating_sub(width))
}
