//! Rendering configuration.

use crossterm::style::{Color, Stylize};
use lineage_provenance::{ColorTier, Marker, PathNormalizer};
use serde::Deserialize;

/// Comment column used when the terminal width is unknown.
pub const DEFAULT_COMMENT_COLUMN: usize = 50;
/// Narrowest comment column derived from a terminal width.
pub const MIN_COMMENT_COLUMN: usize = 40;
/// Columns reserved to the right of the comment column.
const COMMENT_RESERVE: usize = 60;

/// Everything the renderers need to know about presentation.
///
/// Deserializes from a partial YAML/JSON object; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit ANSI styling.
    pub color: bool,
    /// Indentation step used when serializing documents.
    pub indent_width: usize,
    /// Column at which inline provenance comments start.
    pub comment_column: usize,
    /// Inline scalars longer than `comment_column - fold_margin` are folded.
    pub fold_margin: usize,
    pub symbols: Symbols,
    pub labels: Labels,
    /// Prefix dropped from source files in inline comments.
    pub file_prefix: String,
    pub normalizer: PathNormalizer,
    /// Root key renamed before inline rendering.
    pub rename: Option<KeyRename>,
    /// Drop top-level sections without provenance before inline rendering.
    pub filter_empty_sections: bool,
    /// Most sequence indices probed when looking for a section's provenance.
    pub section_probe_limit: usize,
    #[serde(skip)]
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            indent_width: 2,
            comment_column: DEFAULT_COMMENT_COLUMN,
            fold_margin: 10,
            symbols: Symbols::default(),
            labels: Labels::default(),
            file_prefix: "stacks/".to_string(),
            normalizer: PathNormalizer::default(),
            rename: Some(KeyRename {
                from: "imports".to_string(),
                to: "import".to_string(),
            }),
            filter_empty_sections: true,
            section_probe_limit: 1000,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Defaults without styling.
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    /// Widest a scalar may be before it is folded for inline rendering.
    pub fn fold_width(&self) -> usize {
        self.comment_column.saturating_sub(self.fold_margin)
    }

    /// Apply `color` to `text` when styling is enabled.
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn paint_tier(&self, text: &str, tier: ColorTier) -> String {
        self.paint(text, self.palette.tier(tier))
    }

    pub fn paint_muted(&self, text: &str) -> String {
        self.paint(text, self.palette.muted)
    }
}

/// Comment column for a terminal `width` columns wide.
///
/// Leaves room for a comment to the right of the column and never goes below
/// [`MIN_COMMENT_COLUMN`]. Without a width the default applies.
pub fn comment_column_for_width(width: Option<usize>) -> usize {
    match width {
        Some(w) if w > 0 => w.saturating_sub(COMMENT_RESERVE).max(MIN_COMMENT_COLUMN),
        _ => DEFAULT_COMMENT_COLUMN,
    }
}

/// Glyphs for each provenance marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub defined: String,
    pub inherited: String,
    pub computed: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            defined: Marker::Defined.default_glyph().to_string(),
            inherited: Marker::Inherited.default_glyph().to_string(),
            computed: Marker::Computed.default_glyph().to_string(),
        }
    }
}

impl Symbols {
    pub fn glyph(&self, marker: Marker) -> &str {
        match marker {
            Marker::Defined => &self.defined,
            Marker::Inherited => &self.inherited,
            Marker::Computed => &self.computed,
        }
    }
}

/// Fixed text used by the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Title of the tree and of the right-hand column.
    pub provenance_header: String,
    /// Title of the left-hand column.
    pub configuration_header: String,
    /// Root of the file tree.
    pub tree_root: String,
    /// Pseudo-file grouping computed values.
    pub computed_file: String,
    /// Shown when the store is enabled but has nothing to show.
    pub empty: String,
    /// Width of horizontal rules.
    pub rule_width: usize,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            provenance_header: "Provenance".to_string(),
            configuration_header: "Configuration".to_string(),
            tree_root: "stacks/".to_string(),
            computed_file: "<computed>".to_string(),
            empty: "No provenance data available.".to_string(),
            rule_width: 60,
        }
    }
}

/// A root key to rename, e.g. `imports` to `import`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyRename {
    pub from: String,
    pub to: String,
}

/// Colors for each part of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: Color,
    pub file: Color,
    pub line: Color,
    pub muted: Color,
    pub defined: Color,
    pub shallow: Color,
    pub moderate: Color,
    pub deep: Color,
    pub very_deep: Color,
    pub computed: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header: Color::White,
            file: Color::Cyan,
            line: Color::DarkGrey,
            muted: Color::DarkGrey,
            defined: Color::Green,
            shallow: Color::DarkGreen,
            moderate: Color::Yellow,
            deep: Color::DarkYellow,
            very_deep: Color::Red,
            computed: Color::Magenta,
        }
    }
}

impl Palette {
    pub fn tier(&self, tier: ColorTier) -> Color {
        match tier {
            ColorTier::Defined => self.defined,
            ColorTier::Shallow => self.shallow,
            ColorTier::Moderate => self.moderate,
            ColorTier::Deep => self.deep,
            ColorTier::VeryDeep => self.very_deep,
            ColorTier::Computed => self.computed,
        }
    }
}
