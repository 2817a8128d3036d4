//! Marker and color-tier classification.

use crate::ProvenanceKind;

/// Depths at or below this count as "defined here".
///
/// Depth 0 is the file being described; everything it imports, however
/// close, is inherited.
pub const DEFINED_DEPTH: usize = 0;

/// Depth at which the color scale stops getting more intense.
const VERY_DEEP_DEPTH: usize = 4;

/// The visual marker placed next to an annotated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `●` defined in the described file
    Defined,
    /// `○` inherited or imported
    Inherited,
    /// `∴` computed or templated
    Computed,
}

impl Marker {
    pub fn default_glyph(self) -> &'static str {
        match self {
            Marker::Defined => "●",
            Marker::Inherited => "○",
            Marker::Computed => "∴",
        }
    }
}

/// Color intensity, from "defined here" to "very deep".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorTier {
    Defined,
    Shallow,
    Moderate,
    Deep,
    VeryDeep,
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub marker: Marker,
    pub tier: ColorTier,
}

/// Classify an entry by kind and depth.
///
/// Computed values are always `∴`. Otherwise depth 0 is `●` in the strongest
/// tier; each hop beyond that is `○` in a progressively deeper tier, capping
/// at [`ColorTier::VeryDeep`] from depth 4 on.
pub fn classify(kind: ProvenanceKind, depth: usize) -> Classification {
    if kind == ProvenanceKind::Computed {
        return Classification {
            marker: Marker::Computed,
            tier: ColorTier::Computed,
        };
    }

    let hops = depth.saturating_sub(DEFINED_DEPTH);
    if hops == 0 {
        return Classification {
            marker: Marker::Defined,
            tier: ColorTier::Defined,
        };
    }

    let tier = match hops {
        1 => ColorTier::Shallow,
        2 => ColorTier::Moderate,
        h if h + DEFINED_DEPTH < VERY_DEEP_DEPTH => ColorTier::Deep,
        _ => ColorTier::VeryDeep,
    };
    Classification {
        marker: Marker::Inherited,
        tier,
    }
}
