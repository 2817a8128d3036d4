//! Long-scalar folding.

use crate::Document;

/// Mark single-line strings longer than `max_width` characters as folded.
///
/// Folded strings are emitted as `>-` block scalars whose lines stay within
/// `max_width` columns, so a long description does not push the rest of its
/// line (and any annotation after it) off screen. A `max_width` of zero
/// leaves the document untouched.
pub fn fold_long_scalars(doc: Document, max_width: usize) -> Document {
    if max_width == 0 {
        return doc;
    }

    match doc {
        Document::String(text) if text.chars().count() > max_width && !text.contains('\n') => {
            Document::Folded {
                text,
                width: max_width,
            }
        }
        Document::Sequence(items) => Document::Sequence(
            items
                .into_iter()
                .map(|item| fold_long_scalars(item, max_width))
                .collect(),
        ),
        Document::Mapping(entries) => Document::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k, fold_long_scalars(v, max_width)))
                .collect(),
        ),
        other @ (Document::Null
        | Document::Bool(_)
        | Document::Number(_)
        | Document::String(_)
        | Document::Folded { .. }) => other,
    }
}
