//! Resolving rendered paths to recorded provenance.

use crate::{PathNormalizer, ProvenanceEntry, ProvenanceStore};

/// Find the winning entry for an already-normalized path.
///
/// Every stored path is normalized and compared with `target`; the first
/// match in store iteration order wins. Several stored paths may normalize to
/// the same target (the same value recorded at different scopes), and which
/// one comes first is up to the store.
///
/// Returns `None` when provenance is disabled, the store is empty, or no
/// stored path matches.
pub fn find_provenance<'s, S>(
    store: &'s S,
    normalizer: &PathNormalizer,
    target: &str,
) -> Option<&'s ProvenanceEntry>
where
    S: ProvenanceStore + ?Sized,
{
    if !store.is_enabled() {
        return None;
    }

    let found = store
        .paths()
        .into_iter()
        .filter(|stored| normalizer.normalize(stored) == target)
        .find_map(|stored| store.entries(stored).first());

    if found.is_none() {
        tracing::trace!(path = target, "no provenance recorded");
    }
    found
}
