//! Inheritance-scope path normalization.

use serde::Deserialize;
use std::borrow::Cow;

/// Strips inheritance-scope prefixes from logical paths.
///
/// The merge engine may record provenance at a broader scope than the one
/// being rendered: a value rendered as `vars.enabled` for component `vpc` can
/// be recorded as `components.terraform.vpc.vars.enabled` (namespace, kind,
/// name) or as `terraform.vars.enabled` (kind only). Normalizing both sides
/// makes them comparable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathNormalizer {
    /// First segment of a three-segment scope (`components`).
    pub namespace: String,
    /// Component kinds that open a scope (`terraform`, ...).
    pub kinds: Vec<String>,
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self {
            namespace: "components".to_string(),
            kinds: vec![
                "terraform".to_string(),
                "helmfile".to_string(),
                "packer".to_string(),
            ],
        }
    }
}

impl PathNormalizer {
    pub fn new(namespace: impl Into<String>, kinds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            namespace: namespace.into(),
            kinds: kinds.into_iter().map(Into::into).collect(),
        }
    }

    /// Remove a leading `<namespace>.<kind>.<name>.` or `<kind>.` prefix.
    ///
    /// Anything else is returned unchanged. A bare three-segment scope
    /// (`components.terraform.vpc`) normalizes to the empty string.
    ///
    /// ```rust
    /// use lineage_provenance::PathNormalizer;
    ///
    /// let n = PathNormalizer::default();
    /// assert_eq!(n.normalize("components.terraform.vpc.vars.enabled"), "vars.enabled");
    /// assert_eq!(n.normalize("terraform.vars.tags"), "vars.tags");
    /// assert_eq!(n.normalize("vars.enabled"), "vars.enabled");
    /// ```
    pub fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let mut parts = path.splitn(4, '.');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();

        if first == self.namespace && second.is_some_and(|kind| self.is_kind(kind)) {
            if let Some(_name) = parts.next() {
                return Cow::Borrowed(parts.next().unwrap_or_default());
            }
        }

        if second.is_some() && self.is_kind(first) {
            return Cow::Borrowed(&path[first.len() + 1..]);
        }

        Cow::Borrowed(path)
    }

    fn is_kind(&self, segment: &str) -> bool {
        self.kinds.iter().any(|k| k == segment)
    }
}
