//! The merged-document value tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of a merged configuration document.
///
/// The deep-merge engine hands the renderers an untyped tree. Modelling it as
/// a closed set of variants keeps the pre-render transforms exhaustive: every
/// `match` over a `Document` has to say what happens to every kind of node.
///
/// Mappings preserve insertion order, so the rendered text lists keys in the
/// order the merge produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    /// `null` / `~` / absent value
    #[default]
    Null,

    Bool(bool),

    /// Integer or float, printed the way YAML prints it (`.nan`, `.inf`, ...)
    Number(serde_yaml::Number),

    String(String),

    /// A long string that should be emitted as a folded block scalar (`>-`).
    ///
    /// Produced by [`crate::fold_long_scalars`]; `text` is the same string a
    /// plain `String` would carry and `width` is the column the folded lines
    /// must stay within.
    Folded { text: String, width: usize },

    Sequence(Vec<Document>),

    Mapping(IndexMap<String, Document>),
}

impl Document {
    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Document::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence(items: impl IntoIterator<Item = Document>) -> Self {
        Document::Sequence(items.into_iter().collect())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Document::String(value.into())
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Document::from(value))
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Document::from(value))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Document::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Document::Sequence(_))
    }

    /// True for every variant that is not a collection.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Document::Sequence(_) | Document::Mapping(_))
    }

    /// The string payload of `String` and `Folded` nodes.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) | Document::Folded { text: s, .. } => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Document>> {
        match self {
            Document::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut IndexMap<String, Document>> {
        match self {
            Document::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key of a mapping node.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }
}

impl From<serde_yaml::Value> for Document {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => Document::Number(n),
            Value::String(s) => Document::String(s),
            Value::Sequence(items) => {
                Document::Sequence(items.into_iter().map(Document::from).collect())
            }
            Value::Mapping(entries) => Document::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (yaml_key_to_string(k), Document::from(v)))
                    .collect(),
            ),
            // Tags carry no meaning for rendering; keep the tagged value.
            Value::Tagged(tagged) => Document::from(tagged.value),
        }
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => Document::Number(json_number(&n)),
            Value::String(s) => Document::String(s),
            Value::Array(items) => {
                Document::Sequence(items.into_iter().map(Document::from).collect())
            }
            Value::Object(entries) => Document::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Document::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Document> for serde_yaml::Value {
    fn from(doc: Document) -> Self {
        use serde_yaml::Value;

        match doc {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(b),
            Document::Number(n) => Value::Number(n),
            Document::String(s) | Document::Folded { text: s, .. } => Value::String(s),
            Document::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            Document::Mapping(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Document> for serde_json::Value {
    fn from(doc: Document) -> Self {
        use serde_json::Value;

        match doc {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(b),
            Document::Number(n) => yaml_number(&n),
            Document::String(s) | Document::Folded { text: s, .. } => Value::String(s),
            Document::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Document::Mapping(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// Serialized untagged, the way the document would be written by hand.
// `Folded` is an encoding hint and serializes as its plain string.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Number(n) => n.serialize(serializer),
            Document::String(s) | Document::Folded { text: s, .. } => serializer.serialize_str(s),
            Document::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_yaml::Value::deserialize(deserializer).map(Document::from)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Bool(value)
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Number(value.into())
    }
}

fn json_number(n: &serde_json::Number) -> serde_yaml::Number {
    if let Some(i) = n.as_i64() {
        i.into()
    } else if let Some(u) = n.as_u64() {
        u.into()
    } else {
        n.as_f64().unwrap_or(f64::NAN).into()
    }
}

/// Non-finite floats have no JSON spelling and become `null`.
fn yaml_number(n: &serde_yaml::Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        i.into()
    } else if let Some(u) = n.as_u64() {
        u.into()
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

/// Mapping keys that are not strings are rendered the way YAML would print them.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
