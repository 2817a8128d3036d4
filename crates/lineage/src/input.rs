//! Loading documents, provenance dumps and rendering configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lineage_provenance::ProvenanceLog;
use lineage_render::RenderConfig;
use lineage_yaml::Document;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// A merged document; `.json` files are read as JSON, anything else as YAML.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = read(path)?;
    let doc = if is_json(path) {
        Document::from_json_str(&text)
            .with_context(|| format!("Invalid JSON document: {}", path.display()))?
    } else {
        Document::from_yaml_str(&text)
            .with_context(|| format!("Invalid YAML document: {}", path.display()))?
    };
    Ok(doc)
}

/// A provenance dump of the form `{enabled, paths: {path: [entry]}}`.
pub fn load_provenance(path: &Path) -> Result<ProvenanceLog> {
    let text = read(path)?;
    let log = if is_json(path) {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid provenance dump: {}", path.display()))?
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid provenance dump: {}", path.display()))?
    };
    Ok(log)
}

/// Rendering configuration from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let text = read(path)?;
    serde_yaml::from_str(&text).with_context(|| format!("Invalid configuration: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_provenance::ProvenanceStore;
    use tempfile::TempDir;

    fn write(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_document_by_extension() {
        let temp = TempDir::new().unwrap();
        let yaml = write(&temp, "doc.yaml", "vars:\n  a: 1\n");
        let json = write(&temp, "doc.JSON", r#"{"vars": {"a": 1}}"#);
        assert_eq!(load_document(&yaml).unwrap(), load_document(&json).unwrap());
    }

    #[test]
    fn test_load_provenance_yaml() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "prov.yaml",
            "enabled: false\npaths:\n  vars.a:\n    - {file: a.yaml, line: 3, kind: override, depth: 2}\n",
        );
        let log = load_provenance(&path).unwrap();
        assert!(!log.is_enabled());
        assert_eq!(log.winner("vars.a").unwrap().depth, 2);
    }

    #[test]
    fn test_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let err = load_document(&missing).unwrap_err();
        assert!(format!("{err}").contains("nope.yaml"));
    }

    #[test]
    fn test_invalid_provenance_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "prov.json", "{\"paths\": 3}");
        assert!(load_provenance(&path).is_err());
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), RenderConfig::default());

        let temp = TempDir::new().unwrap();
        let path = write(&temp, "lineage.yaml", "comment_column: 64\nfile_prefix: ''\n");
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.comment_column, 64);
        assert_eq!(config.file_prefix, "");
        assert!(config.color);
    }
}
