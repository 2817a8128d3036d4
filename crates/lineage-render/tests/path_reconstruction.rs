/*
 * path_reconstruction.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Path reconstruction over encoded documents.
 *
 * The reconstructor only sees text, so these tests encode documents with the
 * default encoder and check that the recovered key-line paths are exactly the
 * paths of the document, in document order.
 */

use lineage_render::build_path_map;
use lineage_yaml::{BlockEncoder, Document, DocumentEncoder, Highlighter, YamlHighlighter};
use proptest::prelude::*;

fn key_paths(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    build_path_map(&lines)
        .iter()
        .filter(|(_, addr)| addr.is_key_line)
        .map(|(_, addr)| addr.path.clone())
        .collect()
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn is_nonempty_collection(doc: &Document) -> bool {
    match doc {
        Document::Mapping(entries) => !entries.is_empty(),
        Document::Sequence(items) => !items.is_empty(),
        _ => false,
    }
}

/// Paths of every line that introduces a key or a sequence entry, in the
/// order the encoder writes them. An entry whose value is a non-empty
/// collection starts directly with its first child.
fn expected_paths(doc: &Document, path: &str, out: &mut Vec<String>) {
    match doc {
        Document::Mapping(entries) => {
            for (key, value) in entries {
                let child = join(path, key);
                out.push(child.clone());
                expected_paths(value, &child, out);
            }
        }
        Document::Sequence(items) => {
            for (idx, item) in items.iter().enumerate() {
                let child = format!("{path}[{idx}]");
                if !is_nonempty_collection(item) {
                    out.push(child.clone());
                }
                expected_paths(item, &child, out);
            }
        }
        _ => {}
    }
}

fn encode(doc: &Document) -> String {
    BlockEncoder.encode(doc, 2).unwrap()
}

#[test]
fn test_scalar_array() {
    let doc = Document::from_yaml_str("vars:\n  items: [scalar1, scalar2]\n").unwrap();
    assert_eq!(
        key_paths(&encode(&doc)),
        vec!["vars", "vars.items", "vars.items[0]", "vars.items[1]"]
    );
}

#[test]
fn test_array_of_maps() {
    let doc = Document::from_yaml_str(
        "vars:\n  items:\n    - {name: a, color: red}\n    - {name: b, color: blue}\n",
    )
    .unwrap();
    assert_eq!(
        key_paths(&encode(&doc)),
        vec![
            "vars",
            "vars.items",
            "vars.items[0].name",
            "vars.items[0].color",
            "vars.items[1].name",
            "vars.items[1].color",
        ]
    );
}

#[test]
fn test_root_array_of_maps_with_nested_maps() {
    let text = "\
- kind: Service
  metadata:
    name: web
- kind: Deployment
  metadata:
    name: api
- kind: Secret
  metadata:
    name: token
";
    let paths: Vec<String> = key_paths(text)
        .into_iter()
        .filter(|p| p.ends_with(".metadata.name"))
        .collect();
    assert_eq!(
        paths,
        vec!["[0].metadata.name", "[1].metadata.name", "[2].metadata.name"]
    );
}

#[test]
fn test_root_elements_opening_with_nested_map() {
    let text = "\
- metadata:
    name: web
    id: 1
- metadata:
    name: api
    id: 2
- metadata:
    name: token
    id: 3
";
    assert_eq!(
        key_paths(text),
        vec![
            "[0].metadata",
            "[0].metadata.name",
            "[0].metadata.id",
            "[1].metadata",
            "[1].metadata.name",
            "[1].metadata.id",
            "[2].metadata",
            "[2].metadata.name",
            "[2].metadata.id",
        ]
    );
}

#[test]
fn test_compact_sequences_from_serde_yaml() {
    let doc = Document::from_yaml_str(
        "vars:\n  tags:\n    - {name: a, roles: [x, y]}\n    - b\n  owner: ops\nnext: 1\n",
    )
    .unwrap();
    let text = serde_yaml::to_string(&doc).unwrap();
    assert!(text.contains("\n  - name: a"), "expected compact output:\n{text}");
    assert_eq!(
        key_paths(&text),
        vec![
            "vars",
            "vars.tags",
            "vars.tags[0].name",
            "vars.tags[0].roles",
            "vars.tags[0].roles[0]",
            "vars.tags[0].roles[1]",
            "vars.tags[1]",
            "vars.owner",
            "next",
        ]
    );
}

#[test]
fn test_sibling_sequences_count_independently() {
    let text = "a:\n  - x\n  - y\nb:\n  - z\n";
    assert_eq!(key_paths(text), vec!["a", "a[0]", "a[1]", "b", "b[0]"]);
}

#[test]
fn test_wider_indent() {
    let doc = Document::from_yaml_str("a:\n  b:\n    - {x: 1, y: 2}\n").unwrap();
    let text = BlockEncoder.encode(&doc, 4).unwrap();
    assert_eq!(key_paths(&text), vec!["a", "a.b", "a.b[0].x", "a.b[0].y"]);
}

#[test]
fn test_highlighted_matches_plain() {
    let doc = Document::from_yaml_str(
        "vars:\n  tags: {team: core}\n  list: [1, two, null]\n  script: \"a\\nb\\n\"\n",
    )
    .unwrap();
    let plain = encode(&doc);
    let styled = YamlHighlighter.highlight(&plain).unwrap();
    let plain_lines: Vec<&str> = plain.lines().collect();
    let styled_lines: Vec<&str> = styled.lines().collect();
    assert_eq!(build_path_map(&styled_lines), build_path_map(&plain_lines));
}

fn scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::Null),
        any::<bool>().prop_map(Document::Bool),
        any::<i64>().prop_map(Document::from),
        "[a-z ]{0,12}".prop_map(Document::String),
        "[a-z]{1,5}\n[a-z]{1,5}".prop_map(Document::String),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Document::Sequence),
            prop::collection::vec(("[a-z][a-z0-9_]{0,6}", inner), 0..5)
                .prop_map(Document::mapping),
        ]
    })
}

proptest! {
    #[test]
    fn key_lines_follow_document_order(doc in document().prop_filter("collection root", is_nonempty_collection)) {
        let text = encode(&doc);
        let mut expected = Vec::new();
        expected_paths(&doc, "", &mut expected);
        prop_assert_eq!(key_paths(&text), expected);
    }

    #[test]
    fn every_nonblank_line_is_addressed(doc in document().prop_filter("collection root", is_nonempty_collection)) {
        let text = encode(&doc);
        let lines: Vec<&str> = text.lines().collect();
        let map = build_path_map(&lines);
        for (idx, line) in lines.iter().enumerate() {
            if !line.trim().is_empty() {
                let addr = map.get(idx);
                prop_assert!(addr.is_some(), "line {} unaddressed: {:?}", idx, line);
                prop_assert!(addr.is_some_and(|a| !a.path.is_empty()));
            }
        }
    }

    #[test]
    fn compact_rendering_follows_document_order(doc in document().prop_filter("collection root", is_nonempty_collection)) {
        let text = serde_yaml::to_string(&doc).unwrap();
        let mut expected = Vec::new();
        expected_paths(&doc, "", &mut expected);
        prop_assert_eq!(key_paths(&text), expected);
    }

    #[test]
    fn reconstruction_is_idempotent(doc in document()) {
        let text = encode(&doc);
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(build_path_map(&lines), build_path_map(&lines));
    }
}
