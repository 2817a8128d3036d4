/*
 * renderers.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end rendering of documents with provenance.
 */

use lineage_provenance::{ProvenanceEntry, ProvenanceKind, ProvenanceLog, ProvenanceStore};
use lineage_render::{AllowList, ProvenanceRenderer, RenderConfig};
use lineage_yaml::{BlockEncoder, Document, DocumentEncoder};

const DOCUMENT: &str = "\
imports:
  - catalog/vpc
vars:
  stage: dev
  region: us-east-2
  owner: platform
  cidr: 10.0.0.0/16
settings: {}
";

fn entry(file: &str, line: usize, kind: ProvenanceKind, depth: usize) -> ProvenanceEntry {
    ProvenanceEntry::new(file, line, kind, depth)
}

/// Provenance as a merge of `orgs/acme/dev.yaml` importing `catalog/vpc.yaml`
/// would record it, with some paths at component scope.
fn merged_store() -> ProvenanceLog {
    use ProvenanceKind::*;
    [
        ("imports", entry("stacks/orgs/acme/dev.yaml", 1, Inline, 0)),
        ("imports[0]", entry("stacks/orgs/acme/dev.yaml", 2, Inline, 0)),
        ("vars", entry("stacks/catalog/vpc.yaml", 3, Import, 1)),
        ("components.terraform.vpc.vars.stage", entry("stacks/orgs/acme/dev.yaml", 5, Inline, 0)),
        ("components.terraform.vpc.vars.stage", entry("stacks/catalog/vpc.yaml", 4, Import, 1)),
        ("terraform.vars.region", entry("stacks/mixins/region.yaml", 2, Import, 2)),
        ("vars.cidr", ProvenanceEntry::computed(0)),
    ]
    .into_iter()
    .collect()
}

fn document() -> Document {
    Document::from_yaml_str(DOCUMENT).unwrap()
}

fn plain() -> ProvenanceRenderer {
    ProvenanceRenderer::new(RenderConfig::plain())
}

#[test]
fn test_inline_annotates_key_lines() {
    let mut store = merged_store();
    let out = plain().render_inline(document(), &mut store, Some("orgs/acme/dev.yaml"));
    insta::assert_snapshot!(out, @r"
    # Provenance Legend:
    #   ● [0] Defined in this file
    #   ○ [N] Inherited/imported (N levels deep)
    #   ∴ Computed/templated
    # Describing: orgs/acme/dev.yaml

    import:                                           # ● [0] orgs/acme/dev.yaml:1
      - catalog/vpc                                   # ● [0] orgs/acme/dev.yaml:2
    vars:                                             # ○ [1] catalog/vpc.yaml:3
      stage: dev                                      # ● [0] orgs/acme/dev.yaml:5
      region: us-east-2                               # ○ [2] mixins/region.yaml:2
      owner: platform
      cidr: 10.0.0.0/16                               # ∴ [0] <computed>
    ");
}

#[test]
fn test_inline_rename_migrates_provenance() {
    let mut store = merged_store();
    plain().render_inline(document(), &mut store, None);
    assert_eq!(store.winner("import").unwrap().source_line, 1);
    assert_eq!(store.winner("import[0]").unwrap().source_line, 2);
}

#[test]
fn test_inline_disabled_store_renders_whole_document() {
    let mut store = merged_store();
    store.set_enabled(false);
    let out = plain().render_inline(document(), &mut store, None);

    let body: Vec<&str> = out.lines().skip(5).collect();
    let expected = BlockEncoder.encode(&document(), 2).unwrap();
    assert_eq!(body, expected.lines().collect::<Vec<_>>());
    assert!(body.contains(&"imports:"));
    assert!(body.contains(&"settings: {}"));
    assert!(!body.iter().any(|line| line.contains('#')));
}

#[test]
fn test_inline_folds_long_strings() {
    let mut config = RenderConfig::plain();
    config.comment_column = 40;
    let doc = Document::mapping([(
        "description",
        Document::from("a rather long description that will not fit before the comments"),
    )]);
    let mut store: ProvenanceLog = [(
        "description",
        entry("stacks/orgs/acme/dev.yaml", 7, ProvenanceKind::Inline, 0),
    )]
    .into_iter()
    .collect();

    let out = ProvenanceRenderer::new(config).render_inline(doc, &mut store, None);
    let body: Vec<&str> = out.lines().skip(5).collect();
    assert!(body[0].starts_with("description: >-"));
    assert!(body[0].ends_with("# ● [0] orgs/acme/dev.yaml:7"));
    // continuation lines carry no comment
    assert!(body.len() > 2);
    assert!(body[1..].iter().all(|line| !line.contains('#')));
}

#[test]
fn test_inline_long_key_line_comment_moves_below() {
    let mut config = RenderConfig::plain();
    config.comment_column = 12;
    let doc = Document::from_yaml_str("a_very_long_key_name: 1\n").unwrap();
    let mut store: ProvenanceLog = [(
        "a_very_long_key_name",
        entry("x.yaml", 1, ProvenanceKind::Inline, 0),
    )]
    .into_iter()
    .collect();
    let out = ProvenanceRenderer::new(config).render_inline(doc, &mut store, None);
    let body: Vec<&str> = out.lines().skip(5).collect();
    assert_eq!(
        body,
        vec!["a_very_long_key_name: 1", "            # ● [0] x.yaml:1"]
    );
}

#[test]
fn test_inline_colored_output_strips_to_plain() {
    let mut colored_store = merged_store();
    let mut plain_store = merged_store();
    let colored = ProvenanceRenderer::default().render_inline(document(), &mut colored_store, None);
    let plain = plain().render_inline(document(), &mut plain_store, None);
    assert_eq!(lineage_render::styled::strip_styling(&colored), plain);
}

#[test]
fn test_tree_with_allow_list() {
    let allow: AllowList = ["vars", "terraform.vars.region"].into_iter().collect();
    let out = plain().render_tree(&merged_store(), Some(&allow));
    insta::assert_snapshot!(out, @r"
    Provenance
    ────────────────────────────────────────────────────────────
    stacks/
    ├── stacks/catalog/vpc.yaml
    │  └─ ○ :3   vars
    └── stacks/mixins/region.yaml
       └─ ○ :2   terraform.vars.region
    ");
}

#[test]
fn test_side_by_side_rows_are_balanced() {
    let store = merged_store();
    let doc = document();
    let out = plain().render_side_by_side(&doc, &store, 40);

    let left = BlockEncoder.encode(&doc, 2).unwrap().lines().count();
    let right = plain().render_tree(&store, None).lines().count() - 2;
    let rows: Vec<&str> = out.lines().skip(2).collect();
    assert_eq!(rows.len(), left.max(right));
    assert!(rows.iter().all(|row| row.trim() != "│"));
    assert!(out.lines().next().unwrap().starts_with("Configuration"));
}

#[test]
fn test_side_by_side_disabled_store_shows_document_only() {
    let mut store = merged_store();
    store.set_enabled(false);
    let out = plain().render_side_by_side(&document(), &store, 30);
    let rows: Vec<&str> = out.lines().skip(2).collect();
    assert_eq!(rows.len(), DOCUMENT.lines().count());
    assert!(rows.iter().all(|row| row.ends_with('│')));
}
