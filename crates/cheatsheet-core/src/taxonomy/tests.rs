use serde_json::json;

use super::*;
use crate::error::CheatsheetError;

fn sample_taxonomy() -> Taxonomy {
    Taxonomy::from_paths([
        vec!["Computers", "Programming", "Python", "Testing"],
        vec!["Computers", "Shell", "Bash"],
    ])
}

fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(ToString::to_string).collect()
}

#[test]
fn ensure_path_exists_creates_every_prefix() {
    let mut taxonomy = Taxonomy::new();
    taxonomy.ensure_path_exists(&["Computers", "VCS", "Git"]);

    assert!(taxonomy.contains_path(&["Computers"]));
    assert!(taxonomy.contains_path(&["Computers", "VCS"]));
    assert!(taxonomy.contains_path(&["Computers", "VCS", "Git"]));
    assert_eq!(taxonomy.len(), 3);
}

#[test]
fn ensure_path_exists_is_idempotent() {
    let mut taxonomy = Taxonomy::new();
    let first = taxonomy.ensure_path_exists(&["Computers", "VCS"]);
    let second = taxonomy.ensure_path_exists(&["Computers", "VCS"]);

    assert_eq!(first, second);
    assert_eq!(taxonomy.len(), 2);
    assert_eq!(taxonomy.get_children(&["Computers"]), vec!["VCS"]);
}

#[test]
fn ensure_path_exists_with_empty_path_returns_root() {
    let mut taxonomy = Taxonomy::new();
    let empty: [&str; 0] = [];
    assert_eq!(taxonomy.ensure_path_exists(&empty), NodeId::ROOT);
    assert!(taxonomy.is_empty());
}

#[test]
fn get_children_lists_root_keywords_for_empty_path() {
    let taxonomy = sample_taxonomy();
    let root: [&str; 0] = [];
    assert_eq!(taxonomy.get_children(&root), vec!["Computers"]);
    assert_eq!(
        taxonomy.get_children(&["Computers"]),
        vec!["Programming", "Shell"]
    );
}

#[test]
fn get_children_of_unknown_path_is_empty() {
    let taxonomy = sample_taxonomy();
    assert!(taxonomy.get_children(&["Computers", "Nope"]).is_empty());
    assert!(taxonomy.get_children(&["Nope"]).is_empty());
}

#[test]
fn get_children_preserves_creation_order() {
    let mut taxonomy = Taxonomy::new();
    taxonomy.ensure_path_exists(&["Zeta"]);
    taxonomy.ensure_path_exists(&["Alpha"]);
    taxonomy.ensure_path_exists(&["Mid"]);
    let root: [&str; 0] = [];
    assert_eq!(taxonomy.get_children(&root), vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn is_prefix_handles_empty_equal_and_longer_prefixes() {
    let full = path(&["Computers", "VCS", "Git"]);
    let empty: [&str; 0] = [];
    assert!(is_prefix(&empty, &full));
    assert!(is_prefix(&full, &full));
    assert!(is_prefix(&["Computers", "VCS"], &full));
    assert!(!is_prefix(&["Computers", "Shell"], &full));
    assert!(!is_prefix(&["Computers", "VCS", "Git", "Rebase"], &full));
    assert!(!is_prefix(&["VCS"], &full));
}

#[test]
fn path_of_reconstructs_root_first_path() {
    let taxonomy = sample_taxonomy();
    let id = taxonomy
        .resolve(&["Computers", "Shell", "Bash"])
        .expect("bash node");
    assert_eq!(
        taxonomy.path_of(id).expect("live node"),
        path(&["Computers", "Shell", "Bash"])
    );
    assert_eq!(taxonomy.path_of(NodeId::ROOT), Some(Vec::new()));
}

#[test]
fn all_paths_walks_depth_first_in_creation_order() {
    let taxonomy = sample_taxonomy();
    assert_eq!(
        taxonomy.all_paths(),
        vec![
            path(&["Computers"]),
            path(&["Computers", "Programming"]),
            path(&["Computers", "Programming", "Python"]),
            path(&["Computers", "Programming", "Python", "Testing"]),
            path(&["Computers", "Shell"]),
            path(&["Computers", "Shell", "Bash"]),
        ]
    );
}

#[test]
fn taxonomy_serializes_to_nested_objects() {
    let taxonomy = sample_taxonomy();
    let value = serde_json::to_value(&taxonomy).expect("serialize taxonomy");
    assert_eq!(
        value,
        json!({
            "Computers": {
                "Programming": { "Python": { "Testing": {} } },
                "Shell": { "Bash": {} }
            }
        })
    );
}

#[test]
fn taxonomy_deserialization_preserves_document_key_order() {
    let raw = r#"{"Zeta": {"b": {}, "a": {}}, "Alpha": {}}"#;
    let taxonomy: Taxonomy = serde_json::from_str(raw).expect("parse taxonomy");
    let root: [&str; 0] = [];
    assert_eq!(taxonomy.get_children(&root), vec!["Zeta", "Alpha"]);
    assert_eq!(taxonomy.get_children(&["Zeta"]), vec!["b", "a"]);
    assert_eq!(serde_json::to_string(&taxonomy).expect("serialize"), raw.replace(' ', ""));
}

#[test]
fn taxonomy_deserialization_rejects_non_object_nodes() {
    assert!(serde_json::from_str::<Taxonomy>(r#"{"Computers": null}"#).is_err());
    assert!(serde_json::from_str::<Taxonomy>(r#"["Computers"]"#).is_err());
}

#[test]
fn rename_node_keeps_position_and_subtree() {
    let mut taxonomy = sample_taxonomy();
    taxonomy
        .rename_node(&["Computers", "Programming"], "Coding")
        .expect("rename");

    assert_eq!(taxonomy.get_children(&["Computers"]), vec!["Coding", "Shell"]);
    assert!(taxonomy.contains_path(&["Computers", "Coding", "Python", "Testing"]));
    assert!(!taxonomy.contains_path(&["Computers", "Programming"]));
}

#[test]
fn rename_node_rejects_sibling_conflict() {
    let mut taxonomy = sample_taxonomy();
    let err = taxonomy
        .rename_node(&["Computers", "Programming"], "Shell")
        .expect_err("sibling exists");
    assert!(matches!(err, CheatsheetError::Conflict(_)));
    assert!(taxonomy.contains_path(&["Computers", "Programming"]));
}

#[test]
fn rename_node_rejects_unknown_root_and_blank_inputs() {
    let mut taxonomy = sample_taxonomy();
    let root: [&str; 0] = [];
    assert!(matches!(
        taxonomy.rename_node(&["Nope"], "Other"),
        Err(CheatsheetError::NotFound(_))
    ));
    assert!(matches!(
        taxonomy.rename_node(&root, "Other"),
        Err(CheatsheetError::Validation(_))
    ));
    assert!(matches!(
        taxonomy.rename_node(&["Computers"], "   "),
        Err(CheatsheetError::Validation(_))
    ));
}

#[test]
fn rename_node_to_same_keyword_is_noop() {
    let mut taxonomy = sample_taxonomy();
    let before = taxonomy.clone();
    taxonomy
        .rename_node(&["Computers", "Shell"], "Shell")
        .expect("noop rename");
    assert_eq!(taxonomy, before);
}

#[test]
fn merge_nodes_reparents_and_merges_overlapping_children() {
    let mut taxonomy = Taxonomy::from_paths([
        vec!["Computers", "Shell", "Bash"],
        vec!["Computers", "Shell", "Zsh"],
        vec!["Computers", "Terminal", "Bash", "Prompt"],
    ]);

    taxonomy
        .merge_nodes(&["Computers", "Terminal"], &["Computers", "Shell"])
        .expect("merge");

    assert!(!taxonomy.contains_path(&["Computers", "Terminal"]));
    assert_eq!(taxonomy.get_children(&["Computers"]), vec!["Shell"]);
    assert_eq!(
        taxonomy.get_children(&["Computers", "Shell"]),
        vec!["Bash", "Zsh"]
    );
    assert!(taxonomy.contains_path(&["Computers", "Shell", "Bash", "Prompt"]));
    assert_eq!(taxonomy.len(), 5);
}

#[test]
fn merge_nodes_into_ancestor_flattens_subtree() {
    let mut taxonomy = Taxonomy::from_paths([vec!["Computers", "Shell", "Bash"]]);
    taxonomy
        .merge_nodes(&["Computers", "Shell"], &["Computers"])
        .expect("merge into parent");
    assert_eq!(taxonomy.get_children(&["Computers"]), vec!["Bash"]);
}

#[test]
fn merge_nodes_rejects_self_descendant_and_missing_paths() {
    let mut taxonomy = sample_taxonomy();
    assert!(matches!(
        taxonomy.merge_nodes(&["Computers"], &["Computers"]),
        Err(CheatsheetError::Validation(_))
    ));
    assert!(matches!(
        taxonomy.merge_nodes(&["Computers"], &["Computers", "Shell"]),
        Err(CheatsheetError::Validation(_))
    ));
    assert!(matches!(
        taxonomy.merge_nodes(&["Nope"], &["Computers"]),
        Err(CheatsheetError::NotFound(_))
    ));
    assert!(matches!(
        taxonomy.merge_nodes(&["Computers", "Shell"], &["Nope"]),
        Err(CheatsheetError::NotFound(_))
    ));
    assert_eq!(taxonomy, sample_taxonomy());
}

#[test]
fn merge_nodes_rejects_root_target() {
    let mut taxonomy = sample_taxonomy();
    let root: [&str; 0] = [];
    assert!(matches!(
        taxonomy.merge_nodes(&["Computers", "Shell"], &root),
        Err(CheatsheetError::Validation(_))
    ));
    assert_eq!(taxonomy, sample_taxonomy());
}

#[test]
fn merged_taxonomy_serializes_without_tombstones() {
    let mut taxonomy = Taxonomy::from_paths([vec!["A", "x"], vec!["B", "y"]]);
    taxonomy.merge_nodes(&["B"], &["A"]).expect("merge");
    let value = serde_json::to_value(&taxonomy).expect("serialize");
    assert_eq!(value, json!({ "A": { "x": {}, "y": {} } }));
}
