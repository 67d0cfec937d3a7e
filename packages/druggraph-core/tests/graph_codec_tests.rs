//! JSON persistence tests
//!
//! Round-trips through values, text and files, plus rejection of malformed
//! documents.

use chrono::NaiveDate;
use druggraph_core::{
    BuilderConfig, DocumentRecord, DrugRecord, ErrorKind, Graph, GraphBuilder, MentionType,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn built_graph() -> Graph {
    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    GraphBuilder::with_config(BuilderConfig::default().propagate_to_journals(true))
        .build_graph(
            &[DrugRecord::new("aspirin"), DrugRecord::new("atropine")],
            &[
                DocumentRecord::new("1", "aspirin and atropine", date, "lancet"),
                DocumentRecord::new("2", "nothing", date, "nature"),
            ],
            &[DocumentRecord::new("NCT1", "atropine trial", date, "nature")],
        )
        .unwrap()
}

#[test]
fn test_value_roundtrip() {
    let graph = built_graph();
    let back = Graph::from_value(graph.to_value().unwrap()).unwrap();

    assert_eq!(back, graph);
    assert_eq!(back.id_state(), graph.id_state());
    assert_eq!(back.journals_lookup(), graph.journals_lookup());
}

#[test]
fn test_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("graph.json");

    let graph = built_graph();
    graph.save_json(&path).unwrap();
    let back = Graph::load_json(&path).unwrap();

    assert_eq!(back, graph);
    let mentions = back.get_drugs_mentions(&["atropine"]);
    assert!(mentions["atropine"]
        .iter()
        .any(|l| l.mention_type == MentionType::Journal));
}

#[test]
fn test_reloaded_graph_keeps_allocating_after_state() {
    let graph = built_graph();
    let mut back = Graph::from_json(&graph.to_json().unwrap()).unwrap();
    assert_eq!(back.get_id_and_increment(), graph.id_state());
}

#[test]
fn test_nodes_and_links_in_id_order() {
    let value = built_graph().to_value().unwrap();
    let ids = |key: &str| -> Vec<u64> {
        value[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_u64().unwrap())
            .collect()
    };
    let nodes = ids("nodes");
    let links = ids("links");
    assert!(nodes.windows(2).all(|w| w[0] < w[1]));
    assert!(links.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_graph_roundtrip() {
    let value = Graph::new().to_value().unwrap();
    assert_eq!(value, json!({"id_state": 0, "nodes": [], "links": []}));
    assert_eq!(Graph::from_value(value).unwrap(), Graph::new());
}

#[test]
fn test_unknown_type_rejected() {
    let err = Graph::from_value(json!({
        "id_state": 1,
        "nodes": [{"type": "molecule", "id": 0, "name": "x"}],
        "links": []
    }))
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
}

#[test]
fn test_missing_field_rejected() {
    let err = Graph::from_value(json!({
        "id_state": 1,
        "nodes": [{"type": "publication", "id": 0, "title": "t", "date": "2020-01-01"}],
        "links": []
    }))
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert!(err.message.contains("base_id"));
}

#[test]
fn test_missing_id_state_rejected() {
    let err = Graph::from_value(json!({"nodes": [], "links": []})).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
}

#[test]
fn test_exhausted_id_state_rejected() {
    let err = Graph::from_json(r#"{"id_state": 18446744073709551615, "nodes": [], "links": []}"#)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert!(err.message.contains("id_state"));
}

#[test]
fn test_largest_usable_id_state_accepted() {
    let mut graph =
        Graph::from_json(r#"{"id_state": 18446744073709551614, "nodes": [], "links": []}"#)
            .unwrap();
    assert_eq!(graph.get_id_and_increment(), u64::MAX - 1);
    assert_eq!(graph.id_state(), u64::MAX);
}

#[test]
fn test_duplicate_id_rejected() {
    let err = Graph::from_value(json!({
        "id_state": 2,
        "nodes": [
            {"type": "drug", "id": 0, "name": "a"},
            {"type": "drug", "id": 0, "name": "b"}
        ],
        "links": []
    }))
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateIdentifier);
}

#[test]
fn test_duplicate_journal_name_rejected() {
    let err = Graph::from_value(json!({
        "id_state": 2,
        "nodes": [
            {"type": "journal", "id": 0, "name": "lancet"},
            {"type": "journal", "id": 1, "name": "lancet"}
        ],
        "links": []
    }))
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateIdentifier);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Graph::load_json(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IO);
}

#[test]
fn test_load_invalid_json_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = Graph::load_json(&path).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
}
