//! GraphBuilder integration tests
//!
//! End-to-end construction from records, checked through the public lookup
//! API only.

use chrono::NaiveDate;
use druggraph_core::{
    BuilderConfig, DocumentRecord, DrugRecord, Graph, GraphBuilder, LinkKind, MentionType, Node,
    NodeKind,
};
use pretty_assertions::assert_eq;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn doc(base_id: &str, title: &str, date: NaiveDate, journal: &str) -> DocumentRecord {
    DocumentRecord::new(base_id, title, date, journal)
}

// ============================================================================
// Basic scenario
// ============================================================================

#[test]
fn test_single_drug_single_publication() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[DrugRecord::new("Aspirin")],
            &[doc("P1", "Aspirin study", ymd(2020, 1, 1), "Nature")],
            &[],
        )
        .unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.link_count(), 2);

    let journal = graph.look_for_journal("Nature").unwrap();
    let published = graph.look_for_journal_link(journal.id);
    assert_eq!(published.len(), 1);

    let publication = graph.node(published[0].node_a).unwrap();
    assert_eq!(publication.kind(), NodeKind::Publication);
    assert_eq!(publication.title(), Some("Aspirin study"));

    let mentions = graph.get_drugs_mentions(&["Aspirin"]);
    assert_eq!(mentions["Aspirin"].len(), 1);
    assert_eq!(mentions["Aspirin"][0].node_b, publication.id());
    assert_eq!(mentions["Aspirin"][0].mention_type, MentionType::Publication);
    assert_eq!(mentions["Aspirin"][0].date, ymd(2020, 1, 1));
}

#[test]
fn test_case_insensitive_mention() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[DrugRecord::new("Aspirin")],
            &[
                doc("1", "Effects of ASPIRIN on headache", ymd(2020, 1, 1), "j"),
                doc("2", "Unrelated topic", ymd(2020, 1, 2), "j"),
            ],
            &[],
        )
        .unwrap();

    let links: Vec<_> = graph.mentioned_links().collect();
    assert_eq!(links.len(), 1);
    assert_eq!(
        graph.node(links[0].node_b).and_then(Node::title),
        Some("Effects of ASPIRIN on headache")
    );
}

// ============================================================================
// Journal deduplication
// ============================================================================

#[test]
fn test_journal_dedup_across_record_kinds() {
    let publications: Vec<_> = (0..5)
        .map(|i| doc(&i.to_string(), &format!("title {}", i), ymd(2020, 1, 1), "lancet"))
        .collect();
    let trials = vec![doc("NCT1", "trial", ymd(2020, 2, 1), "lancet")];

    let graph = GraphBuilder::new()
        .build_graph(&[], &publications, &trials)
        .unwrap();

    assert_eq!(graph.journals().count(), 1);
    assert_eq!(graph.journals_lookup().len(), 1);
    let journal = graph.look_for_journal("lancet").unwrap();
    assert_eq!(graph.look_for_journal_link(journal.id).len(), 6);
}

#[test]
fn test_journal_names_are_exact() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[],
            &[
                doc("1", "a", ymd(2020, 1, 1), "Nature"),
                doc("2", "b", ymd(2020, 1, 1), "nature"),
            ],
            &[],
        )
        .unwrap();
    assert_eq!(graph.journals().count(), 2);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_duplicate_drug_names_kept() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[DrugRecord::new("aspirin"), DrugRecord::new("aspirin")],
            &[doc("1", "aspirin", ymd(2020, 1, 1), "j")],
            &[],
        )
        .unwrap();

    assert_eq!(graph.drugs().count(), 2);
    assert_eq!(graph.mentioned_links().count(), 2);
    assert_eq!(graph.get_drugs_mentions(&["aspirin"])["aspirin"].len(), 2);
}

#[test]
fn test_empty_drug_name_mentions_every_document() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[DrugRecord::new("")],
            &[doc("1", "anything", ymd(2020, 1, 1), "j")],
            &[doc("NCT1", "", ymd(2020, 1, 1), "j")],
        )
        .unwrap();
    assert_eq!(graph.drugs().count(), 1);
    let mentions: Vec<_> = graph.mentioned_links().collect();
    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].mention_type, MentionType::Publication);
    assert_eq!(mentions[1].mention_type, MentionType::ClinicalTrial);
}

#[test]
fn test_ids_unique_and_below_state() {
    let graph = GraphBuilder::new()
        .build_graph(
            &[DrugRecord::new("a"), DrugRecord::new("b")],
            &[doc("1", "a b", ymd(2020, 1, 1), "j")],
            &[doc("2", "b", ymd(2020, 1, 1), "k")],
        )
        .unwrap();

    let mut ids: Vec<_> = graph
        .nodes()
        .map(Node::id)
        .chain(graph.links().map(|l| l.id()))
        .collect();
    ids.sort_unstable();
    let total = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(ids.iter().all(|&id| id < graph.id_state()));
}

#[test]
fn test_parallel_scan_builds_same_graph() {
    let drugs: Vec<_> = (0..300)
        .map(|i| DrugRecord::new(format!("drug{:03}", i)))
        .collect();
    let publications: Vec<_> = (0..50)
        .map(|i| {
            doc(
                &i.to_string(),
                &format!("drug{:03} with drug{:03}", i, i + 100),
                ymd(2021, 1, 1),
                "j",
            )
        })
        .collect();

    let sequential = GraphBuilder::new()
        .build_graph(&drugs, &publications, &[])
        .unwrap();
    let parallel = GraphBuilder::with_config(BuilderConfig::default().parallel(true).min_parallel_drugs(1))
        .build_graph(&drugs, &publications, &[])
        .unwrap();

    assert_eq!(sequential, parallel);
}

// ============================================================================
// Journal mention propagation
// ============================================================================

/// diphenhydramine in 1 publication + 2 trials, all in one journal
fn diphenhydramine_graph(propagate: bool) -> Graph {
    let journal = "journal of emergency nursing";
    let drugs = vec![DrugRecord::new("diphenhydramine"), DrugRecord::new("tetracycline")];
    let publications = vec![doc(
        "1",
        "a 44-year-old man with erythema of the face diphenhydramine, neck, and chest",
        ymd(2019, 1, 1),
        journal,
    )];
    let trials = vec![
        doc(
            "NCT01967433",
            "use of diphenhydramine as an adjunctive sedative for colonoscopy",
            ymd(2020, 1, 1),
            journal,
        ),
        doc(
            "NCT04189588",
            "phase 2 study iv quzyttir™ (cetirizine hydrochloride injection) vs v diphenhydramine",
            ymd(2020, 1, 1),
            journal,
        ),
    ];

    GraphBuilder::with_config(BuilderConfig::default().propagate_to_journals(propagate))
        .build_graph(&drugs, &publications, &trials)
        .unwrap()
}

#[test]
fn test_diphenhydramine_fixture_with_journal_mentions() {
    let graph = diphenhydramine_graph(true);
    let mentions = graph.get_drugs_mentions(&["diphenhydramine"]);
    let links = &mentions["diphenhydramine"];
    assert_eq!(links.len(), 4);

    let count = |t: MentionType| links.iter().filter(|l| l.mention_type == t).count();
    assert_eq!(count(MentionType::Publication), 1);
    assert_eq!(count(MentionType::ClinicalTrial), 2);
    assert_eq!(count(MentionType::Journal), 1);

    // First mention wins: dated from the publication
    let journal_link = links
        .iter()
        .find(|l| l.mention_type == MentionType::Journal)
        .unwrap();
    assert_eq!(journal_link.date, ymd(2019, 1, 1));
    assert_eq!(
        graph.look_for_journal("journal of emergency nursing").map(|j| j.id),
        Some(journal_link.node_b)
    );
}

#[test]
fn test_diphenhydramine_fixture_default_config() {
    let graph = diphenhydramine_graph(false);
    assert_eq!(graph.get_drugs_mentions(&["diphenhydramine"])["diphenhydramine"].len(), 3);
    assert!(graph.get_drugs_mentions(&["tetracycline"])["tetracycline"].is_empty());

    let stats = graph.stats();
    assert_eq!(stats.links_by_kind[&LinkKind::Published], 3);
    assert_eq!(stats.links_by_kind[&LinkKind::Mentioned], 3);
}
