use atoll_core::{CategoryStore, LabelMode, islands};
use atoll_test_support::fixtures::{FLAT_TAXONOMY, LINKED_TAXONOMY};

use crate::errors::MemoryStoreError;
use crate::ingest::{TaxonomyDoc, TaxonomyError};

#[test]
fn parses_and_builds_the_flat_fixture() {
    let store = TaxonomyDoc::from_json_str(FLAT_TAXONOMY)
        .expect("document parses")
        .into_store()
        .expect("document resolves");
    assert_eq!(store.len(), 6);
    assert!(store.similarities().is_empty());
}

#[test]
fn linked_fixture_collapses_into_one_island() {
    let store = TaxonomyDoc::from_json_str(LINKED_TAXONOMY)
        .expect("document parses")
        .into_store()
        .expect("document resolves");
    let root = store.get(store.root()).expect("root exists");
    let result = islands(&store, store.root(), &root, LabelMode::ByName);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].len(), 8);
}

#[test]
fn missing_sections_default_to_empty() {
    let store = TaxonomyDoc::from_json_str(r#"{ "root": "root" }"#)
        .expect("document parses")
        .into_store()
        .expect("document resolves");
    assert_eq!(store.len(), 1);
}

#[test]
fn rejects_malformed_json() {
    let err = TaxonomyDoc::from_json_str("{").expect_err("must fail");
    assert!(matches!(err, TaxonomyError::Json(_)));
}

#[test]
fn rejects_unknown_parents() {
    let err = TaxonomyDoc::from_json_str(
        r#"{ "root": "root", "categories": [ { "name": "A", "parent": "Missing" } ] }"#,
    )
    .expect("document parses")
    .into_store()
    .expect_err("parent must resolve");
    assert!(matches!(err, TaxonomyError::UnknownParent { .. }));
}

#[test]
fn rejects_unknown_similarity_endpoints() {
    let err = TaxonomyDoc::from_json_str(
        r#"{ "root": "root", "categories": [ { "name": "A" } ], "similarities": [["A", "B"]] }"#,
    )
    .expect("document parses")
    .into_store()
    .expect_err("endpoint must resolve");
    assert!(matches!(err, TaxonomyError::UnknownEndpoint { .. }));
}

#[test]
fn propagates_store_validation() {
    let err = TaxonomyDoc::from_json_str(
        r#"{
            "root": "root",
            "categories": [ { "name": "A" }, { "name": "B" } ],
            "similarities": [["A", "B"], ["B", "A"]]
        }"#,
    )
    .expect("document parses")
    .into_store()
    .expect_err("mirror duplicate must be rejected");
    assert!(matches!(
        err,
        TaxonomyError::Store(MemoryStoreError::DuplicateSimilarity { .. }),
    ));
}
