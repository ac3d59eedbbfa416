//! Normalizer integration harness.
//!
//! # What this covers
//!
//! - **Search rows**: required variables, optional `?lexicons`, POS labels
//!   through the lookup table with last-segment fallback.
//! - **Order**: rows come out in endpoint order, never re-sorted.
//! - **Option lists**: labelled through the category table.
//! - **Lemma bank**: NUL-separated forms are split.
//! - **Describe**: predicate/object pairs keep the full RDF term.
//! - **Decode errors**: malformed bodies and missing variables.
//!
//! # Running
//!
//! ```sh
//! cargo test --test normalization_harness
//! ```

mod common;
use common::*;

use liita_core::normalizer::{
    normalize_lemma_hits, normalize_options, normalize_predicates, normalize_relation_options,
    normalize_results, parse_results,
};
use liita_core::{DecodeError, FilterCategory, Term, TermKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Search rows
// ---------------------------------------------------------------------------

#[test]
fn search_rows_become_records() {
    let records = normalize_results(&parse_fixture(SEARCH_RESPONSE)).unwrap();
    assert_forms!(records, ["amare", "ambire"]);

    let first = &records[0];
    assert_eq!(first.subject, AMARE);
    assert_eq!(first.pos, "Verb");
    assert_eq!(first.pos_uri, VERB);
    assert_eq!(
        first.lexicon_list().collect::<Vec<_>>(),
        vec!["http://liita.it/data/id/lexicon/DigItApp", "http://liita.it/data/id/lexicon/Sentix"]
    );
}

#[test]
fn unbound_lexicons_are_empty() {
    let records = normalize_results(&parse_fixture(SEARCH_RESPONSE)).unwrap();
    assert_eq!(records[1].subject, AMBIRE);
    assert_eq!(records[1].lexicons, "");
    assert_eq!(records[1].lexicon_list().count(), 0);
}

#[test]
fn unknown_pos_falls_back_to_last_segment() {
    let records = normalize_results(&parse_fixture(UNKNOWN_POS_RESPONSE)).unwrap();
    assert_eq!(records[0].pos, "symbol");
}

#[test]
fn endpoint_order_is_kept() {
    let results = ResultsBuilder::new()
        .search_row("http://liita.it/data/id/lemma/3", "zuppa", NOUN, "")
        .search_row("http://liita.it/data/id/lemma/1", "abaco", NOUN, "")
        .search_row("http://liita.it/data/id/lemma/2", "mela", NOUN, "")
        .build();
    let records = normalize_results(&results).unwrap();
    assert_forms!(records, ["zuppa", "abaco", "mela"]);
}

#[test]
fn zero_rows_is_empty() {
    assert!(normalize_results(&parse_fixture(EMPTY_RESPONSE)).unwrap().is_empty());
}

#[test]
fn multiple_forms_split_on_whitespace() {
    let results = ResultsBuilder::new().search_row(AMARE, "amare amar", VERB, "").build();
    let records = normalize_results(&results).unwrap();
    assert_eq!(records[0].forms().collect::<Vec<_>>(), vec!["amare", "amar"]);
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

#[test]
fn missing_required_variable_names_row_and_variable() {
    let err = normalize_results(&parse_fixture(MISSING_SUBJECT_RESPONSE)).unwrap_err();
    assert!(matches!(err, DecodeError::MissingVariable { row: 0, variable: "subject" }));
    assert_eq!(err.to_string(), "row 0 has no binding for ?subject");
}

#[rstest]
#[case::html(NOT_JSON_RESPONSE)]
#[case::empty("")]
#[case::no_results(r#"{"head": {}}"#)]
#[case::bindings_not_array(r#"{"head": {}, "results": {"bindings": {}}}"#)]
fn malformed_bodies_are_decode_errors(#[case] body: &str) {
    let err = parse_results(body.as_bytes()).unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)));
    assert!(err.to_string().starts_with("response is not valid SPARQL JSON results"));
}

// ---------------------------------------------------------------------------
// Option lists
// ---------------------------------------------------------------------------

#[test]
fn pos_options_are_labelled() {
    let options = normalize_options(FilterCategory::PartOfSpeech, &parse_fixture(POS_OPTIONS_RESPONSE)).unwrap();
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Adjective", "Noun", "symbol"]);
    assert_eq!(options[1].value, NOUN);
}

#[test]
fn relation_options_use_the_matching_category() {
    let results = parse_fixture(POS_OPTIONS_RESPONSE);
    let by_relation = normalize_relation_options(liita_core::vocab::HAS_POS, &results).unwrap();
    let by_category = normalize_options(FilterCategory::PartOfSpeech, &results).unwrap();
    assert_eq!(by_relation, by_category);

    let other = normalize_relation_options("http://example.org/hasThing", &results).unwrap();
    assert_eq!(other[0].label, "adjective");
}

// ---------------------------------------------------------------------------
// Lemma bank and describe
// ---------------------------------------------------------------------------

#[test]
fn lemma_bank_forms_are_split_on_nul() {
    let hits = normalize_lemma_hits(&parse_fixture(LEMMA_BANK_RESPONSE)).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].upos, "VERB");
    assert_eq!(hits[0].written_representations, vec!["amare", "amar"]);
    assert_eq!(hits[1].upos, "NOUN");
    assert_eq!(hits[1].written_representations, vec!["amore"]);
}

#[test]
fn describe_rows_keep_terms() {
    let rows = normalize_predicates(&parse_fixture(DESCRIBE_RESPONSE)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].object.kind, TermKind::Literal);
    assert_eq!(rows[0].object.lang.as_deref(), Some("it"));
    assert_eq!(rows[1].object, Term::uri(VERB));
}
