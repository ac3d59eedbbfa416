//! Normalizer: maps SPARQL JSON result rows to typed records.
//!
//! Every function here is pure. Row order is preserved exactly as the
//! endpoint returned it; nothing is re-sorted client-side. Zero rows always
//! normalize to an empty `Vec`.

use crate::error::DecodeError;
use crate::lookup::{last_segment, uri_to_upos, FilterCategory, POS_LABELS, uri_to_label};
use crate::types::{Binding, LemmaHit, OptionRecord, PredicateRow, ResultRecord, SparqlResults};

/// Separator used by the lemma-bank query to aggregate written forms.
pub const LEMMA_BANK_SEPARATOR: char = '\u{0}';

/// Parse a response body as SPARQL JSON results.
pub fn parse_results(body: &[u8]) -> Result<SparqlResults, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

fn required<'a>(
    binding: &'a Binding,
    row: usize,
    variable: &'static str,
) -> Result<&'a str, DecodeError> {
    binding
        .get(variable)
        .map(|term| term.value.as_str())
        .ok_or(DecodeError::MissingVariable { row, variable })
}

fn optional<'a>(binding: &'a Binding, variable: &str) -> &'a str {
    binding.get(variable).map(|term| term.value.as_str()).unwrap_or_default()
}

/// Search rows → [`ResultRecord`]s.
///
/// `?subject`, `?wrs` and `?pos` are required. `?lexicons` may be unbound;
/// some endpoints leave an empty aggregate out of the row.
pub fn normalize_results(results: &SparqlResults) -> Result<Vec<ResultRecord>, DecodeError> {
    results
        .results
        .bindings
        .iter()
        .enumerate()
        .map(|(row, binding)| {
            let pos_uri = required(binding, row, "pos")?;
            Ok(ResultRecord {
                subject: required(binding, row, "subject")?.to_string(),
                wrs: required(binding, row, "wrs")?.to_string(),
                pos: uri_to_label(pos_uri, &POS_LABELS).to_string(),
                pos_uri: pos_uri.to_string(),
                lexicons: optional(binding, "lexicons").to_string(),
            })
        })
        .collect()
}

/// Option rows (`?object`) → [`OptionRecord`]s labelled through the
/// category's table.
pub fn normalize_options(
    category: FilterCategory,
    results: &SparqlResults,
) -> Result<Vec<OptionRecord>, DecodeError> {
    option_records(results, |uri| category.label(uri))
}

/// Like [`normalize_options`] for an arbitrary relation; relations that back
/// no category are labelled by their last path segment.
pub fn normalize_relation_options(
    relation: &str,
    results: &SparqlResults,
) -> Result<Vec<OptionRecord>, DecodeError> {
    match FilterCategory::from_relation(relation) {
        Some(category) => normalize_options(category, results),
        None => option_records(results, last_segment),
    }
}

fn option_records(
    results: &SparqlResults,
    label: impl Fn(&str) -> &str,
) -> Result<Vec<OptionRecord>, DecodeError> {
    results
        .results
        .bindings
        .iter()
        .enumerate()
        .map(|(row, binding)| {
            let value = required(binding, row, "object")?;
            Ok(OptionRecord { value: value.to_string(), label: label(value).to_string() })
        })
        .collect()
}

/// Lemma-bank rows → [`LemmaHit`]s, splitting the NUL-joined forms.
pub fn normalize_lemma_hits(results: &SparqlResults) -> Result<Vec<LemmaHit>, DecodeError> {
    results
        .results
        .bindings
        .iter()
        .enumerate()
        .map(|(row, binding)| {
            let wrs = required(binding, row, "wrs")?;
            Ok(LemmaHit {
                uri: required(binding, row, "uri")?.to_string(),
                upos: uri_to_upos(required(binding, row, "uposUri")?).to_string(),
                label: required(binding, row, "label")?.to_string(),
                written_representations: wrs
                    .split(LEMMA_BANK_SEPARATOR)
                    .filter(|form| !form.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
        })
        .collect()
}

/// Describe rows → [`PredicateRow`]s.
pub fn normalize_predicates(results: &SparqlResults) -> Result<Vec<PredicateRow>, DecodeError> {
    results
        .results
        .bindings
        .iter()
        .enumerate()
        .map(|(row, binding)| {
            let predicate = required(binding, row, "predicate")?.to_string();
            let object = binding
                .get("object")
                .cloned()
                .ok_or(DecodeError::MissingVariable { row, variable: "object" })?;
            Ok(PredicateRow { predicate, object })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
