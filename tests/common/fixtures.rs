//! Canned `application/sparql-results+json` bodies.
//!
//! Shapes follow what the LiITA endpoint returns for each query; rows are in
//! endpoint order, which the normalizer must keep.

pub const VERB: &str = "http://lila-erc.eu/ontologies/lila/verb";
pub const NOUN: &str = "http://lila-erc.eu/ontologies/lila/noun";
pub const FEMININE: &str = "http://lila-erc.eu/ontologies/lila/feminine";
pub const C1: &str = "http://liita.it/ontologies/liita/c1";

pub const AMARE: &str = "http://liita.it/data/id/lemma/7013";
pub const AMBIRE: &str = "http://liita.it/data/id/lemma/7102";

/// Two search rows; the second has no lexical entry so `?lexicons` is
/// unbound.
pub const SEARCH_RESPONSE: &str = r#"{
  "head": { "vars": ["subject", "wrs", "pos", "lexicons"] },
  "results": { "bindings": [
    {
      "subject":  { "type": "uri", "value": "http://liita.it/data/id/lemma/7013" },
      "wrs":      { "type": "literal", "value": "amare" },
      "pos":      { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/verb" },
      "lexicons": { "type": "literal", "value": "http://liita.it/data/id/lexicon/DigItApp http://liita.it/data/id/lexicon/Sentix" }
    },
    {
      "subject":  { "type": "uri", "value": "http://liita.it/data/id/lemma/7102" },
      "wrs":      { "type": "literal", "value": "ambire" },
      "pos":      { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/verb" }
    }
  ] }
}"#;

/// A row whose part of speech is missing from the label table.
pub const UNKNOWN_POS_RESPONSE: &str = r#"{
  "head": { "vars": ["subject", "wrs", "pos", "lexicons"] },
  "results": { "bindings": [
    {
      "subject":  { "type": "uri", "value": "http://liita.it/data/id/lemma/1" },
      "wrs":      { "type": "literal", "value": "boh" },
      "pos":      { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/symbol" },
      "lexicons": { "type": "literal", "value": "" }
    }
  ] }
}"#;

pub const EMPTY_RESPONSE: &str = r#"{
  "head": { "vars": ["subject", "wrs", "pos", "lexicons"] },
  "results": { "bindings": [] }
}"#;

/// Search row without `?subject`.
pub const MISSING_SUBJECT_RESPONSE: &str = r#"{
  "head": { "vars": ["subject", "wrs", "pos", "lexicons"] },
  "results": { "bindings": [
    { "wrs": { "type": "literal", "value": "amare" },
      "pos": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/verb" } }
  ] }
}"#;

pub const NOT_JSON_RESPONSE: &str = "<html><body>Virtuoso 37000 Error</body></html>";

/// Option values for `hasPOS`, one of them unknown to the label table.
pub const POS_OPTIONS_RESPONSE: &str = r#"{
  "head": { "vars": ["object", "label"] },
  "results": { "bindings": [
    { "object": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/adjective" },
      "label":  { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/adjective" } },
    { "object": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/noun" },
      "label":  { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/noun" } },
    { "object": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/symbol" },
      "label":  { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/symbol" } }
  ] }
}"#;

/// Lemma-bank rows; written forms are NUL separated.
pub const LEMMA_BANK_RESPONSE: &str = r#"{
  "head": { "vars": ["uri", "uposUri", "label", "wrs"] },
  "results": { "bindings": [
    { "uri":     { "type": "uri", "value": "http://liita.it/data/id/lemma/7013" },
      "uposUri": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/verb" },
      "label":   { "type": "literal", "value": "amare" },
      "wrs":     { "type": "literal", "value": "amare\u0000amar" } },
    { "uri":     { "type": "uri", "value": "http://liita.it/data/id/lemma/9001" },
      "uposUri": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/noun" },
      "label":   { "type": "literal", "value": "amore" },
      "wrs":     { "type": "literal", "value": "amore" } }
  ] }
}"#;

pub const DESCRIBE_RESPONSE: &str = r#"{
  "head": { "vars": ["predicate", "object"] },
  "results": { "bindings": [
    { "predicate": { "type": "uri", "value": "http://www.w3.org/2000/01/rdf-schema#label" },
      "object":    { "type": "literal", "value": "amare", "xml:lang": "it" } },
    { "predicate": { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/hasPOS" },
      "object":    { "type": "uri", "value": "http://lila-erc.eu/ontologies/lila/verb" } }
  ] }
}"#;
