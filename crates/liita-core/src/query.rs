//! Query builder: turns a [`FilterSet`] into SPARQL text.
//!
//! # Search query shape
//!
//! ```text
//! SELECT ?subject ?wrs ?pos ?lexicons            (outer: projection + order)
//!   └─ SELECT … GROUP_CONCAT … GROUP BY …        (inner: grouping)
//!        ├─ one clause group per present filter, fixed order
//!        ├─ POS and written representation of the subject
//!        └─ OPTIONAL lexical entry → lexicon     (left-outer, keeps lexicon-less lemmas)
//! ```
//!
//! Filter clauses come from a fixed list of per-field producers
//! ([`CLAUSE_PRODUCERS`]) applied in [`FilterField::ORDER`], so the text only
//! depends on the field values, never on how the set was assembled.
//!
//! # Escaping
//!
//! Filter IRIs are interpolated verbatim. The lemma pattern is embedded as a
//! SPARQL string literal through [`escape_literal`]: the endpoint's regex
//! engine sees exactly the characters the user typed, and no input can close
//! the literal early.

use crate::lookup::FilterCategory;
use crate::types::{FilterField, FilterSet};
use crate::vocab;
use std::fmt::{self, Write as _};

/// Maximum rows returned by a lemma-bank lookup.
pub const LEMMA_BANK_LIMIT: usize = 100;

/// Variable bound to the written representation matched by the lemma filter.
const LEMMA_VAR: &str = "wrp";

// ---------------------------------------------------------------------------
// QueryText
// ---------------------------------------------------------------------------

/// SPARQL query text, trimmed of leading and trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryText(String);

impl QueryText {
    fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QueryText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// One constraint inside the grouping query, always about `?subject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `?subject <predicate> <object> .`
    Triple { predicate: &'static str, object: String },
    /// `?subject <predicate> ?var .`
    Bind { predicate: &'static str, var: &'static str },
    /// `FILTER regex(?var, "pattern", "i")`
    Regex { var: &'static str, pattern: String },
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Triple { predicate, object } => {
                write!(f, "?subject <{predicate}> <{object}> .")
            }
            Clause::Bind { predicate, var } => write!(f, "?subject <{predicate}> ?{var} ."),
            Clause::Regex { var, pattern } => {
                write!(f, "FILTER regex(?{var}, \"{}\", \"i\")", escape_literal(pattern))
            }
        }
    }
}

type ClauseProducer = fn(&str) -> Vec<Clause>;

/// Per-field clause producers, in the order their clauses appear.
pub const CLAUSE_PRODUCERS: [(FilterField, ClauseProducer); 4] = [
    (FilterField::Gender, gender_clauses),
    (FilterField::InflectionType, inflection_type_clauses),
    (FilterField::Pos, pos_clauses),
    (FilterField::Lemma, lemma_clauses),
];

fn gender_clauses(uri: &str) -> Vec<Clause> {
    vec![Clause::Triple { predicate: vocab::HAS_GENDER, object: uri.to_string() }]
}

fn inflection_type_clauses(uri: &str) -> Vec<Clause> {
    vec![Clause::Triple { predicate: vocab::HAS_INFLECTION_TYPE, object: uri.to_string() }]
}

fn pos_clauses(uri: &str) -> Vec<Clause> {
    vec![Clause::Triple { predicate: vocab::HAS_POS, object: uri.to_string() }]
}

fn lemma_clauses(pattern: &str) -> Vec<Clause> {
    vec![
        Clause::Bind { predicate: vocab::WRITTEN_REP, var: LEMMA_VAR },
        Clause::Regex { var: LEMMA_VAR, pattern: pattern.to_string() },
    ]
}

// ---------------------------------------------------------------------------
// Search query
// ---------------------------------------------------------------------------

/// Builder for the filtered search query.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    filters: &'a FilterSet,
    limit: Option<usize>,
}

impl<'a> SearchQuery<'a> {
    pub fn new(filters: &'a FilterSet) -> Self {
        Self { filters, limit: None }
    }

    /// Cap the number of rows. `Some(0)` and `None` both mean "no cap".
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|n| *n > 0);
        self
    }

    /// Filter clauses in query order.
    pub fn clauses(&self) -> Vec<Clause> {
        CLAUSE_PRODUCERS
            .iter()
            .filter_map(|(field, produce)| self.filters.get(*field).map(|value| produce(value)))
            .flatten()
            .collect()
    }

    pub fn build(&self) -> QueryText {
        let mut q = String::new();
        // fmt::Write into a String cannot fail.
        let _ = self.write_to(&mut q);
        let text = QueryText::new(&q);
        tracing::debug!(filters = ?self.filters, limit = ?self.limit, "built search query");
        text
    }

    fn write_to(&self, q: &mut String) -> fmt::Result {
        writeln!(q, "SELECT ?subject ?wrs ?pos ?lexicons WHERE {{")?;
        writeln!(q, "  {{")?;
        writeln!(
            q,
            "    SELECT ?subject ?poslink ?pos \
             (GROUP_CONCAT(DISTINCT ?wr; SEPARATOR=\" \") AS ?wrs) \
             (GROUP_CONCAT(DISTINCT ?lexicon; SEPARATOR=\" \") AS ?lexicons) WHERE {{"
        )?;
        for clause in self.clauses() {
            writeln!(q, "      {clause}")?;
        }
        writeln!(q, "      ?subject <{}> ?poslink .", vocab::HAS_POS)?;
        writeln!(q, "      BIND(?poslink AS ?pos)")?;
        writeln!(q, "      ?subject <{}> ?wr .", vocab::WRITTEN_REP)?;
        writeln!(q, "      OPTIONAL {{")?;
        writeln!(q, "        ?le <{}> ?subject .", vocab::CANONICAL_FORM)?;
        writeln!(q, "        ?lexicon <{}> ?le .", vocab::LEXICON_ENTRY)?;
        writeln!(q, "      }}")?;
        writeln!(q, "    }}")?;
        writeln!(q, "    GROUP BY ?subject ?poslink ?pos")?;
        writeln!(q, "  }}")?;
        writeln!(q, "}}")?;
        writeln!(q, "ORDER BY ?wrs")?;
        if let Some(limit) = self.limit {
            writeln!(q, "LIMIT {limit}")?;
        }
        Ok(())
    }
}

/// Build the search query for `filters` without a row cap.
pub fn build_search_query(filters: &FilterSet) -> QueryText {
    SearchQuery::new(filters).build()
}

// ---------------------------------------------------------------------------
// Auxiliary queries
// ---------------------------------------------------------------------------

/// Distinct values of a filter category, ordered by value.
pub fn options_query(category: FilterCategory) -> QueryText {
    relation_values_query(category.relation())
}

/// Distinct objects of `relation`, ordered by value.
pub fn relation_values_query(relation: &str) -> QueryText {
    QueryText::new(&format!(
        "SELECT DISTINCT ?object ?label WHERE {{\n  \
         ?subject <{relation}> ?object .\n  \
         BIND(?object AS ?label)\n\
         }} ORDER BY ?label"
    ))
}

/// Regex lookup over the lemma bank graph, capped at [`LEMMA_BANK_LIMIT`].
///
/// Written forms are aggregated with a NUL separator so forms containing
/// spaces survive the round trip.
pub fn lemma_bank_query(pattern: &str) -> QueryText {
    let pattern = escape_literal(pattern);
    QueryText::new(&format!(
        r#"
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX ontolex: <http://www.w3.org/ns/lemon/ontolex#>
PREFIX lila: <http://lila-erc.eu/ontologies/lila/>

SELECT ?uri ?uposUri ?label (GROUP_CONCAT(DISTINCT ?wr; SEPARATOR="\u0000") AS ?wrs)
FROM <{graph}>
WHERE {{
  ?uri lila:hasPOS ?uposUri ;
       ontolex:writtenRep ?wr ;
       rdfs:label ?label .
  FILTER regex(?wr, "{pattern}", "i")
}}
GROUP BY ?uri ?uposUri ?label
ORDER BY ?wrs
LIMIT {limit}
"#,
        graph = vocab::LEMMA_BANK_GRAPH,
        limit = LEMMA_BANK_LIMIT,
    ))
}

/// Every `?predicate ?object` pair of one resource.
pub fn describe_query(uri: &str) -> QueryText {
    QueryText::new(&format!("SELECT * WHERE {{ <{uri}> ?predicate ?object }}"))
}

// ---------------------------------------------------------------------------
// Literal escaping and pattern checks
// ---------------------------------------------------------------------------

/// Escape `value` for use inside a double-quoted SPARQL string literal.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Compile `pattern` locally as a case-insensitive regex.
///
/// Advisory only: the endpoint speaks XPath regex, which mostly but not
/// entirely overlaps. Front-ends show the error and still send the query.
pub fn check_pattern(pattern: &str) -> Result<(), regex::Error> {
    regex::RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(|_| ())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
