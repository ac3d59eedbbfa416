//! Test builders: fluent constructors for SPARQL result documents.
//!
//! Built for readability in assertions, not for production use. They panic on
//! invalid input rather than returning `Result`.

use liita_core::{SparqlResults, Term};
use std::collections::HashMap;

/// Fluent builder for [`SparqlResults`].
///
/// # Example
///
/// ```rust
/// let results = ResultsBuilder::new()
///     .row(&[("subject", Term::uri(AMARE)), ("wrs", Term::literal("amare"))])
///     .build();
/// ```
#[derive(Default)]
pub struct ResultsBuilder {
    rows: Vec<HashMap<String, Term>>,
}

impl ResultsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, bindings: &[(&str, Term)]) -> Self {
        self.rows.push(
            bindings
                .iter()
                .map(|(var, term)| (var.to_string(), term.clone()))
                .collect(),
        );
        self
    }

    /// A complete search row.
    pub fn search_row(self, subject: &str, wrs: &str, pos: &str, lexicons: &str) -> Self {
        self.row(&[
            ("subject", Term::uri(subject)),
            ("wrs", Term::literal(wrs)),
            ("pos", Term::uri(pos)),
            ("lexicons", Term::literal(lexicons)),
        ])
    }

    pub fn build(self) -> SparqlResults {
        let mut results = SparqlResults::default();
        results.results.bindings = self.rows;
        results
    }

    /// Serialized as a response body.
    pub fn to_json(self) -> String {
        serde_json::to_string(&self.build()).expect("results serialize")
    }
}

/// Parse one of the fixture bodies.
pub fn parse_fixture(body: &str) -> SparqlResults {
    liita_core::normalizer::parse_results(body.as_bytes()).expect("fixture is valid SPARQL JSON")
}
