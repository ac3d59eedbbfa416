//! Core types shared by every layer: the user's [`FilterSet`], the records
//! produced by the normalizer, and the raw SPARQL JSON results shape.

use crate::lookup::FilterCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// User-supplied constraints narrowing a search.
///
/// Every field is optional; `None` means "no constraint". An empty string
/// counts as absent however the set was built, so a cleared text box never
/// produces an empty clause. Whitespace is a value: `" "` is a valid lemma
/// pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSet {
    /// Regular expression matched case-insensitively against written forms.
    pub lemma: Option<String>,
    pub inflection_type: Option<String>,
    pub pos: Option<String>,
    pub gender: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lemma(mut self, pattern: impl Into<String>) -> Self {
        self.set(FilterField::Lemma, Some(pattern.into()));
        self
    }

    pub fn with_inflection_type(mut self, uri: impl Into<String>) -> Self {
        self.set(FilterField::InflectionType, Some(uri.into()));
        self
    }

    pub fn with_pos(mut self, uri: impl Into<String>) -> Self {
        self.set(FilterField::Pos, Some(uri.into()));
        self
    }

    pub fn with_gender(mut self, uri: impl Into<String>) -> Self {
        self.set(FilterField::Gender, Some(uri.into()));
        self
    }

    /// Value of one field. Empty strings read as `None`.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        let value = match field {
            FilterField::Gender => self.gender.as_deref(),
            FilterField::InflectionType => self.inflection_type.as_deref(),
            FilterField::Pos => self.pos.as_deref(),
            FilterField::Lemma => self.lemma.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Set or clear one field. An empty value clears it.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match field {
            FilterField::Gender => self.gender = value,
            FilterField::InflectionType => self.inflection_type = value,
            FilterField::Pos => self.pos = value,
            FilterField::Lemma => self.lemma = value,
        }
    }

    /// True when no field is set. Such a set must not be sent as a search.
    pub fn is_empty(&self) -> bool {
        FilterField::ORDER.iter().all(|f| self.get(*f).is_none())
    }

    /// Present fields in clause order.
    pub fn present(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ORDER
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }
}

/// The fields of a [`FilterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Gender,
    InflectionType,
    Pos,
    Lemma,
}

impl FilterField {
    /// Fixed order in which fields contribute query clauses.
    pub const ORDER: [FilterField; 4] = [
        FilterField::Gender,
        FilterField::InflectionType,
        FilterField::Pos,
        FilterField::Lemma,
    ];

    /// The selectable category backing this field; `None` for the free-text lemma.
    pub fn category(self) -> Option<FilterCategory> {
        match self {
            FilterField::Gender => Some(FilterCategory::Gender),
            FilterField::InflectionType => Some(FilterCategory::InflectionType),
            FilterField::Pos => Some(FilterCategory::PartOfSpeech),
            FilterField::Lemma => None,
        }
    }

    /// Parameter name used in deep links.
    pub fn param(self) -> &'static str {
        match self {
            FilterField::Gender => "gender",
            FilterField::InflectionType => "inflectionType",
            FilterField::Pos => "pos",
            FilterField::Lemma => "lemma",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        FilterField::ORDER.into_iter().find(|f| f.param() == name)
    }
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// One search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// Lemma URI.
    pub subject: String,
    /// Distinct written representations, space separated.
    pub wrs: String,
    /// Human-readable part-of-speech label.
    pub pos: String,
    /// Raw part-of-speech URI as returned by the endpoint.
    pub pos_uri: String,
    /// Distinct lexicon URIs, space separated. Empty when the lemma has no
    /// lexical entry.
    pub lexicons: String,
}

impl ResultRecord {
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.wrs.split_whitespace()
    }

    pub fn lexicon_list(&self) -> impl Iterator<Item = &str> {
        self.lexicons.split_whitespace()
    }
}

/// A selectable filter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OptionRecord {
    pub value: String,
    pub label: String,
}

/// One lemma-bank hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LemmaHit {
    pub uri: String,
    pub upos: String,
    pub label: String,
    pub written_representations: Vec<String>,
}

/// One `predicate object` pair describing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateRow {
    pub predicate: String,
    pub object: Term,
}

// ---------------------------------------------------------------------------
// SPARQL JSON results
// ---------------------------------------------------------------------------

/// `application/sparql-results+json` document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: serde_json::Value,
    pub results: ResultSet,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResultSet {
    #[serde(default)]
    pub distinct: Option<bool>,
    #[serde(default)]
    pub ordered: Option<bool>,
    pub bindings: Vec<Binding>,
}

/// One row: variable name → bound term.
pub type Binding = HashMap<String, Term>;

/// An RDF term as encoded in SPARQL JSON results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Term {
    #[serde(rename = "type")]
    pub kind: TermKind,
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Term {
    pub fn uri(value: impl Into<String>) -> Self {
        Self { kind: TermKind::Uri, value: value.into(), lang: None, datatype: None }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self { kind: TermKind::Literal, value: value.into(), lang: None, datatype: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermKind {
    Uri,
    Literal,
    TypedLiteral,
    Bnode,
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermKind::Uri => write!(f, "uri"),
            TermKind::Literal => write!(f, "literal"),
            TermKind::TypedLiteral => write!(f, "typed-literal"),
            TermKind::Bnode => write!(f, "bnode"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
