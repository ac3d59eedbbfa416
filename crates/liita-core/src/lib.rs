//! liita-core: query construction and response normalization for the LiITA
//! lexical knowledge base.
//!
//! # Architecture
//!
//! ```text
//! FilterSet ──► query ──► (client: HTTP) ──► normalizer ──► records ──► UI
//!                                               │
//!                                     lookup (static label tables)
//! ```
//!
//! Everything in this crate is pure and synchronous; the only I/O is
//! [`config::Config::load`]. Network access lives in `liita-client`.

pub mod config;
pub mod error;
pub mod links;
pub mod lookup;
pub mod normalizer;
pub mod query;
pub mod sequence;
pub mod types;
pub mod vocab;

pub use error::{DecodeError, QueryError};
pub use lookup::{uri_to_label, FilterCategory};
pub use query::{build_search_query, check_pattern, QueryText, SearchQuery};
pub use sequence::{Debouncer, RequestSequencer, RequestTicket};
pub use types::{
    FilterField, FilterSet, LemmaHit, OptionRecord, PredicateRow, ResultRecord, SparqlResults,
    Term, TermKind,
};
