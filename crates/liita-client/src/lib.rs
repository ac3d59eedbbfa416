//! liita-client: talks to the SPARQL endpoint.
//!
//! [`SparqlClient`] performs one request per query and reports every failure
//! as a [`QueryError`](liita_core::QueryError). [`Catalog`] builds the
//! queries, normalizes the answers, and offers both a strict (`try_*`) and a
//! lenient flavour of each operation. The lenient flavour logs the failure and
//! returns an empty list, so "request failed" and "no matches" look the same
//! to its caller.

pub mod catalog;
pub mod client;

pub use catalog::Catalog;
pub use client::SparqlClient;
