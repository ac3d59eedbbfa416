//! Error taxonomy for requests against the endpoint.

use thiserror::Error;

/// The response body did not have the expected SPARQL JSON results shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid SPARQL JSON results: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row} has no binding for ?{variable}")]
    MissingVariable { row: usize, variable: &'static str },
}

/// A request that did not produce usable rows.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}")]
    Transport { status: u16 },
    /// The request never completed (connection refused, timeout, TLS …).
    #[error("request failed: {0}")]
    Network(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl QueryError {
    /// True for failures on the way to or from the endpoint, as opposed to an
    /// unreadable answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, QueryError::Transport { .. } | QueryError::Network(_))
    }
}
