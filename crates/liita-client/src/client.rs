//! HTTP transport for SPARQL `SELECT` queries.

use liita_core::config::EndpointConfig;
use liita_core::links::form_body;
use liita_core::normalizer::parse_results;
use liita_core::{QueryError, QueryText, SparqlResults};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client bound to one endpoint URL. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SparqlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, QueryError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("liita/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(network)?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    pub fn from_config(config: &EndpointConfig) -> Result<Self, QueryError> {
        Self::with_timeout(config.url.clone(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `query` as a form and decode the SPARQL JSON results.
    ///
    /// Any non-2xx status is a [`QueryError::Transport`]; the body of an
    /// error response is not inspected.
    pub async fn select(&self, query: &QueryText) -> Result<SparqlResults, QueryError> {
        tracing::info!(endpoint = %self.endpoint, bytes = query.as_str().len(), "sparql request");
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .body(form_body(query))
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Transport { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(network)?;
        let results = parse_results(&body)?;
        tracing::debug!(rows = results.results.bindings.len(), "sparql response decoded");
        Ok(results)
    }
}

fn network(err: reqwest::Error) -> QueryError {
    QueryError::Network(err.to_string())
}
