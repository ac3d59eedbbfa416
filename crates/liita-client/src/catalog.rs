//! Catalog operations: search, option lists, lemma-bank lookup and describe.

use crate::client::SparqlClient;
use liita_core::links::csv_export_url;
use liita_core::normalizer::{
    normalize_lemma_hits, normalize_options, normalize_predicates, normalize_results,
};
use liita_core::query::{describe_query, lemma_bank_query, options_query};
use liita_core::{
    FilterCategory, FilterSet, LemmaHit, OptionRecord, PredicateRow, QueryError, QueryText,
    ResultRecord, SearchQuery,
};

/// Query-level façade over a [`SparqlClient`].
#[derive(Debug, Clone)]
pub struct Catalog {
    client: SparqlClient,
    result_limit: Option<usize>,
}

impl Catalog {
    pub fn new(client: SparqlClient) -> Self {
        Self { client, result_limit: None }
    }

    /// Cap search results; `None` or `Some(0)` means uncapped.
    pub fn with_result_limit(mut self, limit: Option<usize>) -> Self {
        self.result_limit = limit.filter(|n| *n > 0);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// The exact query text [`Catalog::try_search`] sends for `filters`.
    pub fn search_query(&self, filters: &FilterSet) -> QueryText {
        SearchQuery::new(filters).with_limit(self.result_limit).build()
    }

    /// CSV download link for the search over `filters`.
    pub fn export_url(&self, filters: &FilterSet) -> Result<url::Url, url::ParseError> {
        csv_export_url(self.client.endpoint(), &self.search_query(filters))
    }

    /// Search, surfacing failures. An empty filter set returns no rows
    /// without contacting the endpoint.
    pub async fn try_search(&self, filters: &FilterSet) -> Result<Vec<ResultRecord>, QueryError> {
        if filters.is_empty() {
            tracing::debug!("empty filter set, search skipped");
            return Ok(Vec::new());
        }
        let results = self.client.select(&self.search_query(filters)).await?;
        Ok(normalize_results(&results)?)
    }

    /// Search; failures are logged and yield no rows.
    pub async fn search(&self, filters: &FilterSet) -> Vec<ResultRecord> {
        lenient("search", self.try_search(filters).await)
    }

    pub async fn try_options(
        &self,
        category: FilterCategory,
    ) -> Result<Vec<OptionRecord>, QueryError> {
        let results = self.client.select(&options_query(category)).await?;
        Ok(normalize_options(category, &results)?)
    }

    /// Selectable values for `category`; failures are logged and yield none.
    pub async fn options(&self, category: FilterCategory) -> Vec<OptionRecord> {
        lenient("options", self.try_options(category).await)
    }

    pub async fn try_lemma_bank(&self, pattern: &str) -> Result<Vec<LemmaHit>, QueryError> {
        let results = self.client.select(&lemma_bank_query(pattern)).await?;
        Ok(normalize_lemma_hits(&results)?)
    }

    pub async fn lemma_bank(&self, pattern: &str) -> Vec<LemmaHit> {
        lenient("lemma bank", self.try_lemma_bank(pattern).await)
    }

    pub async fn try_describe(&self, uri: &str) -> Result<Vec<PredicateRow>, QueryError> {
        let results = self.client.select(&describe_query(uri)).await?;
        Ok(normalize_predicates(&results)?)
    }

    pub async fn describe(&self, uri: &str) -> Vec<PredicateRow> {
        lenient("describe", self.try_describe(uri).await)
    }
}

fn lenient<T>(operation: &'static str, result: Result<Vec<T>, QueryError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::error!(operation, error = %err, "sparql request failed");
        Vec::new()
    })
}
