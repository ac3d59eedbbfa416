//! URL construction: request bodies, CSV export links and deep links.
//!
//! Nothing here performs I/O; callers decide whether to send, print or open
//! the result.

use crate::query::QueryText;
use crate::types::{FilterField, FilterSet};
use url::{form_urlencoded, ParseError, Url};

/// `application/x-www-form-urlencoded` body carrying `query`.
pub fn form_body(query: &QueryText) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("query", query.as_str())
        .finish()
}

/// `GET` URL that makes the endpoint answer `query` as a CSV download.
pub fn csv_export_url(endpoint: &str, query: &QueryText) -> Result<Url, ParseError> {
    Url::parse_with_params(endpoint, &[("query", query.as_str()), ("format", "text/csv")])
}

/// Link to the web query interface pre-filled with `filters`.
///
/// Only present fields are encoded, in clause order.
pub fn deep_link(base: &str, filters: &FilterSet) -> Result<Url, ParseError> {
    let mut url = Url::parse(base)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (field, value) in filters.present() {
            pairs.append_pair(field.param(), value);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}

/// Recover the filters encoded in a deep link. Unknown parameters are ignored.
pub fn filters_from_link(link: &str) -> Result<FilterSet, ParseError> {
    let url = Url::parse(link)?;
    let mut filters = FilterSet::default();
    for (name, value) in url.query_pairs() {
        if let Some(field) = FilterField::from_param(&name) {
            filters.set(field, Some(value.into_owned()));
        }
    }
    Ok(filters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
