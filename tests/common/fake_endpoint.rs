//! Fake SPARQL endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /sparql` with a configurable status and body and
//! records every request it receives.
//!
//! # Example
//!
//! ```rust,no_run
//! let endpoint = FakeEndpoint::start().await.unwrap();
//! endpoint.respond_with(200, SEARCH_RESPONSE).await;
//! let client = SparqlClient::new(endpoint.url()).unwrap();
//! ```

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the endpoint saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// The `query` field of the form body, decoded.
    pub fn query(&self) -> Option<String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .find(|(name, _)| name == "query")
            .map(|(_, value)| value.into_owned())
    }
}

struct EndpointState {
    status: u16,
    body: String,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake endpoint.
pub struct FakeEndpoint {
    addr: SocketAddr,
    state: Arc<Mutex<EndpointState>>,
}

impl FakeEndpoint {
    /// Start on a random port, answering `200` with an empty result set until
    /// told otherwise.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(EndpointState {
            status: 200,
            body: super::fixtures::EMPTY_RESPONSE.to_string(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/sparql", post(answer))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full endpoint URL, e.g. `http://127.0.0.1:PORT/sparql`.
    pub fn url(&self) -> String {
        format!("http://{}/sparql", self.addr)
    }

    pub async fn respond_with(&self, status: u16, body: &str) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.body = body.to_string();
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn hits(&self) -> usize {
        self.state.lock().await.requests.len()
    }
}

async fn answer(
    State(state): State<Arc<Mutex<EndpointState>>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        content_type: header_value(header::CONTENT_TYPE),
        accept: header_value(header::ACCEPT),
        body,
    });
    let status = StatusCode::from_u16(state.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/sparql-results+json")],
        state.body.clone(),
    )
}
