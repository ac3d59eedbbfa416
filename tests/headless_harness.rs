//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness runs `liita` as a compiled binary against a fake endpoint
//! and checks what a user or a script would observe.
//!
//! - **Search output**: table, tsv and json formats.
//! - **Offline subcommands**: `query`, `export-url` and `link` print without
//!   contacting the endpoint.
//! - **Exit codes**: success = 0; endpoint failure and bad arguments are
//!   non-zero with a message on stderr.
//! - **Empty filters**: nothing is sent and the run still succeeds.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::process::Output;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the binary with an isolated config directory.
async fn liita(endpoint: &str, args: &[&str]) -> Output {
    let config_home = TempDir::new().unwrap();
    tokio::process::Command::new(env!("CARGO_BIN_EXE_liita"))
        .args(args)
        .args(["--endpoint", endpoint])
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("SPARQL_URL")
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn search_prints_a_table() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(200, SEARCH_RESPONSE).await;

    let output = liita(&endpoint.url(), &["search", "--lemma", "^am", "--pos", "verb"]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("LEMMA"), "{out}");
    assert!(lines[1].starts_with(AMARE), "{out}");
    assert!(lines[1].contains("amare"));
    assert!(out.trim_end().ends_with("2 row(s)"), "{out}");

    let query = endpoint.requests().await[0].query().unwrap();
    assert_has_clause!(query, "<http://lila-erc.eu/ontologies/lila/hasPOS> <http://lila-erc.eu/ontologies/lila/verb>");
    assert_has_clause!(query, "LIMIT 1000");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_json_is_parseable() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(200, SEARCH_RESPONSE).await;

    let output = liita(&endpoint.url(), &["search", "--gender", "feminine", "--format", "json", "--limit", "0"]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["subject"], AMARE);
    assert_eq!(rows[0]["pos"], "Verb");
    assert_eq!(rows[1]["lexicons"], "");
    assert_no_clause!(endpoint.requests().await[0].query().unwrap(), "LIMIT");
}

#[tokio::test(flavor = "multi_thread")]
async fn options_as_tsv() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(200, POS_OPTIONS_RESPONSE).await;

    let output = liita(&endpoint.url(), &["options", "pos", "--format", "tsv"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "value\tlabel\n\
         http://lila-erc.eu/ontologies/lila/adjective\tAdjective\n\
         http://lila-erc.eu/ontologies/lila/noun\tNoun\n\
         http://lila-erc.eu/ontologies/lila/symbol\tsymbol\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_filters_send_nothing() {
    let endpoint = FakeEndpoint::start().await.unwrap();

    let output = liita(&endpoint.url(), &["search"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("no filters given"));
    assert_eq!(endpoint.hits().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn filters_before_the_subcommand_apply() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(200, SEARCH_RESPONSE).await;

    let output = liita(&endpoint.url(), &["--lemma", "amo", "search", "--format", "tsv"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(endpoint.hits().await, 1);
    assert_has_clause!(endpoint.requests().await[0].query().unwrap(), r#"FILTER regex(?wrp, "amo", "i")"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn whitespace_lemma_is_searched() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(200, SEARCH_RESPONSE).await;

    let output = liita(&endpoint.url(), &["search", "--lemma", " "]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_has_clause!(endpoint.requests().await[0].query().unwrap(), r#"FILTER regex(?wrp, " ", "i")"#);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn endpoint_failure_exits_nonzero() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    endpoint.respond_with(500, "").await;

    let output = liita(&endpoint.url(), &["search", "--lemma", "rosa"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: endpoint returned HTTP 500"), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_arguments_exit_nonzero() {
    let endpoint = FakeEndpoint::start().await.unwrap();
    let output = liita(&endpoint.url(), &["options", "colour"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown filter category"), "{}", stderr(&output));
    assert_eq!(endpoint.hits().await, 0);
}

// ---------------------------------------------------------------------------
// Offline subcommands
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn query_prints_sparql_offline() {
    let endpoint = FakeEndpoint::start().await.unwrap();

    let output = liita(&endpoint.url(), &["query", "--inflection", "c1", "--lemma", "^am"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("SELECT ?subject ?wrs ?pos ?lexicons"), "{out}");
    assert_clause_before!(out, C1, "FILTER regex(?wrp, \"^am\", \"i\")");
    assert_eq!(endpoint.hits().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn export_url_targets_the_endpoint() {
    let endpoint = FakeEndpoint::start().await.unwrap();

    let output = liita(&endpoint.url(), &["export-url", "--pos", "noun"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    let url = url::Url::parse(stdout(&output).trim()).unwrap();
    assert_eq!(url.as_str().split('?').next(), Some(endpoint.url().as_str()));
    let format = url.query_pairs().find(|(k, _)| k == "format").map(|(_, v)| v.into_owned());
    assert_eq!(format.as_deref(), Some("text/csv"));
    assert_eq!(endpoint.hits().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn link_round_trips_through_prefill() {
    let endpoint = FakeEndpoint::start().await.unwrap();

    let output = liita(&endpoint.url(), &["link", "--gender", "feminine", "--lemma", "rosa"]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    let link = stdout(&output).trim().to_string();
    assert!(link.starts_with("https://liita.it/query-interface/?"), "{link}");

    let again = liita(&endpoint.url(), &["link", "--link", &link]).await;
    assert_eq!(stdout(&again).trim(), link);
}
