//! Query building and response normalization benchmarks.
//!
//! Both run once per keystroke-driven search, so the TUI stays responsive
//! only while they are cheap next to the network round trip.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `build` | Search query text for growing filter sets |
//! | `normalize` | Parsing and normalizing search responses of growing size |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench query_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use liita_core::normalizer::{normalize_results, parse_results};
use liita_core::{build_search_query, FilterSet, SparqlResults, Term};
use std::collections::HashMap;
use std::hint::black_box;

const VERB: &str = "http://lila-erc.eu/ontologies/lila/verb";

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

fn build_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let cases = [
        ("lemma", FilterSet::new().with_lemma("^am")),
        ("lemma_pos", FilterSet::new().with_lemma("^am").with_pos(VERB)),
        (
            "all",
            FilterSet::new()
                .with_lemma(r#"^a"m\w+"#)
                .with_pos(VERB)
                .with_gender("http://lila-erc.eu/ontologies/lila/feminine")
                .with_inflection_type("http://liita.it/ontologies/liita/c1"),
        ),
    ];

    group.throughput(Throughput::Elements(1));
    for (name, filters) in &cases {
        group.bench_with_input(BenchmarkId::new("search", name), filters, |b, filters| {
            b.iter(|| build_search_query(black_box(filters)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn response(rows: usize) -> String {
    let mut results = SparqlResults::default();
    results.results.bindings = (0..rows)
        .map(|i| {
            HashMap::from([
                ("subject".to_string(), Term::uri(format!("http://liita.it/data/id/lemma/{i}"))),
                ("wrs".to_string(), Term::literal(format!("forma{i} formb{i}"))),
                ("pos".to_string(), Term::uri(VERB)),
                (
                    "lexicons".to_string(),
                    Term::literal("http://liita.it/data/id/lexicon/DigItApp"),
                ),
            ])
        })
        .collect();
    serde_json::to_string(&results).unwrap()
}

fn normalize_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for rows in [10usize, 1_000, 10_000] {
        let body = response(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("search", rows), &body, |b, body| {
            b.iter(|| {
                let results = parse_results(black_box(body.as_bytes())).unwrap();
                normalize_results(&results).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, build_bench, normalize_bench);
criterion_main!(benches);
