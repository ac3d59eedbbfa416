//! Headless subcommands: run one catalog operation and print the result.

use crate::cli::{Commands, Format};
use liita_client::Catalog;
use liita_core::config::Config;
use liita_core::links::deep_link;
use liita_core::{check_pattern, LemmaHit, OptionRecord, PredicateRow, ResultRecord};
use serde::Serialize;
use std::io::Write;

/// Run `command` against `catalog`, writing its output to `out`.
///
/// Endpoint failures are returned as errors so the process exits non-zero.
pub async fn execute<W: Write>(
    command: Commands,
    catalog: &Catalog,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Commands::Search { filters, limit, format } => {
            let filters = filters.to_filter_set()?;
            if filters.is_empty() {
                tracing::warn!("no filters given, nothing to search");
                return Ok(());
            }
            warn_on_bad_pattern(filters.get(liita_core::FilterField::Lemma));
            let catalog = match limit {
                Some(n) => catalog.clone().with_result_limit(Some(n)),
                None => catalog.clone(),
            };
            let records = catalog.try_search(&filters).await?;
            tracing::info!(count = records.len(), "search finished");
            emit(out, format, &records)?;
        }
        Commands::Options { category, format } => {
            let options = catalog.try_options(category).await?;
            emit(out, format, &options)?;
        }
        Commands::Lemmas { pattern, format } => {
            warn_on_bad_pattern(Some(&pattern));
            let hits = catalog.try_lemma_bank(&pattern).await?;
            emit(out, format, &hits)?;
        }
        Commands::Describe { uri, format } => {
            let rows = catalog.try_describe(&uri).await?;
            emit(out, format, &rows)?;
        }
        Commands::Query { filters } => {
            let filters = filters.to_filter_set()?;
            writeln!(out, "{}", catalog.search_query(&filters))?;
        }
        Commands::ExportUrl { filters } => {
            let filters = filters.to_filter_set()?;
            writeln!(out, "{}", catalog.export_url(&filters)?)?;
        }
        Commands::Link { filters } => {
            let filters = filters.to_filter_set()?;
            writeln!(out, "{}", deep_link(&config.ui.link_base, &filters)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn warn_on_bad_pattern(pattern: Option<&str>) {
    if let Some(Err(err)) = pattern.map(check_pattern) {
        tracing::warn!(error = %err, "pattern may be rejected by the endpoint");
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// A record that can be printed as a row of text cells.
pub trait Row: Serialize {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Row for ResultRecord {
    const HEADER: &'static [&'static str] = &["lemma", "written_representations", "pos", "lexicons"];

    fn cells(&self) -> Vec<String> {
        vec![self.subject.clone(), self.wrs.clone(), self.pos.clone(), self.lexicons.clone()]
    }
}

impl Row for OptionRecord {
    const HEADER: &'static [&'static str] = &["value", "label"];

    fn cells(&self) -> Vec<String> {
        vec![self.value.clone(), self.label.clone()]
    }
}

impl Row for LemmaHit {
    const HEADER: &'static [&'static str] = &["lemma", "upos", "label", "written_representations"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.uri.clone(),
            self.upos.clone(),
            self.label.clone(),
            self.written_representations.join(" "),
        ]
    }
}

impl Row for PredicateRow {
    const HEADER: &'static [&'static str] = &["predicate", "object", "kind"];

    fn cells(&self) -> Vec<String> {
        vec![self.predicate.clone(), self.object.value.clone(), self.object.kind.to_string()]
    }
}

/// Print `rows` in `format`.
pub fn emit<W: Write, R: Row>(out: &mut W, format: Format, rows: &[R]) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        Format::Tsv => {
            writeln!(out, "{}", R::HEADER.join("\t"))?;
            for row in rows {
                let cells: Vec<String> = row.cells().into_iter().map(|c| tsv_escape(&c)).collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        Format::Table => write_table(out, R::HEADER, rows)?,
    }
    Ok(())
}

fn write_table<W: Write, R: Row>(out: &mut W, header: &[&str], rows: &[R]) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "no results");
    }
    let cells: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |out: &mut W, row: &[&str]| -> std::io::Result<()> {
        let last = row.len().saturating_sub(1);
        for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
            if i == last {
                write!(out, "{cell}")?;
            } else {
                write!(out, "{cell:<width$}  ")?;
            }
        }
        writeln!(out)
    };

    let upper: Vec<String> = header.iter().map(|h| h.to_uppercase()).collect();
    line(out, &upper.iter().map(String::as_str).collect::<Vec<_>>())?;
    for row in &cells {
        line(out, &row.iter().map(String::as_str).collect::<Vec<_>>())?;
    }
    writeln!(out, "\n{} row(s)", rows.len())
}

fn tsv_escape(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
