use clap::Parser;
use liita::cli::Cli;
use liita::headless;
use liita_client::{Catalog, SparqlClient};
use liita_core::config::Config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG: &str = "/tmp/liita-debug.log";

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let headless = cli.command.is_some();
    init_logging(cli.debug, headless)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config not loaded, using defaults");
            Config::defaults()
        }),
    };
    if let Some(url) = &cli.endpoint {
        config.endpoint.url = url.clone();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let client = SparqlClient::from_config(&config.endpoint)?;
    let catalog = Catalog::new(client).with_result_limit(config.search.limit());
    tracing::debug!(endpoint = %catalog.endpoint(), "catalog ready");

    match cli.resolved_command()? {
        None => {
            let initial = cli.filters.to_filter_set()?;
            liita_tui::run(config, catalog, runtime.handle().clone(), initial)
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            runtime.block_on(headless::execute(command, &catalog, &config, &mut out))
        }
    }
}

/// The TUI owns the terminal, so it only logs to a file and only with
/// `--debug`. Headless runs log to stderr.
fn init_logging(debug: bool, headless: bool) -> anyhow::Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    if headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else if debug {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
        tracing::info!("liita debug log started, tail -f {DEBUG_LOG}");
    }
    Ok(())
}
