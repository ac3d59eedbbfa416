//! liita TUI: ratatui application shell.
//!
//! The UI runs on the calling thread; SPARQL requests run as tasks on the
//! tokio runtime behind `runtime`.

pub mod app;
pub mod commands;
pub mod event;
pub mod opener;
pub mod theme;
pub mod widgets;

pub use app::App;

use liita_client::Catalog;
use liita_core::{config::Config, FilterSet};
use tokio::runtime::Handle;

/// Start the TUI, pre-filled with `initial` (searched right away when not
/// empty). Blocks until the user quits.
pub fn run(config: Config, catalog: Catalog, runtime: Handle, initial: FilterSet) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    tracing::info!(endpoint = %catalog.endpoint(), theme = %config.ui.theme, "starting tui");
    App::new(config, theme, catalog, runtime, &initial).run()
}
