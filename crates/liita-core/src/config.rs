//! Configuration types for liita.
//!
//! [`Config::load`] reads `~/.config/liita/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! Layering, lowest to highest precedence:
//!
//! 1. embedded defaults
//! 2. the config file
//! 3. `LIITA_<SECTION>__<KEY>` environment variables (e.g. `LIITA_ENDPOINT__URL`)
//! 4. `SPARQL_URL`, which overrides `endpoint.url`

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[endpoint]
url          = "https://liita.it/sparql"
timeout_secs = 30

[search]
debounce_ms  = 350
result_limit = 1000

[ui]
theme            = "default"
show_lexicons    = true
timestamp_format = "%H:%M:%S"
link_base        = "https://liita.it/query-interface/"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/liita/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[endpoint]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String { crate::vocab::DEFAULT_ENDPOINT.to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self { url: default_url(), timeout_secs: default_timeout_secs() }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last filter edit before a search is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Row cap appended to search queries; 0 disables it.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_debounce_ms() -> u64 { 350 }
fn default_result_limit() -> usize { 1000 }

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn limit(&self) -> Option<usize> {
        Some(self.result_limit).filter(|n| *n > 0)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms(), result_limit: default_result_limit() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_lexicons")]
    pub show_lexicons: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Base URL of the web query interface, used for deep links.
    #[serde(default = "default_link_base")]
    pub link_base: String,
    /// Command used to open URLs; the platform opener when unset.
    #[serde(default)]
    pub opener: Option<String>,
}

fn default_theme() -> String { "default".to_string() }
fn default_show_lexicons() -> bool { true }
fn default_timestamp_format() -> String { "%H:%M:%S".to_string() }
fn default_link_base() -> String { crate::vocab::DEFAULT_LINK_BASE.to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_lexicons: default_show_lexicons(),
            timestamp_format: default_timestamp_format(),
            link_base: default_link_base(),
            opener: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/liita/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered like [`Config::load`]. A missing
    /// file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("LIITA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("endpoint.url", std::env::var("SPARQL_URL").ok())?
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("liita")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
