//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use liita_core::links::filters_from_link;
use liita_core::{FilterCategory, FilterField, FilterSet};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "liita",
    version,
    about = "Search the LiITA lexical knowledge base from the terminal",
    long_about = "Search the LiITA lexical knowledge base from the terminal.\n\n\
                  Without a subcommand an interactive TUI starts; the filter flags \
                  then pre-fill it."
)]
pub struct Cli {
    /// SPARQL endpoint URL; overrides the config file and SPARQL_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Config file to use instead of $XDG_CONFIG_HOME/liita/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logs: /tmp/liita-debug.log for the TUI, stderr otherwise.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search and print the matching lemmas.
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        /// Row cap for this search; 0 disables it.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// List the selectable values of a filter category.
    Options {
        /// gender, inflection or pos
        category: FilterCategory,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Look lemmas up in the lemma bank by written form.
    Lemmas {
        /// Regular expression, matched case-insensitively.
        pattern: String,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Print every statement about a resource.
    Describe {
        uri: String,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Print the SPARQL a search would send.
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the CSV download URL for a search.
    ExportUrl {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the web query interface link for a search.
    Link {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Output format of the headless commands.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Aligned columns.
    #[default]
    Table,
    /// Tab-separated values with a header row.
    Tsv,
    /// Pretty-printed JSON array.
    Json,
}

/// Search filters as command-line flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Regular expression matched case-insensitively against written forms.
    #[arg(long, value_name = "REGEX")]
    pub lemma: Option<String>,

    /// Inflection type: URI or shorthand such as `c1` or `n2`.
    #[arg(long, value_name = "VALUE")]
    pub inflection: Option<String>,

    /// Part of speech: URI, label or shorthand such as `verb`.
    #[arg(long, value_name = "VALUE")]
    pub pos: Option<String>,

    /// Gender: URI, label or shorthand such as `feminine`.
    #[arg(long, value_name = "VALUE")]
    pub gender: Option<String>,

    /// Start from the filters of a web query interface link; flags win.
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,
}

impl Cli {
    /// The subcommand with filter flags given before it folded in. Flags
    /// given after the subcommand win. Commands that take no filters reject
    /// them.
    pub fn resolved_command(&self) -> anyhow::Result<Option<Commands>> {
        let Some(mut command) = self.command.clone() else {
            return Ok(None);
        };
        match &mut command {
            Commands::Search { filters, .. }
            | Commands::Query { filters }
            | Commands::ExportUrl { filters }
            | Commands::Link { filters } => *filters = filters.clone().or(&self.filters),
            Commands::Options { .. } | Commands::Lemmas { .. } | Commands::Describe { .. } => {
                if !self.filters.is_unset() {
                    anyhow::bail!("filter flags have no effect on this subcommand");
                }
            }
        }
        Ok(Some(command))
    }
}

impl FilterArgs {
    /// True when no flag was given.
    pub fn is_unset(&self) -> bool {
        self.lemma.is_none()
            && self.inflection.is_none()
            && self.pos.is_none()
            && self.gender.is_none()
            && self.link.is_none()
    }

    /// Flags of `self`, falling back to `base` for those not given.
    pub fn or(self, base: &FilterArgs) -> FilterArgs {
        FilterArgs {
            lemma: self.lemma.or_else(|| base.lemma.clone()),
            inflection: self.inflection.or_else(|| base.inflection.clone()),
            pos: self.pos.or_else(|| base.pos.clone()),
            gender: self.gender.or_else(|| base.gender.clone()),
            link: self.link.or_else(|| base.link.clone()),
        }
    }

    pub fn to_filter_set(&self) -> anyhow::Result<FilterSet> {
        let mut filters = match &self.link {
            Some(link) => filters_from_link(link)
                .map_err(|err| anyhow::anyhow!("invalid --link {link:?}: {err}"))?,
            None => FilterSet::default(),
        };
        if let Some(lemma) = &self.lemma {
            filters.set(FilterField::Lemma, Some(lemma.clone()));
        }
        let selects = [
            (FilterField::InflectionType, FilterCategory::InflectionType, &self.inflection),
            (FilterField::Pos, FilterCategory::PartOfSpeech, &self.pos),
            (FilterField::Gender, FilterCategory::Gender, &self.gender),
        ];
        for (field, category, value) in selects {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                filters.set(field, Some(category.resolve(value)));
            }
        }
        Ok(filters)
    }
}
