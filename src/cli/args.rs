//! Command-line argument definitions for best-match
//!
//! Defines the CLI interface with the clap derive API. Each document kind
//! has its own subcommand; `batch` analyses many documents at once.

use crate::config::{AnalysisConfig, DocumentKind, DocumentSource};
use crate::numeric::Locale;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the best-match analyser
///
/// Finds the records with the best score in delimited documents, keeping
/// every record tied for that score.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "best-match",
    version,
    about = "Find the best-scoring records in delimited documents",
    long_about = "Reads weather or country documents and reports the records with the best score. \
                  Weather documents report the day with the smallest temperature spread, country \
                  documents the country with the highest population density. Ties are all reported."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", global = true, help = "Only show errors")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Day with the smallest temperature spread
    Weather(DocumentArgs),
    /// Country with the highest population density
    Countries(DocumentArgs),
    /// Analyse several documents concurrently
    Batch(BatchArgs),
}

/// Arguments for analysing a single document
#[derive(Debug, Clone, ClapArgs)]
pub struct DocumentArgs {
    /// Path to the document
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Field delimiter, defaults to ',' for weather and ';' for countries
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        value_parser = parse_delimiter
    )]
    pub delimiter: Option<u8>,

    /// Number locale, defaults to en-US for weather and de-DE for countries
    #[arg(short = 'l', long = "locale", value_name = "TAG")]
    pub locale: Option<Locale>,
}

impl DocumentArgs {
    /// Source for this document with command line overrides applied
    pub fn to_source(&self, kind: DocumentKind) -> DocumentSource {
        let mut source = DocumentSource::new(&self.path, kind);
        if let Some(delimiter) = self.delimiter {
            source = source.with_delimiter(delimiter);
        }
        if let Some(locale) = self.locale {
            source = source.with_locale(locale);
        }
        source
    }
}

/// Arguments for the batch command
#[derive(Debug, Clone, ClapArgs)]
pub struct BatchArgs {
    /// Weather documents (paths or glob patterns)
    #[arg(long = "weather", value_name = "PATH", num_args = 1..)]
    pub weather: Vec<String>,

    /// Country documents (paths or glob patterns)
    #[arg(long = "countries", value_name = "PATH", num_args = 1..)]
    pub countries: Vec<String>,

    /// Maximum number of documents analysed concurrently
    #[arg(short = 'j', long = "jobs", value_name = "COUNT")]
    pub jobs: Option<usize>,
}

impl BatchArgs {
    pub fn has_inputs(&self) -> bool {
        !self.weather.is_empty() || !self.countries.is_empty()
    }

    /// Build the run configuration from already expanded paths
    pub fn to_config(
        &self,
        weather: Vec<PathBuf>,
        countries: Vec<PathBuf>,
        show_progress: bool,
    ) -> AnalysisConfig {
        let sources = weather
            .into_iter()
            .map(|path| DocumentSource::new(path, DocumentKind::Weather))
            .chain(
                countries
                    .into_iter()
                    .map(|path| DocumentSource::new(path, DocumentKind::Countries)),
            );

        let mut config = AnalysisConfig::new()
            .with_sources(sources)
            .with_progress(show_progress);
        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent(jobs);
        }
        config
    }
}

impl Args {
    /// Log level for the tracing filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parse a single-byte delimiter, accepting `\t` and `tab` for tabs
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    value
                )),
            }
        }
    }
}
