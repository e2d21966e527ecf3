//! Configuration of analysis runs.
//!
//! An [`AnalysisConfig`] lists the documents to analyse, how each one is
//! delimited and which number locale it uses, plus the batch runner limits.

use crate::constants::{MAX_DEFAULT_CONCURRENCY, countries, weather};
use crate::error::{AnalysisError, Result};
use crate::numeric::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Layout of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `Name;Population;Area (km²)` rows, best match is the densest country
    Countries,
    /// `Day,MxT,MnT` rows, best match is the day with the smallest spread
    Weather,
}

impl DocumentKind {
    pub fn default_delimiter(&self) -> u8 {
        match self {
            Self::Countries => countries::DEFAULT_DELIMITER,
            Self::Weather => weather::DEFAULT_DELIMITER,
        }
    }

    pub fn default_locale(&self) -> Locale {
        match self {
            Self::Countries => countries::DEFAULT_LOCALE,
            Self::Weather => weather::DEFAULT_LOCALE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Weather => "weather",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One document to analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub delimiter: u8,
    pub locale: Locale,
}

impl DocumentSource {
    /// Source using the conventional delimiter and locale of its kind
    pub fn new(path: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
            delimiter: kind.default_delimiter(),
            locale: kind.default_locale(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Settings for a single or batch analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Documents to analyse, reported in this order
    pub sources: Vec<DocumentSource>,

    /// Maximum number of documents analysed at the same time
    pub max_concurrent: usize,

    /// Show a progress bar during batch runs
    pub show_progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            max_concurrent: num_cpus::get().clamp(1, MAX_DEFAULT_CONCURRENCY),
            show_progress: true,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: DocumentSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = DocumentSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check the configuration before running
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(AnalysisError::configuration(
                "no documents configured for analysis",
            ));
        }

        if self.max_concurrent == 0 {
            return Err(AnalysisError::configuration(
                "max_concurrent must be greater than 0",
            ));
        }

        debug!(
            "Configuration valid: {} sources, max {} concurrent",
            self.sources.len(),
            self.max_concurrent
        );
        Ok(())
    }
}
