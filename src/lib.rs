//! Best-match analysis of delimited documents
//!
//! Reads tabular documents whose rows become typed records, scores every
//! record and reports all records tied for the best score.
//!
//! This library provides tools for:
//! - Locale-aware parsing of integer and decimal text tokens
//! - Validating record collections before any scoring happens
//! - Tie-aware best-match selection under a maximise or minimise policy
//! - Reading weather and country CSV documents through Polars
//! - Concurrent batch analysis of many documents

pub mod analysis;
pub mod batch;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod models;
pub mod numeric;
pub mod parser;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use analysis::{BestMatches, CountryAnalyser, DocumentAnalyser, Policy, WeatherAnalyser};
pub use config::{AnalysisConfig, DocumentKind, DocumentSource};
pub use document::{Document, RecordSlot};
pub use error::{AnalysisError, ErrorKind, Result};
pub use models::{CountryRecord, Record, Scoreable, WeatherRecord};
pub use numeric::{Locale, parse_integer, parse_real};
