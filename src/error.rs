//! Error handling for parsing and best-match analysis.
//!
//! Every failure of the crate is an [`AnalysisError`]. Callers that need to
//! branch on the category of a failure (bad data vs. out of range vs. a
//! malformed collection) use [`AnalysisError::kind`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Numeric input is empty or blank")]
    EmptyInput,

    #[error("Invalid number '{input}': {reason}")]
    InvalidNumber { input: String, reason: String },

    #[error("Number '{input}' is out of range for {target}")]
    NumericOverflow { input: String, target: &'static str },

    #[error("Record collection is missing")]
    MissingCollection,

    #[error("Record collection is empty")]
    EmptyCollection,

    #[error("Record collection has a missing element at index {index}")]
    MissingElement { index: usize },

    #[error("Record '{id}' at index {index} ({variant}) does not expose a score")]
    NotScoreable {
        index: usize,
        id: String,
        variant: &'static str,
    },

    #[error("Mixed record variants: expected {expected}, found {found} at index {index}")]
    MixedVariants {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No candidate records to select a best match from")]
    NoCandidate,

    #[error("Score of record '{id}' is not finite: {detail}")]
    NonFiniteScore { id: String, detail: String },

    #[error("Invalid record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Document could not be created from {path}: {reason}")]
    DocumentCreation { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse failure categories of [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Blank numeric token
    EmptyInput,
    /// Numeric token with content that is not a number in the given locale
    Format,
    /// Numeric token whose magnitude does not fit the target type
    Overflow,
    /// Structurally invalid record collection
    Validation,
    /// Well-formed but empty record collection
    NoCandidate,
    /// Score computation produced a non-finite value
    Arithmetic,
    /// Record construction rejected its domain values
    InvalidRecord,
    /// Reading or mapping a source document failed
    Document,
    Configuration,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::InvalidNumber { .. } => ErrorKind::Format,
            Self::NumericOverflow { .. } => ErrorKind::Overflow,
            Self::MissingCollection
            | Self::EmptyCollection
            | Self::MissingElement { .. }
            | Self::NotScoreable { .. }
            | Self::MixedVariants { .. } => ErrorKind::Validation,
            Self::NoCandidate => ErrorKind::NoCandidate,
            Self::NonFiniteScore { .. } => ErrorKind::Arithmetic,
            Self::InvalidRecord { .. } => ErrorKind::InvalidRecord,
            Self::DocumentCreation { .. } | Self::Io(_) | Self::Polars(_) => ErrorKind::Document,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNumber {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a non-finite score error
    pub fn non_finite_score(id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NonFiniteScore {
            id: id.into(),
            detail: detail.into(),
        }
    }

    /// Wrap any lower-level failure into a document creation error
    pub fn document_creation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DocumentCreation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
