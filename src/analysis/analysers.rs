//! Per-domain analysers with a fixed policy and record variant.

use super::selector::{BestMatches, Policy, select_best_matches_in};
use crate::document::Document;
use crate::error::{AnalysisError, Result};
use crate::models::{CountryRecord, Record, Scoreable, WeatherRecord};
use tracing::{debug, warn};

/// Best-match analysis of documents holding one known record variant
pub trait DocumentAnalyser {
    type Target: Record + Scoreable;

    /// Variant label of [`Self::Target`], used in diagnostics
    const VARIANT: &'static str;

    fn policy(&self) -> Policy;

    /// All records tied for the best score
    fn best_matches<'a>(&self, document: &'a Document) -> Result<BestMatches<'a>> {
        let matches = select_best_matches_in(document, self.policy())?;

        // Collections are homogeneous at this point, checking one record is enough
        if let Some(record) = matches.first() {
            if record.downcast_ref::<Self::Target>().is_none() {
                warn!(
                    "{} analyser received {} records",
                    Self::VARIANT,
                    record.variant()
                );
                return Err(AnalysisError::MixedVariants {
                    index: 0,
                    expected: Self::VARIANT,
                    found: record.variant(),
                });
            }
        }

        debug!(
            "{} analysis found {} best matches: {:?}",
            Self::VARIANT,
            matches.len(),
            matches.ids()
        );
        Ok(matches)
    }

    /// First record, in document order, of the tie set
    fn best_match<'a>(&self, document: &'a Document) -> Result<&'a Self::Target> {
        let matches = self.best_matches(document)?;
        matches
            .downcast::<Self::Target>()
            .next()
            .ok_or(AnalysisError::NoCandidate)
    }
}

/// Country with the highest population density
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryAnalyser;

impl DocumentAnalyser for CountryAnalyser {
    type Target = CountryRecord;
    const VARIANT: &'static str = "country";

    fn policy(&self) -> Policy {
        Policy::Max
    }
}

/// Day with the smallest temperature spread
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherAnalyser;

impl DocumentAnalyser for WeatherAnalyser {
    type Target = WeatherRecord;
    const VARIANT: &'static str = "weather";

    fn policy(&self) -> Policy {
        Policy::Min
    }
}
