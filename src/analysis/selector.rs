//! Tie-aware best-match selection.
//!
//! Scores every record of a validated collection, determines the extremal
//! score under a [`Policy`] and returns all records that reach it. Ties are
//! decided by exact `f64` equality.

use super::validation::{validate, validate_homogeneous_scoreable};
use crate::document::{Document, RecordSlot};
use crate::error::{AnalysisError, Result};
use crate::models::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Whether the best score is the highest or the lowest one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Max,
    Min,
}

impl Policy {
    /// True if `candidate` beats `current` under this policy
    fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            Policy::Max => candidate > current,
            Policy::Min => candidate < current,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Max => f.write_str("max"),
            Policy::Min => f.write_str("min"),
        }
    }
}

/// Records sharing the best score, borrowed from the analysed collection
#[derive(Debug, Clone)]
pub struct BestMatches<'a> {
    policy: Policy,
    best_score: f64,
    matches: Vec<&'a dyn Record>,
}

impl<'a> BestMatches<'a> {
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Always false for a successful selection
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// First match in collection order
    pub fn first(&self) -> Option<&'a dyn Record> {
        self.matches.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a dyn Record> + '_ {
        self.matches.iter().copied()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.matches.iter().copied().map(|record| record.id()).collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.matches.iter().any(|record| record.id() == id)
    }

    /// Matches as their concrete record type; records of another type are skipped
    pub fn downcast<R: Record>(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.matches
            .iter()
            .copied()
            .filter_map(|record| record.downcast_ref::<R>())
    }

    pub fn into_records(self) -> Vec<&'a dyn Record> {
        self.matches
    }
}

impl<'a> IntoIterator for BestMatches<'a> {
    type Item = &'a dyn Record;
    type IntoIter = std::vec::IntoIter<&'a dyn Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

/// Select every record whose score equals the best score under `policy`.
///
/// Fails without partial results if the collection is structurally invalid,
/// empty, mixes record variants, or if any single score can't be computed.
pub fn select_best_matches(
    records: Option<&[RecordSlot]>,
    policy: Policy,
) -> Result<BestMatches<'_>> {
    validate(records, true)?;
    let Some(records) = records else {
        return Err(AnalysisError::MissingCollection);
    };

    if records.is_empty() {
        warn!("No candidate records for {} selection", policy);
        return Err(AnalysisError::NoCandidate);
    }

    validate_homogeneous_scoreable(records)?;

    let scored = records
        .iter()
        .flatten()
        .enumerate()
        .map(|(index, record)| {
            let scoreable = record
                .as_scoreable()
                .ok_or_else(|| AnalysisError::NotScoreable {
                    index,
                    id: record.id().to_string(),
                    variant: record.variant(),
                })?;
            Ok((&**record, scoreable.score()?))
        })
        .collect::<Result<Vec<(&dyn Record, f64)>>>()?;

    let best_score = scored
        .iter()
        .map(|(_, score)| *score)
        .reduce(|best, score| if policy.prefers(score, best) { score } else { best })
        .ok_or(AnalysisError::NoCandidate)?;

    let matches: Vec<&dyn Record> = scored
        .into_iter()
        .filter(|(_, score)| *score == best_score)
        .map(|(record, _)| record)
        .collect();

    debug!(
        "Best {} score {} shared by {} of {} records",
        policy,
        best_score,
        matches.len(),
        records.len()
    );

    Ok(BestMatches {
        policy,
        best_score,
        matches,
    })
}

/// Select the best matches among the records of `document`
pub fn select_best_matches_in(document: &Document, policy: Policy) -> Result<BestMatches<'_>> {
    debug!(
        "Selecting {} best matches in {} ({} entries)",
        policy,
        document
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-memory document".to_string()),
        document.len()
    );
    select_best_matches(Some(document.entries()), policy)
}
