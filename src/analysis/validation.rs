//! Structural validation of record collections before analysis.
//!
//! Validation is a pure gate: it either accepts the collection or reports
//! the first violation it finds. Nothing is repaired or skipped.

use crate::document::RecordSlot;
use crate::error::{AnalysisError, Result};
use tracing::{debug, warn};

/// Check that a collection is present and has no missing elements.
///
/// An empty collection is accepted only when `allow_empty` is set. A missing
/// element is reported separately from an empty collection.
pub fn validate<T>(records: Option<&[Option<T>]>, allow_empty: bool) -> Result<()> {
    let Some(records) = records else {
        warn!("Record collection is missing");
        return Err(AnalysisError::MissingCollection);
    };

    if records.is_empty() && !allow_empty {
        warn!("Record collection is empty");
        return Err(AnalysisError::EmptyCollection);
    }

    if let Some(index) = records.iter().position(Option::is_none) {
        warn!("Record collection has a missing element at index {}", index);
        return Err(AnalysisError::MissingElement { index });
    }

    Ok(())
}

/// Check that a non-empty collection holds only scoreable records of a
/// single variant.
///
/// Mixing variants is a programming error and is reported before any score
/// is computed.
pub fn validate_homogeneous_scoreable(records: &[RecordSlot]) -> Result<()> {
    validate(Some(records), false)?;

    let Some(Some(first)) = records.first() else {
        return Err(AnalysisError::EmptyCollection);
    };
    let expected_id = first.variant_id();
    let expected = first.variant();

    for (index, record) in records.iter().flatten().enumerate() {
        if record.as_scoreable().is_none() {
            warn!(
                "Record {} at index {} ({}) is not scoreable",
                record.id(),
                index,
                record.variant()
            );
            return Err(AnalysisError::NotScoreable {
                index,
                id: record.id().to_string(),
                variant: record.variant(),
            });
        }

        if record.variant_id() != expected_id {
            warn!(
                "Different record variants present: {} at index {}, expected {}",
                record.variant(),
                index,
                expected
            );
            return Err(AnalysisError::MixedVariants {
                index,
                expected,
                found: record.variant(),
            });
        }
    }

    debug!(
        "Validated {} scoreable {} records",
        records.len(),
        expected
    );
    Ok(())
}
