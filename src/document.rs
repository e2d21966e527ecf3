//! Ordered container of parsed records.
//!
//! A document is produced once by a parser and is read-only afterwards.
//! It performs no validation: an empty document, or one with a slot that
//! produced no record, is a legal value until it is analysed.

use crate::models::Record;
use std::fmt;
use std::path::{Path, PathBuf};

/// A row position in a document; `None` when the row yielded no record
pub type RecordSlot = Option<Box<dyn Record>>;

#[derive(Default)]
pub struct Document {
    entries: Vec<RecordSlot>,
    source: Option<PathBuf>,
}

impl Document {
    pub fn new(entries: Vec<RecordSlot>) -> Self {
        Self {
            entries,
            source: None,
        }
    }

    /// Build a document where every slot holds a record
    pub fn from_records(records: Vec<Box<dyn Record>>) -> Self {
        Self::new(records.into_iter().map(Some).collect())
    }

    /// Attach the path the document was read from
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn entries(&self) -> &[RecordSlot] {
        &self.entries
    }

    /// Records in document order, skipping empty slots
    pub fn records(&self) -> impl Iterator<Item = &dyn Record> {
        self.entries.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("source", &self.source)
            .field("entries", &self.entries)
            .finish()
    }
}

impl FromIterator<Box<dyn Record>> for Document {
    fn from_iter<I: IntoIterator<Item = Box<dyn Record>>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}
