//! Delimited document parsing.
//!
//! Reads a CSV-like file with a header row through the Polars CSV reader,
//! keeping every cell as text, and maps each row to a record with a
//! [`RowMapper`]. Numeric cells are converted with the parser's [`Locale`].
//! Any failure is reported as a document creation error naming the file.
//! Lines without any value are skipped; a line with values but none in the
//! required columns becomes a missing slot.

use crate::constants::{countries, weather};
use crate::document::{Document, RecordSlot};
use crate::error::{AnalysisError, Result};
use crate::models::{CountryRecord, Record, WeatherRecord};
use crate::numeric::{Locale, parse_integer, parse_real};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Produces a [`Document`] from a source file
pub trait DocumentParser {
    fn parse_document(&self, path: &Path) -> Result<Document>;
}

/// Cells of one row, restricted to the columns a mapper asked for
#[derive(Debug)]
pub struct RowView<'a> {
    line: usize,
    columns: &'static [&'static str],
    values: Vec<Option<&'a str>>,
}

impl<'a> RowView<'a> {
    /// 1-based line number in the source file, header included
    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw cell value; `None` for an empty cell or an unknown column
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|name| *name == column)
            .and_then(|index| self.values.get(index).copied().flatten())
    }

    /// Cell value, or an empty string for an empty cell
    pub fn text(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or_default()
    }

    fn is_blank(&self) -> bool {
        self.values
            .iter()
            .all(|value| value.is_none_or(|v| v.trim().is_empty()))
    }
}

/// Maps a row of a known layout to a record
pub trait RowMapper: Send + Sync {
    /// Columns that must be present in the header
    fn required_columns(&self) -> &'static [&'static str];

    fn map_row(&self, row: &RowView<'_>, locale: &Locale) -> Result<Box<dyn Record>>;
}

/// Rows of `Name;Population;Area (km²)` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryRowMapper;

impl RowMapper for CountryRowMapper {
    fn required_columns(&self) -> &'static [&'static str] {
        countries::COLUMNS
    }

    fn map_row(&self, row: &RowView<'_>, locale: &Locale) -> Result<Box<dyn Record>> {
        let record = CountryRecord::new(
            row.text(countries::NAME).trim(),
            parse_integer(row.text(countries::POPULATION), locale)?,
            parse_real(row.text(countries::AREA), locale)?,
        )?;
        Ok(Box::new(record))
    }
}

/// Rows of `Day,MxT,MnT,...` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherRowMapper;

impl RowMapper for WeatherRowMapper {
    fn required_columns(&self) -> &'static [&'static str] {
        weather::COLUMNS
    }

    fn map_row(&self, row: &RowView<'_>, locale: &Locale) -> Result<Box<dyn Record>> {
        let record = WeatherRecord::new(
            row.text(weather::DAY).trim(),
            parse_real(row.text(weather::MAX_TEMP), locale)?,
            parse_real(row.text(weather::MIN_TEMP), locale)?,
        )?;
        Ok(Box::new(record))
    }
}

/// CSV parser with a fixed delimiter and number locale
#[derive(Debug, Clone)]
pub struct CsvDocumentParser<M> {
    mapper: M,
    delimiter: u8,
    locale: Locale,
}

impl<M: RowMapper> CsvDocumentParser<M> {
    pub fn new(mapper: M, delimiter: u8, locale: Locale) -> Self {
        Self {
            mapper,
            delimiter,
            locale,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Read the whole file with every column as text
    fn read_frame(&self, path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            warn!("Document not found: {}", path.display());
            return Err(AnalysisError::document_creation(path, "file not found"));
        }

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_separator(self.delimiter))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        debug!(
            "Read {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            path.display()
        );
        Ok(frame)
    }

    fn map_frame(&self, frame: &DataFrame, path: &Path) -> Result<Vec<RecordSlot>> {
        let columns = self.mapper.required_columns();
        let cells = columns
            .iter()
            .map(|name| {
                let column = frame.column(name).map_err(|_| {
                    AnalysisError::document_creation(
                        path,
                        format!("missing required column '{}'", name),
                    )
                })?;
                Ok(column.str()?)
            })
            .collect::<Result<Vec<&StringChunked>>>()?;
        let all_cells = frame
            .get_columns()
            .iter()
            .map(|column| Ok(column.str()?))
            .collect::<Result<Vec<&StringChunked>>>()?;

        let mut entries = Vec::with_capacity(frame.height());
        for index in 0..frame.height() {
            if all_cells.iter().all(|cell| cell.get(index).is_none()) {
                debug!("Skipping empty line {} of {}", index + 2, path.display());
                continue;
            }

            let row = RowView {
                line: index + 2,
                columns,
                values: cells.iter().map(|cell| cell.get(index)).collect(),
            };

            if row.is_blank() {
                debug!(
                    "Line {} of {} has no required values",
                    row.line,
                    path.display()
                );
                entries.push(None);
                continue;
            }

            let record = self.mapper.map_row(&row, &self.locale).map_err(|e| {
                warn!("Mapping line {} of {} failed: {}", row.line, path.display(), e);
                AnalysisError::document_creation(path, format!("line {}: {}", row.line, e))
            })?;
            entries.push(Some(record));
        }

        Ok(entries)
    }
}

impl<M: RowMapper> DocumentParser for CsvDocumentParser<M> {
    fn parse_document(&self, path: &Path) -> Result<Document> {
        let entries = self
            .read_frame(path)
            .and_then(|frame| self.map_frame(&frame, path))
            .map_err(|e| match e {
                AnalysisError::DocumentCreation { .. } => e,
                other => {
                    warn!("Parsing document {} failed: {}", path.display(), other);
                    AnalysisError::document_creation(path, other.to_string())
                }
            })?;

        debug!("Parsed {} entries from {}", entries.len(), path.display());
        Ok(Document::new(entries).with_source(path))
    }
}
