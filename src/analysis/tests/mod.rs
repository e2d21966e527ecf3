//! Tests for the analysis module
//!
//! Fixtures shared by the validation, selector and analyser tests.

pub mod selector_tests;

use crate::document::{Document, RecordSlot};
use crate::models::{CountryRecord, Record, WeatherRecord};
use std::any::Any;

/// Record without a score, for capability checks
#[derive(Debug)]
pub struct NoteRecord {
    pub id: String,
}

impl Record for NoteRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn variant(&self) -> &'static str {
        "note"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn country(name: &str, population: i64, area: f64) -> RecordSlot {
    Some(Box::new(CountryRecord::new(name, population, area).unwrap()))
}

pub fn weather(day: &str, max_temp: f64, min_temp: f64) -> RecordSlot {
    Some(Box::new(WeatherRecord::new(day, max_temp, min_temp).unwrap()))
}

pub fn note(id: &str) -> RecordSlot {
    Some(Box::new(NoteRecord { id: id.to_string() }))
}

/// Weather records with the given spreads, ids are "1", "2", ...
pub fn weather_with_spreads(spreads: &[f64]) -> Vec<RecordSlot> {
    spreads
        .iter()
        .enumerate()
        .map(|(i, spread)| weather(&(i + 1).to_string(), 20.0 + spread, 20.0))
        .collect()
}

pub fn sorted(ids: Vec<&str>) -> Vec<String> {
    let mut ids: Vec<String> = ids.into_iter().map(str::to_string).collect();
    ids.sort();
    ids
}
