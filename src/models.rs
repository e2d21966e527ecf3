//! Record types that can be analysed for a best match.
//!
//! A record is an immutable row of a source document: an identifier plus
//! domain fields, validated once at construction. Records that can take
//! part in a best-match analysis also implement [`Scoreable`].

use crate::error::{AnalysisError, Result};
use std::any::{Any, TypeId};
use std::fmt;
use tracing::{error, trace, warn};

/// One parsed row of a document
pub trait Record: fmt::Debug + Send + Sync + 'static {
    /// Identifier of the record (country name, day label, ...)
    fn id(&self) -> &str;

    /// Human-readable name of the record variant, used in diagnostics
    fn variant(&self) -> &'static str;

    /// Access to the concrete type for variant comparison and downcasting
    fn as_any(&self) -> &dyn Any;

    /// Scoring capability of this record, if it has one
    fn as_scoreable(&self) -> Option<&dyn Scoreable> {
        None
    }
}

impl dyn Record {
    /// Concrete type identity, two records of the same variant share it
    pub fn variant_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    pub fn downcast_ref<R: Record>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }
}

/// Capability of exposing a finite numeric score
pub trait Scoreable {
    /// Derived score of the record; fails if the value is not finite
    fn score(&self) -> Result<f64>;
}

/// Ensure a record id is usable
fn validate_id(id: impl Into<String>) -> Result<String> {
    let id = id.into();
    if id.trim().is_empty() {
        warn!("Record created with empty id");
        return Err(AnalysisError::invalid_record(id, "id can't be empty"));
    }
    Ok(id)
}

/// Country with its population and area in km²; scored by population density
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    name: String,
    population: i64,
    area: f64,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, population: i64, area: f64) -> Result<Self> {
        let name = validate_id(name)?;

        if population < 0 {
            warn!("Population ({}) less than 0 for {}", population, name);
            return Err(AnalysisError::invalid_record(
                name,
                "population must be greater than or equal to 0",
            ));
        }
        if !area.is_finite() || area <= 0.0 {
            warn!("Area ({}) not a positive finite value for {}", area, name);
            return Err(AnalysisError::invalid_record(
                name,
                "area must be a positive finite number",
            ));
        }

        trace!(
            "Created country record {} (population {}, area {})",
            name, population, area
        );
        Ok(Self {
            name,
            population,
            area,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> i64 {
        self.population
    }

    pub fn area(&self) -> f64 {
        self.area
    }
}

impl Record for CountryRecord {
    fn id(&self) -> &str {
        &self.name
    }

    fn variant(&self) -> &'static str {
        "country"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_scoreable(&self) -> Option<&dyn Scoreable> {
        Some(self)
    }
}

impl Scoreable for CountryRecord {
    fn score(&self) -> Result<f64> {
        let density = self.population as f64 / self.area;
        if !density.is_finite() {
            error!(
                "Density of {} is not finite (population {}, area {})",
                self.name, self.population, self.area
            );
            return Err(AnalysisError::non_finite_score(
                &self.name,
                format!("population {} / area {}", self.population, self.area),
            ));
        }
        Ok(density)
    }
}

impl fmt::Display for CountryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (population: {}, area: {} km²)",
            self.name, self.population, self.area
        )
    }
}

/// Day with its maximum and minimum temperature; scored by temperature spread
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    day: String,
    max_temp: f64,
    min_temp: f64,
}

impl WeatherRecord {
    pub fn new(day: impl Into<String>, max_temp: f64, min_temp: f64) -> Result<Self> {
        let day = validate_id(day)?;

        if !max_temp.is_finite() || !min_temp.is_finite() {
            warn!(
                "Non-finite temperature for day {}: max {}, min {}",
                day, max_temp, min_temp
            );
            return Err(AnalysisError::invalid_record(
                day,
                "temperatures must be finite",
            ));
        }
        if max_temp < min_temp {
            warn!(
                "Max temperature {} lower than min temperature {} for day {}",
                max_temp, min_temp, day
            );
            return Err(AnalysisError::invalid_record(
                day,
                "maximum temperature can't be less than minimum temperature",
            ));
        }

        trace!(
            "Created weather record {} (max {}, min {})",
            day, max_temp, min_temp
        );
        Ok(Self {
            day,
            max_temp,
            min_temp,
        })
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }

    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }
}

impl Record for WeatherRecord {
    fn id(&self) -> &str {
        &self.day
    }

    fn variant(&self) -> &'static str {
        "weather"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_scoreable(&self) -> Option<&dyn Scoreable> {
        Some(self)
    }
}

impl Scoreable for WeatherRecord {
    fn score(&self) -> Result<f64> {
        let spread = self.max_temp - self.min_temp;
        if !spread.is_finite() {
            error!(
                "Temperature spread overflowed for day {}: max {}, min {}",
                self.day, self.max_temp, self.min_temp
            );
            return Err(AnalysisError::non_finite_score(
                &self.day,
                format!("{} - {} overflowed", self.max_temp, self.min_temp),
            ));
        }
        Ok(spread)
    }
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} (max: {}, min: {})",
            self.day, self.max_temp, self.min_temp
        )
    }
}
