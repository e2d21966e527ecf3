//! Best-match analysis over documents of scoreable records.
//!
//! # Architecture
//!
//! - [`validation`] - Structural gate for record collections (present
//!   collection, no missing slots, one scoreable variant)
//! - [`selector`] - Computes the best score under a [`Policy`] and returns
//!   every record tied for it
//! - [`analysers`] - Per-domain entry points that fix the policy and the
//!   expected record variant
//!
//! # Example Usage
//!
//! ```rust
//! use best_match::analysis::{select_best_matches_in, Policy};
//! use best_match::document::Document;
//! use best_match::models::{Record, WeatherRecord};
//!
//! # fn example() -> best_match::Result<()> {
//! let document = Document::from_records(vec![
//!     Box::new(WeatherRecord::new("1", 10.0, 5.0)?) as Box<dyn Record>,
//!     Box::new(WeatherRecord::new("2", 7.0, 2.0)?),
//!     Box::new(WeatherRecord::new("3", 50.0, 20.0)?),
//! ]);
//!
//! let matches = select_best_matches_in(&document, Policy::Min)?;
//! assert_eq!(matches.ids(), vec!["1", "2"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod analysers;
pub mod selector;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use analysers::{CountryAnalyser, DocumentAnalyser, WeatherAnalyser};
pub use selector::{BestMatches, Policy, select_best_matches, select_best_matches_in};
pub use validation::{validate, validate_homogeneous_scoreable};
