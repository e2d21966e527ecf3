//! Application constants for best-match analysis
//!
//! Column names of the supported document layouts and the default source
//! conventions used when the command line doesn't override them.

// =============================================================================
// Country Documents
// =============================================================================

pub mod countries {
    use crate::numeric::Locale;

    /// Column holding the country name (record id)
    pub const NAME: &str = "Name";

    /// Column holding the population count
    pub const POPULATION: &str = "Population";

    /// Column holding the area in square kilometres
    pub const AREA: &str = "Area (km²)";

    pub const COLUMNS: &[&str] = &[NAME, POPULATION, AREA];

    pub const DEFAULT_DELIMITER: u8 = b';';

    /// Country sources are published with German number formatting
    pub const DEFAULT_LOCALE: Locale = Locale::GERMANY;
}

// =============================================================================
// Weather Documents
// =============================================================================

pub mod weather {
    use crate::numeric::Locale;

    /// Column holding the day label (record id)
    pub const DAY: &str = "Day";

    /// Column holding the maximum temperature of the day
    pub const MAX_TEMP: &str = "MxT";

    /// Column holding the minimum temperature of the day
    pub const MIN_TEMP: &str = "MnT";

    pub const COLUMNS: &[&str] = &[DAY, MAX_TEMP, MIN_TEMP];

    pub const DEFAULT_DELIMITER: u8 = b',';

    pub const DEFAULT_LOCALE: Locale = Locale::US;
}

// =============================================================================
// Batch Processing
// =============================================================================

/// Upper bound for concurrently analysed documents when not configured
pub const MAX_DEFAULT_CONCURRENCY: usize = 8;

/// Progress bar template for batch runs
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Environment variable prefix filter used when RUST_LOG is not set
pub const LOG_TARGET: &str = "best_match";
