//! Locale-aware numeric string parsing.
//!
//! Converts text tokens from source documents into `i64` or `f64` values
//! using the grouping and decimal separators of an explicitly supplied
//! [`Locale`]. Blank input, malformed input and out-of-range magnitudes are
//! reported as distinct error kinds.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{trace, warn};

/// Separator conventions used when reading numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Locale {
    tag: &'static str,
    decimal: char,
    grouping: char,
    alt_grouping: &'static [char],
}

impl Locale {
    pub const US: Locale = Locale {
        tag: "en-US",
        decimal: '.',
        grouping: ',',
        alt_grouping: &[],
    };

    pub const UK: Locale = Locale {
        tag: "en-GB",
        decimal: '.',
        grouping: ',',
        alt_grouping: &[],
    };

    pub const GERMANY: Locale = Locale {
        tag: "de-DE",
        decimal: ',',
        grouping: '.',
        alt_grouping: &[],
    };

    /// French grouping is a narrow no-break space; plain and no-break
    /// spaces are accepted as well since spreadsheets emit either.
    pub const FRANCE: Locale = Locale {
        tag: "fr-FR",
        decimal: ',',
        grouping: '\u{202F}',
        alt_grouping: &['\u{00A0}', ' '],
    };

    pub const SWITZERLAND: Locale = Locale {
        tag: "de-CH",
        decimal: '.',
        grouping: '\u{2019}',
        alt_grouping: &['\''],
    };

    pub const ALL: &'static [Locale] = &[
        Self::US,
        Self::UK,
        Self::GERMANY,
        Self::FRANCE,
        Self::SWITZERLAND,
    ];

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal
    }

    pub fn grouping_separator(&self) -> char {
        self.grouping
    }

    fn is_grouping(&self, c: char) -> bool {
        c == self.grouping || self.alt_grouping.contains(&c)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

impl FromStr for Locale {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('_', "-").to_lowercase();
        let locale = match normalized.as_str() {
            "en-us" | "en" | "us" => Self::US,
            "en-gb" | "gb" | "uk" => Self::UK,
            "de-de" | "de" => Self::GERMANY,
            "fr-fr" | "fr" => Self::FRANCE,
            "de-ch" | "ch" => Self::SWITZERLAND,
            _ => {
                return Err(AnalysisError::configuration(format!(
                    "Unsupported locale '{}' (supported: {})",
                    s,
                    Self::ALL
                        .iter()
                        .map(|l| l.tag)
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        };
        Ok(locale)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag.to_string()
    }
}

/// Sign and digit groups of a token after separators have been removed
#[derive(Debug, PartialEq)]
struct NumberParts {
    negative: bool,
    integer: String,
    fraction: Option<String>,
}

impl NumberParts {
    fn sign(&self) -> &'static str {
        if self.negative { "-" } else { "" }
    }

    /// Integer digits as the value would be rendered back: no leading
    /// zeros, no sign on zero
    fn canonical_integer(&self) -> String {
        let digits = self.integer.trim_start_matches('0');
        if digits.is_empty() {
            "0".to_string()
        } else {
            format!("{}{}", self.sign(), digits)
        }
    }

    fn has_fraction_value(&self) -> bool {
        self.fraction
            .as_deref()
            .is_some_and(|f| f.chars().any(|c| c != '0'))
    }
}

/// Parse an integer from `text` using the separators of `locale`
pub fn parse_integer(text: &str, locale: &Locale) -> Result<i64> {
    let candidate = validate_candidate(text)?;
    trace!("Parsing integer from '{}' ({})", candidate, locale);

    let parts = split_number(candidate, locale)?;
    if parts.has_fraction_value() {
        warn!("Integer token '{}' has a fractional part", candidate);
        return Err(AnalysisError::invalid_number(
            candidate,
            "integer value can't have a fractional part",
        ));
    }

    let canonical = parts.canonical_integer();
    let value = canonical.parse::<i64>().map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
            warn!("Parsing '{}' failed, i64 overflow", candidate);
            AnalysisError::NumericOverflow {
                input: candidate.to_string(),
                target: "i64",
            }
        }
        _ => AnalysisError::invalid_number(candidate, e.to_string()),
    })?;

    // Re-render and compare so a clamped or wrapped value can't slip through
    if value.to_string() != canonical {
        warn!(
            "Parsing '{}' produced {}, magnitude likely too large",
            candidate, value
        );
        return Err(AnalysisError::NumericOverflow {
            input: candidate.to_string(),
            target: "i64",
        });
    }

    Ok(value)
}

/// Parse a real number from `text` using the separators of `locale`
///
/// Grouping separators are accepted between any two integer digits without
/// checking group sizes, so `1,2` reads as `12` in en-US. A non-zero token
/// whose magnitude rounds to zero or to infinity is an overflow.
pub fn parse_real(text: &str, locale: &Locale) -> Result<f64> {
    let candidate = validate_candidate(text)?;
    trace!("Parsing real from '{}' ({})", candidate, locale);

    let parts = split_number(candidate, locale)?;
    let integer = if parts.integer.is_empty() {
        "0"
    } else {
        parts.integer.as_str()
    };
    let literal = match parts.fraction.as_deref() {
        Some(fraction) if !fraction.is_empty() => {
            format!("{}{}.{}", parts.sign(), integer, fraction)
        }
        _ => format!("{}{}", parts.sign(), integer),
    };

    let value = literal
        .parse::<f64>()
        .map_err(|e| AnalysisError::invalid_number(candidate, e.to_string()))?;

    if !value.is_finite() {
        warn!("Parsing '{}' failed, f64 overflow", candidate);
        return Err(AnalysisError::NumericOverflow {
            input: candidate.to_string(),
            target: "f64",
        });
    }

    if value == 0.0 && literal.chars().any(|c| matches!(c, '1'..='9')) {
        warn!("Parsing '{}' failed, f64 underflow", candidate);
        return Err(AnalysisError::NumericOverflow {
            input: candidate.to_string(),
            target: "f64",
        });
    }

    Ok(value)
}

fn validate_candidate(text: &str) -> Result<&str> {
    let candidate = text.trim();
    if candidate.is_empty() {
        warn!("Blank numeric token");
        return Err(AnalysisError::EmptyInput);
    }
    if candidate.chars().any(char::is_alphabetic) {
        warn!("Numeric token '{}' contains letters", candidate);
        return Err(AnalysisError::invalid_number(
            candidate,
            "number can't contain letters",
        ));
    }
    Ok(candidate)
}

/// Split a trimmed token into sign, integer digits and fraction digits.
///
/// Grouping separators are only allowed in the integer part and must sit
/// between two digits.
fn split_number(candidate: &str, locale: &Locale) -> Result<NumberParts> {
    let mut chars = candidate.chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut integer = String::new();
    let mut fraction: Option<String> = None;
    let mut after_digit = false;
    let mut open_group = false;

    for c in chars {
        if c.is_ascii_digit() {
            match fraction.as_mut() {
                Some(fraction) => fraction.push(c),
                None => integer.push(c),
            }
            after_digit = true;
            open_group = false;
        } else if c == locale.decimal && fraction.is_none() && !open_group {
            fraction = Some(String::new());
            after_digit = false;
        } else if locale.is_grouping(c) && fraction.is_none() && after_digit {
            after_digit = false;
            open_group = true;
        } else {
            warn!(
                "Unexpected character {:?} in '{}' for locale {}",
                c, candidate, locale
            );
            return Err(AnalysisError::invalid_number(
                candidate,
                format!("unexpected character {:?} for locale {}", c, locale),
            ));
        }
    }

    if open_group {
        return Err(AnalysisError::invalid_number(
            candidate,
            "grouping separator must be followed by a digit",
        ));
    }
    if integer.is_empty() && fraction.as_deref().is_none_or(str::is_empty) {
        return Err(AnalysisError::invalid_number(candidate, "no digits found"));
    }

    Ok(NumberParts {
        negative,
        integer,
        fraction,
    })
}
