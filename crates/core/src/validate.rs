//! Station code and date validation.
//!
//! The predicates accept a match anywhere in the input rather than requiring
//! the whole string to conform, so `"xxABCyy"` passes as a station code.
//! [`StationCode`] and [`IsoDate`] wrap a value that has passed its predicate.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{KeretaError, Result};

static STATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2,3}").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

/// Returns true if `code` contains a run of 2 or 3 uppercase ASCII letters.
pub fn is_valid_station(code: &str) -> bool {
    STATION_RE.is_match(code)
}

/// Returns true if `date` contains a `YYYY-MM-DD` substring.
pub fn is_valid_date(date: &str) -> bool {
    DATE_RE.is_match(date)
}

/// A station code that passed [`is_valid_station`].
///
/// # Example
///
/// ```rust
/// use kereta_core::StationCode;
///
/// let pse = StationCode::parse("PSE").unwrap();
/// assert_eq!(pse.as_str(), "PSE");
/// assert!(StationCode::parse("pse").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Validates `code` and keeps it as given.
    pub fn parse(code: &str) -> Result<Self> {
        if is_valid_station(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(KeretaError::InvalidInput { field: "station", value: code.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caller-supplied date that passed [`is_valid_date`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsoDate(String);

impl IsoDate {
    /// Validates `date` and keeps it as given.
    pub fn parse(date: &str) -> Result<Self> {
        if is_valid_date(date) {
            Ok(Self(date.to_string()))
        } else {
            Err(KeretaError::InvalidInput { field: "date", value: date.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `YYYY-MM-DD` run inside the input.
    pub fn matched(&self) -> &str {
        DATE_RE.find(&self.0).map_or(self.0.as_str(), |m| m.as_str())
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
