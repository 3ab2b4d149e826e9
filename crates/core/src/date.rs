//! Conversion of `YYYY-MM-DD` dates into the `DD-MonthName-YYYY` form the
//! booking search form expects.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::{IsoDate, MonthTable, to_localized_date};
//!
//! let date = IsoDate::parse("2022-09-20").unwrap();
//! let localized = to_localized_date(&date, MonthTable::indonesian()).unwrap();
//! assert_eq!(localized.as_str(), "20-September-2022");
//! ```

use std::fmt;

use crate::validate::IsoDate;
use crate::{KeretaError, Result};

static INDONESIAN: MonthTable = MonthTable::new([
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
]);

/// Month names indexed by their two-digit key (`"01"` through `"12"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    names: [&'static str; 12],
}

impl MonthTable {
    /// Builds a table from twelve names, January first.
    pub const fn new(names: [&'static str; 12]) -> Self {
        Self { names }
    }

    /// The Indonesian table used by the booking site.
    pub fn indonesian() -> &'static MonthTable {
        &INDONESIAN
    }

    /// Looks up a two-digit month key such as `"09"`.
    ///
    /// Single digits, three digits and anything outside `01..=12` are not keys.
    pub fn name(&self, key: &str) -> Option<&'static str> {
        if key.len() != 2 || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let month: usize = key.parse().ok()?;
        match month {
            1..=12 => Some(self.names[month - 1]),
            _ => None,
        }
    }
}

/// A date in `DD-MonthName-YYYY` form, only produced by [`to_localized_date`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedDate(String);

impl LocalizedDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LocalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces the month segment with its name and reverses the segment order.
///
/// Only the `YYYY-MM-DD` run inside the input is converted; surrounding text
/// accepted by validation is dropped.
///
/// # Errors
///
/// Returns [`KeretaError::InvalidMonth`] when the middle segment is not a
/// month key.
pub fn to_localized_date(date: &IsoDate, months: &MonthTable) -> Result<LocalizedDate> {
    let matched = date.matched();
    let segments: Vec<&str> = matched.split('-').collect();
    let [year, month, day] = segments[..] else {
        return Err(KeretaError::InvalidMonth(matched.to_string()));
    };

    let month_name = months
        .name(month)
        .ok_or_else(|| KeretaError::InvalidMonth(month.to_string()))?;

    Ok(LocalizedDate(format!("{}-{}-{}", day, month_name, year)))
}
