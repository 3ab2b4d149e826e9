//! Search query construction for the booking site's schedule form.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::{IsoDate, MonthTable, StationCode, build_query};
//!
//! let from = StationCode::parse("PSE").unwrap();
//! let to = StationCode::parse("YK").unwrap();
//! let date = IsoDate::parse("2022-09-20").unwrap();
//!
//! let query = build_query(&from, &to, &date, MonthTable::indonesian()).unwrap();
//! assert_eq!(query.get("tanggal"), Some("20-September-2022"));
//! ```

use url::{Url, form_urlencoded};

use crate::date::{MonthTable, to_localized_date};
use crate::validate::{IsoDate, StationCode};
use crate::{KeretaError, Result};

pub const ORIGINATION: &str = "origination";
pub const DESTINATION: &str = "destination";
pub const TANGGAL: &str = "tanggal";
pub const ADULT: &str = "adult";
pub const INFANT: &str = "infant";
pub const SUBMIT: &str = "submit";

/// Every key of a search query, in the order they are encoded.
pub const QUERY_KEYS: [&str; 6] = [ORIGINATION, DESTINATION, TANGGAL, ADULT, INFANT, SUBMIT];

const ADULT_COUNT: &str = "1";
const INFANT_COUNT: &str = "0";
const SUBMIT_LABEL: &str = "Cari & Pesan Tiket";

/// The six form fields of an outbound schedule search.
///
/// Keys always come out in [`QUERY_KEYS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    values: [String; 6],
}

impl SearchQuery {
    /// Gets the value stored under `key`, if it is one of the six query keys.
    pub fn get(&self, key: &str) -> Option<&str> {
        QUERY_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| self.values[i].as_str())
    }

    /// Iterates over `(key, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        QUERY_KEYS.iter().copied().zip(self.values.iter().map(String::as_str))
    }

    /// Encodes the query as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Parses an encoded query back into its six fields.
    ///
    /// Pairs with other keys are ignored. When a key repeats, the first value wins.
    ///
    /// # Errors
    ///
    /// Returns [`KeretaError::MalformedQuery`] if any of the six keys is missing.
    pub fn decode(encoded: &str) -> Result<Self> {
        let encoded = encoded.strip_prefix('?').unwrap_or(encoded);
        let mut values: [Option<String>; 6] = Default::default();

        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            if let Some(i) = QUERY_KEYS.iter().position(|k| *k == key)
                && values[i].is_none()
            {
                values[i] = Some(value.into_owned());
            }
        }

        let mut decoded: [String; 6] = Default::default();
        for (i, value) in values.into_iter().enumerate() {
            decoded[i] = value.ok_or_else(|| KeretaError::MalformedQuery {
                key: QUERY_KEYS[i],
                query: encoded.to_string(),
            })?;
        }

        Ok(Self { values: decoded })
    }

    /// Returns `base` with its query string replaced by this query.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&self.encode()));
        url
    }
}

/// Builds the search query for a one-way trip from `from` to `to` on `date`.
///
/// Inputs are already validated by their types; the only failure comes from
/// localizing the date.
pub fn build_query(from: &StationCode, to: &StationCode, date: &IsoDate, months: &MonthTable) -> Result<SearchQuery> {
    let tanggal = to_localized_date(date, months)?;

    let query = SearchQuery {
        values: [
            from.as_str().to_string(),
            to.as_str().to_string(),
            tanggal.into_string(),
            ADULT_COUNT.to_string(),
            INFANT_COUNT.to_string(),
            SUBMIT_LABEL.to_string(),
        ],
    };

    tracing::debug!(origination = %from, destination = %to, tanggal = query.values[2].as_str(), "built search query");

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(from: &str, to: &str, date: &str) -> Result<SearchQuery> {
        build_query(
            &StationCode::parse(from).unwrap(),
            &StationCode::parse(to).unwrap(),
            &IsoDate::parse(date).unwrap(),
            MonthTable::indonesian(),
        )
    }

    #[test]
    fn test_build_query_fields() {
        let q = query("PSE", "YK", "2022-09-20").unwrap();
        let localized =
            to_localized_date(&IsoDate::parse("2022-09-20").unwrap(), MonthTable::indonesian()).unwrap();

        assert_eq!(q.get(ORIGINATION), Some("PSE"));
        assert_eq!(q.get(DESTINATION), Some("YK"));
        assert_eq!(q.get(TANGGAL), Some(localized.as_str()));
        assert_eq!(q.get(ADULT), Some("1"));
        assert_eq!(q.get(INFANT), Some("0"));
        assert_eq!(q.get(SUBMIT), Some("Cari & Pesan Tiket"));
        assert_eq!(q.get("children"), None);
    }

    #[test]
    fn test_passenger_counts_are_constant() {
        for (from, to, date) in [("GMR", "BD", "2023-01-01"), ("SGU", "ML", "2024-12-31"), ("KAC", "PWT", "2022-06-15")]
        {
            let q = query(from, to, date).unwrap();
            assert_eq!(q.get(ADULT), Some("1"));
            assert_eq!(q.get(INFANT), Some("0"));
        }
    }

    #[test]
    fn test_key_order_is_stable() {
        let q = query("PSE", "YK", "2022-09-20").unwrap();
        let keys: Vec<&str> = q.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, QUERY_KEYS);
    }

    #[test]
    fn test_build_query_invalid_month() {
        assert!(matches!(query("PSE", "YK", "2022-13-01"), Err(KeretaError::InvalidMonth(_))));
    }

    #[test]
    fn test_build_query_uses_matched_date() {
        let q = query("PSE", "YK", "on 2022-09-20").unwrap();
        assert_eq!(q.get(TANGGAL), Some("20-September-2022"));
    }

    #[test]
    fn test_encode() {
        let q = query("PSE", "YK", "2022-09-20").unwrap();
        assert_eq!(
            q.encode(),
            "origination=PSE&destination=YK&tanggal=20-September-2022&adult=1&infant=0&submit=Cari+%26+Pesan+Tiket"
        );
    }

    #[test]
    fn test_encode_decode_preserves_mapping() {
        let q = query("PSE", "YK", "2022-09-20").unwrap();
        let decoded = SearchQuery::decode(&q.encode()).unwrap();

        let original: HashMap<_, _> = q.iter().collect();
        let roundtrip: HashMap<_, _> = decoded.iter().collect();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_decode_any_order() {
        let decoded = SearchQuery::decode(
            "?submit=Cari+%26+Pesan+Tiket&infant=0&adult=1&tanggal=05-Januari-2022&destination=YK&origination=GMR&x=1",
        )
        .unwrap();
        assert_eq!(decoded.get(ORIGINATION), Some("GMR"));
        assert_eq!(decoded.get(SUBMIT), Some("Cari & Pesan Tiket"));
    }

    #[test]
    fn test_decode_missing_key() {
        let err = SearchQuery::decode("origination=PSE&destination=YK").unwrap_err();
        assert!(matches!(err, KeretaError::MalformedQuery { key: "tanggal", .. }));
        assert!(!err.is_bad_input());
    }

    #[test]
    fn test_to_url() {
        let base = Url::parse("https://booking.kai.id/").unwrap();
        let url = query("PSE", "YK", "2022-09-20").unwrap().to_url(&base);

        assert_eq!(url.host_str(), Some("booking.kai.id"));
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("tanggal").map(String::as_str), Some("20-September-2022"));
        assert_eq!(pairs.get("submit").map(String::as_str), Some("Cari & Pesan Tiket"));
    }
}
