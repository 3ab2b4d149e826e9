//! Train records produced by extraction.
//!
//! Every field is the raw text found on the page. Nothing is parsed into
//! numbers or times, so `"Rp 350.000"` and `"7j 43m"` come through as-is.

use serde::Serialize;

use crate::{KeretaError, Result};

/// Where and when a train departs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainOrigin {
    pub departure_station: String,
    pub departure_date: String,
    pub departure_time: String,
}

/// Where and when a train arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDestination {
    pub arrival_station: String,
    pub arrival_date: String,
    pub arrival_time: String,
}

/// One train offering, read from a single container node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecord {
    pub train_name: String,
    pub train_class: String,
    pub train_origin: TrainOrigin,
    pub train_destination: TrainDestination,
    pub travel_time: String,
    pub ticket_price: String,
    pub seat_availability: String,
}

/// The trains found by one extraction pass, in document order.
///
/// An empty set means the page listed no trains. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<TrainRecord>);

impl ResultSet {
    pub fn new(records: Vec<TrainRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainRecord> {
        self.0.iter()
    }

    pub fn records(&self) -> &[TrainRecord] {
        &self.0
    }

    pub fn into_records(self) -> Vec<TrainRecord> {
        self.0
    }

    /// Turns an empty set into [`KeretaError::NoResults`].
    ///
    /// For sinks that report "no matching route" separately from success.
    pub fn non_empty(self) -> Result<Self> {
        if self.is_empty() { Err(KeretaError::NoResults) } else { Ok(self) }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a TrainRecord;
    type IntoIter = std::slice::Iter<'a, TrainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = TrainRecord;
    type IntoIter = std::vec::IntoIter<TrainRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<TrainRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = TrainRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
