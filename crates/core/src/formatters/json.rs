use crate::Result;
use crate::query::SearchQuery;
use crate::record::ResultSet;
use serde::Serialize;

/// JSON output with the search that produced it
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Decoded search fields, in query order
    pub query: Vec<QueryField<'a>>,
    /// Number of trains found
    pub count: usize,
    /// The trains themselves
    pub trains: &'a ResultSet,
}

/// One search field for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct QueryField<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Wrap the trains in an object that also carries the query
    pub include_query: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

fn serialize<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(json)
}

/// Convert trains to JSON.
///
/// Without a query, or with `include_query` off, the output is a bare array
/// of train objects.
pub fn convert_to_json(trains: &ResultSet, query: Option<&SearchQuery>, config: &JsonConfig) -> Result<String> {
    match query {
        Some(query) if config.include_query => {
            let output = JsonOutput {
                query: query.iter().map(|(key, value)| QueryField { key, value }).collect(),
                count: trains.len(),
                trains,
            };
            serialize(&output, config.pretty)
        }
        _ => serialize(trains, config.pretty),
    }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, trains: &ResultSet, query: Option<&SearchQuery>) -> Result<String> {
        convert_to_json(trains, query, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TrainRecord;
    use crate::{IsoDate, MonthTable, StationCode, build_query};

    fn trains() -> ResultSet {
        ResultSet::new(vec![
            TrainRecord { train_name: "ARGO LAWU".to_string(), ..Default::default() },
            TrainRecord { train_name: "TAKSAKA".to_string(), ..Default::default() },
        ])
    }

    fn query() -> SearchQuery {
        build_query(
            &StationCode::parse("PSE").unwrap(),
            &StationCode::parse("YK").unwrap(),
            &IsoDate::parse("2022-09-20").unwrap(),
            MonthTable::indonesian(),
        )
        .unwrap()
    }

    #[test]
    fn test_convert_to_json_compact_array() {
        let json = convert_to_json(&trains(), None, &JsonConfig::default()).unwrap();
        assert!(json.starts_with("[{"));
        assert!(json.contains(r#""trainName":"ARGO LAWU""#));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_convert_to_json_pretty() {
        let config = JsonConfig { pretty: true, ..Default::default() };
        let json = convert_to_json(&trains(), None, &config).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains(r#""trainName": "TAKSAKA""#));
    }

    #[test]
    fn test_convert_to_json_empty() {
        let json = convert_to_json(&ResultSet::default(), None, &JsonConfig::default()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_convert_to_json_with_query() {
        let config = JsonConfig { include_query: true, pretty: false };
        let json = convert_to_json(&trains(), Some(&query()), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["query"][2]["key"], "tanggal");
        assert_eq!(value["query"][2]["value"], "20-September-2022");
        assert_eq!(value["trains"][1]["trainName"], "TAKSAKA");
    }

    #[test]
    fn test_query_ignored_when_disabled() {
        let json = convert_to_json(&trains(), Some(&query()), &JsonConfig::default()).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_json_formatter() {
        let config = JsonConfig { pretty: true, ..Default::default() };
        let formatter = JsonFormatter::new(config.clone());

        let direct = convert_to_json(&trains(), None, &config).unwrap();
        assert_eq!(formatter.convert(&trains(), None).unwrap(), direct);
    }
}
