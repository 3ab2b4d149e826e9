//! One-shot schedule search.
//!
//! Ties the pieces together in the order a caller needs them: validate the
//! raw input, build the query, fetch the results page, and extract trains.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::search::{SearchConfig, SearchRequest, search_url};
//!
//! let request = SearchRequest::validate("PSE", "YK", "2022-09-20").unwrap();
//! let (_, url) = search_url(&request, &SearchConfig::default()).unwrap();
//! assert!(url.as_str().contains("tanggal=20-September-2022"));
//! ```

use url::Url;

use crate::date::MonthTable;
use crate::fetch::{DEFAULT_BASE_URL, FetchConfig};
use crate::parse::Document;
use crate::query::{SearchQuery, build_query};
use crate::record::ResultSet;
use crate::schema::CompiledSchema;
use crate::validate::{IsoDate, StationCode};
use crate::{KeretaError, Result};

/// Validated input for one outbound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub from: StationCode,
    pub to: StationCode,
    pub date: IsoDate,
}

impl SearchRequest {
    /// Validates raw caller input.
    ///
    /// # Errors
    ///
    /// Returns [`KeretaError::InvalidInput`] naming the first rejected value
    /// (`origin`, `destination`, or `date`).
    pub fn validate(from: &str, to: &str, date: &str) -> Result<Self> {
        let reject = |field: &'static str, value: &str| KeretaError::InvalidInput { field, value: value.to_string() };

        Ok(Self {
            from: StationCode::parse(from).map_err(|_| reject("origin", from))?,
            to: StationCode::parse(to).map_err(|_| reject("destination", to))?,
            date: IsoDate::parse(date).map_err(|_| reject("date", date))?,
        })
    }
}

/// Where and how to run a search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Page the query string is appended to.
    pub base_url: String,
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Month names used for the `tanggal` field.
    pub months: &'static MonthTable,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), fetch: FetchConfig::default(), months: MonthTable::indonesian() }
    }
}

/// Everything one search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub url: Url,
    pub trains: ResultSet,
}

/// Builds the query for `request` and the full URL it will be sent to.
pub fn search_url(request: &SearchRequest, config: &SearchConfig) -> Result<(SearchQuery, Url)> {
    let base = Url::parse(&config.base_url).map_err(|e| KeretaError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
    let query = build_query(&request.from, &request.to, &request.date, config.months)?;
    let url = query.to_url(&base);
    Ok((query, url))
}

/// Parses a results page and extracts its trains.
pub fn extract_html(html: &str, schema: &CompiledSchema) -> Result<ResultSet> {
    let document = Document::parse(html)?;
    Ok(crate::extract::extract_with_schema(&document, schema))
}

/// Runs the full search against the booking site.
///
/// An empty result is returned as an empty [`ResultSet`]; callers that want a
/// distinct signal use [`ResultSet::non_empty`].
#[cfg(feature = "fetch")]
pub async fn search(request: &SearchRequest, schema: &CompiledSchema, config: &SearchConfig) -> Result<SearchOutcome> {
    let (query, url) = search_url(request, config)?;
    let html = crate::fetch::fetch_url(&url, &config.fetch).await?;
    let trains = extract_html(&html, schema)?;

    tracing::info!(trains = trains.len(), "search finished");

    Ok(SearchOutcome { query, url, trains })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtractionSchema;

    #[test]
    fn test_validate_ok() {
        let request = SearchRequest::validate("PSE", "YK", "2022-09-20").unwrap();
        assert_eq!(request.from.as_str(), "PSE");
        assert_eq!(request.to.as_str(), "YK");
        assert_eq!(request.date.as_str(), "2022-09-20");
    }

    #[test]
    fn test_validate_names_rejected_field() {
        let field = |from, to, date| match SearchRequest::validate(from, to, date) {
            Err(KeretaError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        };

        assert_eq!(field("pse", "YK", "2022-09-20"), "origin");
        assert_eq!(field("PSE", "y", "2022-09-20"), "destination");
        assert_eq!(field("PSE", "YK", "20-09-2022"), "date");
    }

    #[test]
    fn test_search_url() {
        let request = SearchRequest::validate("PSE", "YK", "2022-09-20").unwrap();
        let (query, url) = search_url(&request, &SearchConfig::default()).unwrap();

        assert_eq!(query.get("tanggal"), Some("20-September-2022"));
        assert_eq!(url.host_str(), Some("booking.kai.id"));
        assert_eq!(url.query(), Some(query.encode().as_str()));
    }

    #[test]
    fn test_search_url_bad_base() {
        let request = SearchRequest::validate("PSE", "YK", "2022-09-20").unwrap();
        let config = SearchConfig { base_url: "not a url".to_string(), ..Default::default() };
        assert!(matches!(search_url(&request, &config), Err(KeretaError::InvalidUrl(_))));
    }

    #[test]
    fn test_search_url_invalid_month() {
        let request = SearchRequest::validate("PSE", "YK", "2022-13-20").unwrap();
        let result = search_url(&request, &SearchConfig::default());
        assert!(matches!(result, Err(KeretaError::InvalidMonth(_))));
    }

    #[test]
    fn test_extract_html() {
        let schema = ExtractionSchema::default().compile().unwrap();
        let html = r#"<div class="data-wrapper"><div class="name">SANCAKA</div></div>"#;

        let trains = extract_html(html, &schema).unwrap();
        assert_eq!(trains.len(), 1);
        assert!(extract_html("<p></p>", &schema).unwrap().is_empty());
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_search_rejects_foreign_base_url() {
        let request = SearchRequest::validate("PSE", "YK", "2022-09-20").unwrap();
        let schema = ExtractionSchema::default().compile().unwrap();
        let config = SearchConfig { base_url: "https://example.com/".to_string(), ..Default::default() };

        let result = search(&request, &schema, &config).await;
        assert!(matches!(result, Err(KeretaError::InvalidUrl(_))));
    }
}
