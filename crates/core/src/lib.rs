pub mod date;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod query;
pub mod record;
pub mod schema;
pub mod search;
pub mod validate;

pub use date::{LocalizedDate, MonthTable, to_localized_date};
pub use error::{KeretaError, Result};
pub use extract::{extract, extract_with_schema};
pub use fetch::{DEFAULT_BASE_URL, FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, convert_to_json, convert_to_text};
pub use parse::Document;
pub use query::{QUERY_KEYS, SearchQuery, build_query};
pub use record::{ResultSet, TrainDestination, TrainOrigin, TrainRecord};
pub use schema::{CompiledSchema, ExtractionSchema, Field, Rule, SchemaLoader};
#[cfg(feature = "fetch")]
pub use search::search;
pub use search::{SearchConfig, SearchOutcome, SearchRequest, extract_html, search_url};
pub use validate::{IsoDate, StationCode, is_valid_date, is_valid_station};
