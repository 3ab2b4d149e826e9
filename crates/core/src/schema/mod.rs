//! Declarative extraction schema.
//!
//! Each [`TrainRecord`](crate::TrainRecord) field is read by one [`Rule`], kept
//! in an [`ExtractionSchema`] table so the positional coupling to the page
//! layout lives in one auditable place. Schemas can be overridden from a
//! `key: value` text file.

pub mod loader;
pub mod parser;
pub mod rules;

pub use loader::{SCHEMA_FILE_NAME, SchemaLoader};
pub use parser::{SchemaEntry, SchemaParser, parse_entry};
pub use rules::{CompiledRule, CompiledSchema, DEFAULT_CONTAINER, ExtractionSchema, Field, Rule};
