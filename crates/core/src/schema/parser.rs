use crate::error::{KeretaError, Result};
use crate::schema::rules::{ExtractionSchema, Field, Rule};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single line of a schema file.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntry {
    Container(String),
    Field(Field, Rule),
}

/// Parses one `key: value` line.
///
/// Values are `text <selector>`, `first-child <selector>`,
/// `last-child <selector>`, or a bare selector read as `text`.
pub fn parse_entry(line: &str) -> Result<SchemaEntry> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| KeretaError::ConfigError(format!("Expected `key: value`, got {:?}", line)))?;
    let key = key.trim();
    let value = value.trim();

    if value.is_empty() {
        return Err(KeretaError::ConfigError(format!("Missing selector for {}", key)));
    }

    if key == "container" {
        return Ok(SchemaEntry::Container(value.to_string()));
    }

    let field = Field::from_name(key).ok_or_else(|| KeretaError::ConfigError(format!("Unknown field: {}", key)))?;

    let rule = if let Some(selector) = value.strip_prefix("first-child ") {
        Rule::FirstChild(selector.trim().to_string())
    } else if let Some(selector) = value.strip_prefix("last-child ") {
        Rule::LastChild(selector.trim().to_string())
    } else if let Some(selector) = value.strip_prefix("text ") {
        Rule::Text(selector.trim().to_string())
    } else {
        Rule::Text(value.to_string())
    };

    Ok(SchemaEntry::Field(field, rule))
}

/// Schema file parser.
///
/// Entries override the default schema; fields a file does not mention keep
/// their default rule.
#[derive(Debug)]
pub struct SchemaParser;

impl SchemaParser {
    /// Parse a schema file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ExtractionSchema> {
        let file = std::fs::File::open(&path).map_err(|e| {
            KeretaError::ConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a schema from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<ExtractionSchema> {
        let mut lines = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| KeretaError::ConfigError(format!("Read error at line {}: {}", index + 1, e)))?;
            lines.push(line);
        }

        Self::parse_lines(lines.iter().map(String::as_str))
    }

    /// Parse a schema from a string
    pub fn parse_string(content: &str) -> Result<ExtractionSchema> {
        Self::parse_lines(content.lines())
    }

    fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<ExtractionSchema> {
        let mut schema = ExtractionSchema::default();

        for (index, line) in lines.enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_entry(line) {
                Ok(SchemaEntry::Container(selector)) => schema.set_container(selector),
                Ok(SchemaEntry::Field(field, rule)) => schema.set(field, rule),
                Err(e) => {
                    return Err(KeretaError::ConfigError(format!("Parse error at line {}: {}", index + 1, e)));
                }
            }
        }

        Ok(schema)
    }
}
