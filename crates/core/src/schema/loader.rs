use crate::error::{KeretaError, Result};
use crate::schema::parser::SchemaParser;
use crate::schema::rules::ExtractionSchema;
use std::path::{Path, PathBuf};

/// File name looked up inside config directories.
pub const SCHEMA_FILE_NAME: &str = "schema.txt";

/// Locates and loads the extraction schema.
///
/// An explicit file must exist and parse. The per-user file
/// (`~/.config/kereta/schema.txt`) is optional; if it is missing or broken
/// the default schema is used.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    file: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

impl SchemaLoader {
    /// Create a loader that only knows the built-in schema
    pub fn new() -> Self {
        Self { file: None, config_dir: None }
    }

    /// Create a loader that also checks the per-user config directory
    pub fn with_user_config() -> Self {
        Self { file: None, config_dir: Self::default_config_dir() }
    }

    /// Use an explicit schema file
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the directory searched for `schema.txt`
    pub fn config_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the schema
    pub fn load(&self) -> Result<ExtractionSchema> {
        if let Some(file) = &self.file {
            if !file.exists() {
                return Err(KeretaError::FileNotFound(file.clone()));
            }
            tracing::debug!(path = %file.display(), "loading extraction schema");
            return SchemaParser::parse_file(file);
        }

        if let Some(dir) = &self.config_dir {
            let path = dir.join(SCHEMA_FILE_NAME);
            if path.exists() {
                match SchemaParser::parse_file(&path) {
                    Ok(schema) => {
                        tracing::debug!(path = %path.display(), "loaded user extraction schema");
                        return Ok(schema);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable schema file");
                    }
                }
            }
        }

        Ok(ExtractionSchema::default())
    }

    /// Get default config directory (~/.config/kereta)
    fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("kereta"))
    }
}
