//! Error types for Ormlet

use ormlet_types::SqlOperation;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Ormlet operations
#[derive(Error, Debug)]
pub enum OrmError {
    /// A required file does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// A document could not be parsed as XML
    #[error("Malformed XML in '{path}': {detail}")]
    MalformedXml { path: String, detail: String },

    /// Missing or inconsistent configuration value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Schema validation failed; the message aggregates every error and
    /// warning collected across all validated files
    #[error("Schema validation failed:\n{0}")]
    ValidationFailed(String),

    /// Two templates share a name within one category
    #[error("Duplicate template name '{name}' in {category} templates")]
    DuplicateTemplateName {
        category: SqlOperation,
        name: String,
    },

    /// Two mapping entries share a property name within one table
    #[error("Duplicate property '{property}' in mapping for table '{table}'")]
    DuplicateMappingProperty { table: String, property: String },

    /// Lookup against a table that has no mapping
    #[error("No mapping registered for table '{0}'")]
    NoMappingForTable(String),

    /// Lookup of a property absent from a table's mapping
    #[error("No mapping for property '{property}' in table '{table}'")]
    NoMappingForProperty { table: String, property: String },

    /// Reverse lookup of a column absent from a table's mapping
    #[error("No mapping for column '{column}' in table '{table}'")]
    NoMappingForColumn { table: String, column: String },

    /// Environment variable referenced by the settings file is not set
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrmError {
    /// Returns true if this error aborts a load cycle
    ///
    /// Lookup failures happen against already-loaded dictionaries and never
    /// occur during a load; everything else is structural.
    pub fn is_load_failure(&self) -> bool {
        !self.is_lookup_failure()
    }

    /// Returns true if this error is a dictionary lookup failure
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            OrmError::NoMappingForTable(_)
                | OrmError::NoMappingForProperty { .. }
                | OrmError::NoMappingForColumn { .. }
        )
    }
}

/// Result type alias using OrmError
pub type Result<T> = std::result::Result<T, OrmError>;
