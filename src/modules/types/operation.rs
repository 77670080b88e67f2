//! SQL operation category definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four SQL template categories
///
/// Each category corresponds to one section element of the templates
/// document and to one dictionary in the loaded template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlOperation {
    /// INSERT statements
    Insert,
    /// SELECT statements
    Select,
    /// UPDATE statements
    Update,
    /// DELETE statements
    Delete,
}

impl fmt::Display for SqlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlOperation::Insert => write!(f, "insert"),
            SqlOperation::Select => write!(f, "select"),
            SqlOperation::Update => write!(f, "update"),
            SqlOperation::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for SqlOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insert" | "inserts" => Ok(SqlOperation::Insert),
            "select" | "selects" => Ok(SqlOperation::Select),
            "update" | "updates" => Ok(SqlOperation::Update),
            "delete" | "deletes" => Ok(SqlOperation::Delete),
            _ => Err(format!("Unknown SQL operation: {}", s)),
        }
    }
}

impl SqlOperation {
    /// Returns all categories, in document order
    pub fn all() -> &'static [SqlOperation] {
        &[
            SqlOperation::Insert,
            SqlOperation::Select,
            SqlOperation::Update,
            SqlOperation::Delete,
        ]
    }

    /// Name of the section element holding this category in the templates
    /// document
    pub fn section_name(&self) -> &'static str {
        match self {
            SqlOperation::Insert => "Inserts",
            SqlOperation::Select => "Selects",
            SqlOperation::Update => "Updates",
            SqlOperation::Delete => "Deletes",
        }
    }
}
