//! Validation report aggregation

use crate::error::{OrmError, Result};
use std::fmt;

/// Errors and warnings collected across one validation run
///
/// Validation never aborts on the first violation; every problem found in
/// every file lands here, and a non-empty report fails the whole operation
/// with a single aggregated message so operators can fix the configuration
/// in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error line
    pub fn push_error(&mut self, line: impl Into<String>) {
        self.errors.push(line.into());
    }

    /// Record a warning line
    pub fn push_warning(&mut self, line: impl Into<String>) {
        self.warnings.push(line.into());
    }

    /// Collected errors, in discovery order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Collected warnings, in discovery order
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True when neither errors nor warnings were collected
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Fold another report into this one, preserving order
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Fail with an aggregated `ValidationFailed` unless the report is clean
    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            return Ok(());
        }
        Err(OrmError::ValidationFailed(self.to_string()))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::with_capacity(self.errors.len() + self.warnings.len());
        for error in &self.errors {
            lines.push(format!("error: {}", error));
        }
        for warning in &self.warnings {
            lines.push(format!("warning: {}", warning));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
