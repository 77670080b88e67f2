//! Connection store entries and the resolved connection

use ormlet_types::Provider;
use serde::{Deserialize, Serialize};

/// One named entry of the connection-string store
///
/// The template carries `$dbPath`, `$dbName` and `$dbPassword` tokens that
/// are substituted from the settings during connection assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEntry {
    /// Raw connection template
    pub template: String,

    /// SQL dialect this connection speaks
    pub provider: Provider,
}

impl ConnectionEntry {
    /// Create a new entry with the given template and provider
    pub fn new(template: impl Into<String>, provider: Provider) -> Self {
        Self {
            template: template.into(),
            provider,
        }
    }
}

/// Fully resolved connection, published only on successful assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConnectionInfo {
    /// Name the connection was resolved under
    pub name: String,

    /// Connection string with every token substituted
    pub connection_string: String,

    /// SQL dialect of the active connection
    pub provider: Provider,
}
