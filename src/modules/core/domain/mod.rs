//! Domain models produced by the metadata core

mod connection;
mod mapping;
mod report;
mod templates;

pub use connection::{ActiveConnectionInfo, ConnectionEntry};
pub use mapping::{MappingTable, PropertyColumnMap, TableKeyed};
pub use report::ValidationReport;
pub use templates::SqlTemplateSet;
