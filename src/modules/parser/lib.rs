//! XML configuration parsing for Ormlet
//!
//! This crate opens the externally authored templates and mapping documents,
//! validates them against their XSD schemas, and builds the in-memory
//! dictionaries the runtime exposes. It also loads the key/value settings
//! file (YAML, with environment substitution) that names the documents and
//! the connection store.

pub mod mapping;
pub mod provider;
pub mod schema;
pub mod settings;
pub mod templates;
pub mod xml;

pub use mapping::build_mapping_table;
pub use provider::resolve_last_insert_id;
pub use schema::SchemaValidator;
pub use settings::Settings;
pub use templates::{build_template_set, lint_placeholders};
pub use xml::XmlSource;
