//! The loaded configuration state and its load sequencing

use crate::substitutor::build_connection_string;
use ormlet_core::{
    ActiveConnectionInfo, MappingTable, PropertyColumnMap, Result, SqlTemplateSet, TableKeyed,
};
use ormlet_parser::{
    build_mapping_table, build_template_set, resolve_last_insert_id, SchemaValidator, Settings,
    XmlSource,
};
use ormlet_types::SqlOperation;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Everything the execution layer reads: the four template dictionaries, the
/// mapping table, the resolved connection, and the provider-specific
/// last-inserted-id statement
///
/// A state is built by one complete load cycle and is immutable afterwards;
/// concurrent unsynchronized reads are safe. Reloading means building a
/// fresh state, never mutating this one.
#[derive(Debug)]
pub struct ConfigState {
    base_dir: PathBuf,
    settings: Settings,
    templates: SqlTemplateSet,
    mappings: MappingTable,
    connection: Option<ActiveConnectionInfo>,
    last_insert_id: Option<String>,
}

impl ConfigState {
    /// Run one complete load cycle
    ///
    /// Sequencing: resolve file paths, inspect both document roots, validate
    /// both documents against their schemas in one combined pass, assemble
    /// the connection (non-fatal), resolve the provider-specific statement
    /// (non-fatal), build the template set, build the mapping table. Any
    /// structural failure is logged and returned; no partial state escapes.
    pub fn load(base_dir: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        let base_dir = base_dir.into();
        match Self::load_inner(&base_dir, &settings) {
            Ok(loaded) => {
                info!(
                    templates = loaded.0.len(),
                    tables = loaded.1.len(),
                    "configuration loaded"
                );
                let (templates, mappings, connection, last_insert_id) = loaded;
                Ok(Self {
                    base_dir,
                    settings,
                    templates,
                    mappings,
                    connection,
                    last_insert_id,
                })
            }
            Err(e) => {
                error!("configuration load failed: {}", e);
                debug!(error = ?e, "configuration load failure detail");
                Err(e)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn load_inner(
        base_dir: &Path,
        settings: &Settings,
    ) -> Result<(
        SqlTemplateSet,
        MappingTable,
        Option<ActiveConnectionInfo>,
        Option<String>,
    )> {
        let templates_path = settings.templates_path(base_dir);
        let mapping_path = settings.mapping_path(base_dir);

        let templates_src = XmlSource::open(&templates_path)?;
        let mapping_src = XmlSource::open(&mapping_path)?;

        let mut namespaces = Vec::new();
        let mut schema_paths = Vec::new();
        if let Some(ns) = templates_src.namespace() {
            namespaces.push(ns.to_string());
            schema_paths.push(settings.templates_schema_path(base_dir));
        }
        if let Some(ns) = mapping_src.namespace() {
            namespaces.push(ns.to_string());
            schema_paths.push(settings.mapping_schema_path(base_dir));
        }

        let validator = SchemaValidator::new(&namespaces, &schema_paths)?;
        // One combined pass over both documents: a single error set.
        validator.validate(&[templates_path.as_path(), mapping_path.as_path()])?;

        let connection = Self::assemble_connection(settings);
        let last_insert_id = match &connection {
            Some(info) => resolve_last_insert_id(&templates_src, info.provider)?,
            None => None,
        };

        let templates = build_template_set(&templates_src)?;
        let mappings = build_mapping_table(&mapping_src)?;

        Ok((templates, mappings, connection, last_insert_id))
    }

    /// Assemble the active connection from the settings
    ///
    /// Every failure condition is logged and yields `None` instead of
    /// failing the load; callers treat an unset connection as "execution
    /// unavailable" while the dictionaries remain usable.
    pub fn assemble_connection(settings: &Settings) -> Option<ActiveConnectionInfo> {
        if settings.db_name.trim().is_empty() {
            error!("connection assembly failed: 'dbName' is not set");
            debug!("'dbName' supplies the $dbName token of the connection template");
            return None;
        }

        let name = settings.active_db_connection.trim();
        if name.is_empty() {
            error!("connection assembly failed: 'activeDbConnection' is not set");
            debug!("'activeDbConnection' selects an entry of the connection store");
            return None;
        }

        let Some(entry) = settings.connection(name) else {
            error!(
                "connection assembly failed: no connection named '{}' in the store",
                name
            );
            debug!(
                "store holds {} connection(s); check the 'connections' section of the settings",
                settings.connections.len()
            );
            return None;
        };

        if entry.template.trim().is_empty() {
            error!(
                "connection assembly failed: connection '{}' has an empty template",
                name
            );
            return None;
        }

        let connection_string = build_connection_string(&entry.template, settings);
        Some(ActiveConnectionInfo {
            name: name.to_string(),
            connection_string,
            provider: entry.provider,
        })
    }

    /// Column mapped to a property of a table
    pub fn column_for(&self, table: &str, property: &str) -> Result<&str> {
        self.mappings.column_for(table, property)
    }

    /// Property mapped to a column of a table (reverse lookup)
    ///
    /// When a table maps two properties to one column, the first match in
    /// ascending property-name order is returned.
    pub fn property_for(&self, table: &str, column: &str) -> Result<&str> {
        self.mappings.property_for(table, column)
    }

    /// The whole mapping for one table, as a borrowed read-only view
    pub fn mapping_for(&self, table: &str) -> Result<&PropertyColumnMap> {
        self.mappings.mapping_for(table)
    }

    /// Column mapped to a property of a statically keyed type's table
    pub fn column_for_type<T: TableKeyed>(&self, property: &str) -> Result<&str> {
        self.column_for(T::table_key(), property)
    }

    /// The whole mapping for a statically keyed type's table
    pub fn mapping_for_type<T: TableKeyed>(&self) -> Result<&PropertyColumnMap> {
        self.mapping_for(T::table_key())
    }

    /// Look up one template by category and name
    pub fn template(&self, category: SqlOperation, name: &str) -> Option<&str> {
        self.templates.get(category, name)
    }

    /// The loaded template dictionaries
    pub fn templates(&self) -> &SqlTemplateSet {
        &self.templates
    }

    /// The loaded mapping table
    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// The resolved connection, if assembly succeeded
    pub fn connection(&self) -> Option<&ActiveConnectionInfo> {
        self.connection.as_ref()
    }

    /// Provider-specific last-inserted-id statement, if one matched
    pub fn last_insert_id_command(&self) -> Option<&str> {
        self.last_insert_id.as_deref()
    }

    /// The settings this state was loaded from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Base directory the file paths were resolved against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormlet_core::ConnectionEntry;
    use ormlet_types::Provider;

    fn settings_with_connection() -> Settings {
        let mut settings = Settings::default();
        settings.db_path = "/data".to_string();
        settings.db_name = "app.db".to_string();
        settings.active_db_connection = "embedded".to_string();
        settings.connections.insert(
            "embedded".to_string(),
            ConnectionEntry::new("Data Source=$dbPath/$dbName", Provider::Sqlite),
        );
        settings
    }

    #[test]
    fn test_assemble_connection() {
        let info = ConfigState::assemble_connection(&settings_with_connection()).unwrap();
        assert_eq!(info.name, "embedded");
        assert_eq!(info.connection_string, "Data Source=/data/app.db");
        assert_eq!(info.provider, Provider::Sqlite);
    }

    #[test]
    fn test_blank_db_name_leaves_connection_unset() {
        let mut settings = settings_with_connection();
        settings.db_name = "  ".to_string();
        assert!(ConfigState::assemble_connection(&settings).is_none());
    }

    #[test]
    fn test_blank_active_connection_leaves_connection_unset() {
        let mut settings = settings_with_connection();
        settings.active_db_connection = String::new();
        assert!(ConfigState::assemble_connection(&settings).is_none());
    }

    #[test]
    fn test_unknown_connection_name_leaves_connection_unset() {
        let mut settings = settings_with_connection();
        settings.active_db_connection = "primary".to_string();
        assert!(ConfigState::assemble_connection(&settings).is_none());
    }

    #[test]
    fn test_empty_template_leaves_connection_unset() {
        let mut settings = settings_with_connection();
        settings.connections.insert(
            "embedded".to_string(),
            ConnectionEntry::new("", Provider::Sqlite),
        );
        assert!(ConfigState::assemble_connection(&settings).is_none());
    }
}
