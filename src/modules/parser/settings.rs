//! Key/value settings for the metadata core
//!
//! Settings name the configuration documents, their schemas, the database
//! file/path values substituted into connection templates, and the named
//! connection-string store. They are authored in YAML with the camelCase
//! keys the rest of the ORM uses, and may reference `{{ env.VAR }}`
//! placeholders resolved from the process environment (a `.env` file is
//! honored when present).

use once_cell::sync::Lazy;
use ormlet_core::{ConnectionEntry, OrmError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Regex pattern for environment variable placeholders: {{ env.VAR_NAME }}
static ENV_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// External configuration consumed by the load cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Directory holding the database file, substituted for `$dbPath`
    pub db_path: String,

    /// Database name, substituted for `$dbName`
    pub db_name: String,

    /// Database password, substituted for `$dbPassword`
    pub db_password: String,

    /// Name of the connection-store entry to activate
    pub active_db_connection: String,

    /// Subfolder holding the XSD schema files
    pub xml_schemas_folder: String,

    /// Subfolder holding the XML configuration documents
    pub configuration_folder: String,

    /// File name of the SQL templates document
    pub sql_templates_file_name: String,

    /// File name of the table mapping document
    pub mapping_file_name: String,

    /// File name of the templates document's schema
    pub sql_templates_schema_file_name: String,

    /// File name of the mapping document's schema
    pub mapping_schema_file_name: String,

    /// Named connection-string store
    pub connections: HashMap<String, ConnectionEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            db_name: String::new(),
            db_password: String::new(),
            active_db_connection: String::new(),
            xml_schemas_folder: "schemas".to_string(),
            configuration_folder: "config".to_string(),
            sql_templates_file_name: "sql-templates.xml".to_string(),
            mapping_file_name: "table-mappings.xml".to_string(),
            sql_templates_schema_file_name: "sql-templates.xsd".to_string(),
            mapping_schema_file_name: "table-mappings.xsd".to_string(),
            connections: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, substituting environment placeholders
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OrmError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from a YAML string, substituting environment
    /// placeholders
    pub fn parse(content: &str) -> Result<Self> {
        let substituted = substitute_env(content)?;
        serde_yaml::from_str(&substituted)
            .map_err(|e| OrmError::Configuration(format!("Settings parse error: {}", e)))
    }

    /// Look up a connection-store entry by name
    pub fn connection(&self, name: &str) -> Option<&ConnectionEntry> {
        self.connections.get(name)
    }

    /// Path of the SQL templates document under a base directory
    pub fn templates_path(&self, base: &Path) -> PathBuf {
        join(base, &self.configuration_folder, &self.sql_templates_file_name)
    }

    /// Path of the table mapping document under a base directory
    pub fn mapping_path(&self, base: &Path) -> PathBuf {
        join(base, &self.configuration_folder, &self.mapping_file_name)
    }

    /// Path of the templates schema under a base directory
    pub fn templates_schema_path(&self, base: &Path) -> PathBuf {
        join(
            base,
            &self.xml_schemas_folder,
            &self.sql_templates_schema_file_name,
        )
    }

    /// Path of the mapping schema under a base directory
    pub fn mapping_schema_path(&self, base: &Path) -> PathBuf {
        join(base, &self.xml_schemas_folder, &self.mapping_schema_file_name)
    }
}

// Configured fragments sometimes arrive with a leading separator; joining
// those verbatim would discard the base directory.
fn join(base: &Path, folder: &str, file: &str) -> PathBuf {
    base.join(trim_separators(folder)).join(trim_separators(file))
}

fn trim_separators(fragment: &str) -> &str {
    fragment.trim_start_matches(['/', '\\'])
}

fn substitute_env(content: &str) -> Result<String> {
    // Load .env if present; ignore when absent.
    let _ = dotenvy::dotenv();

    let mut result = content.to_string();
    let mut missing: Vec<String> = Vec::new();

    for cap in ENV_PATTERN.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(value) => result = result.replace(full_match, &value),
            Err(_) => missing.push(var_name.to_string()),
        }
    }

    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(OrmError::EnvVarNotFound(missing.join(", ")));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormlet_types::Provider;

    const YAML: &str = r#"
dbPath: /var/lib/app
dbName: app.db
activeDbConnection: embedded
connections:
  embedded:
    template: "Data Source=$dbPath/$dbName"
    provider: sqlite
"#;

    #[test]
    fn test_parse_with_defaults() {
        let settings = Settings::parse(YAML).unwrap();
        assert_eq!(settings.db_path, "/var/lib/app");
        assert_eq!(settings.db_name, "app.db");
        assert_eq!(settings.db_password, "");
        assert_eq!(settings.active_db_connection, "embedded");
        // Unspecified keys fall back to defaults.
        assert_eq!(settings.configuration_folder, "config");
        assert_eq!(settings.sql_templates_file_name, "sql-templates.xml");

        let entry = settings.connection("embedded").unwrap();
        assert_eq!(entry.provider, Provider::Sqlite);
    }

    #[test]
    fn test_unknown_connection_is_none() {
        let settings = Settings::parse(YAML).unwrap();
        assert!(settings.connection("primary").is_none());
    }

    #[test]
    fn test_paths_trim_leading_separators() {
        let mut settings = Settings::default();
        settings.configuration_folder = "/config".to_string();
        settings.sql_templates_file_name = "\\sql-templates.xml".to_string();

        let path = settings.templates_path(Path::new("/opt/app"));
        assert_eq!(path, PathBuf::from("/opt/app/config/sql-templates.xml"));
    }

    #[test]
    fn test_schema_paths_use_schema_folder() {
        let settings = Settings::default();
        let path = settings.mapping_schema_path(Path::new("base"));
        assert_eq!(path, PathBuf::from("base/schemas/table-mappings.xsd"));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("ORMLET_TEST_PW", "s3cret");
        let settings =
            Settings::parse("dbName: app.db\ndbPassword: \"{{ env.ORMLET_TEST_PW }}\"\n").unwrap();
        assert_eq!(settings.db_password, "s3cret");
        std::env::remove_var("ORMLET_TEST_PW");
    }

    #[test]
    fn test_missing_env_var_fails() {
        let result = Settings::parse("dbPassword: \"{{ env.ORMLET_NO_SUCH_VAR_9 }}\"\n");
        assert!(matches!(result, Err(OrmError::EnvVarNotFound(_))));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let yaml = r#"
connections:
  bad:
    template: "x"
    provider: oracle
"#;
        assert!(matches!(
            Settings::parse(yaml),
            Err(OrmError::Configuration(_))
        ));
    }
}
