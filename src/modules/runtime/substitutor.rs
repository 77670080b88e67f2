//! Connection-string token substitution

use ormlet_parser::Settings;

/// Token replaced by the configured database path
pub const DB_PATH_TOKEN: &str = "$dbPath";

/// Token replaced by the configured database name
pub const DB_NAME_TOKEN: &str = "$dbName";

/// Token replaced by the configured database password
pub const DB_PASSWORD_TOKEN: &str = "$dbPassword";

/// Substitute the settings values into a raw connection template
///
/// Connection templates are not SQL, so no escaping applies; values are
/// inserted verbatim.
pub fn build_connection_string(template: &str, settings: &Settings) -> String {
    template
        .replace(DB_PATH_TOKEN, &settings.db_path)
        .replace(DB_NAME_TOKEN, &settings.db_name)
        .replace(DB_PASSWORD_TOKEN, &settings.db_password)
}
