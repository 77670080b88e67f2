//! Database provider type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported database providers
///
/// The provider identifies the SQL dialect a connection speaks. It selects
/// dialect-specific statements (such as last-inserted-id retrieval) from the
/// templates document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    Mysql,
    /// SQLite
    Sqlite,
    /// Microsoft SQL Server
    Mssql,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Postgres => write!(f, "postgres"),
            Provider::Mysql => write!(f, "mysql"),
            Provider::Sqlite => write!(f, "sqlite"),
            Provider::Mssql => write!(f, "mssql"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Provider::Postgres),
            "mysql" | "mariadb" => Ok(Provider::Mysql),
            "sqlite" | "sqlite3" => Ok(Provider::Sqlite),
            "mssql" | "sqlserver" => Ok(Provider::Mssql),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl Provider {
    /// Returns all supported providers
    pub fn all() -> &'static [Provider] {
        &[
            Provider::Postgres,
            Provider::Mysql,
            Provider::Sqlite,
            Provider::Mssql,
        ]
    }

    /// Canonical lowercase name, as used in `provider` attributes of the
    /// templates document
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Postgres => "postgres",
            Provider::Mysql => "mysql",
            Provider::Sqlite => "sqlite",
            Provider::Mssql => "mssql",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("postgres").unwrap(), Provider::Postgres);
        assert_eq!(
            Provider::from_str("postgresql").unwrap(),
            Provider::Postgres
        );
        assert_eq!(Provider::from_str("mysql").unwrap(), Provider::Mysql);
        assert_eq!(Provider::from_str("sqlite3").unwrap(), Provider::Sqlite);
        assert_eq!(Provider::from_str("sqlserver").unwrap(), Provider::Mssql);
        assert_eq!(Provider::from_str(" MSSQL ").unwrap(), Provider::Mssql);
        assert!(Provider::from_str("oracle").is_err());
    }

    #[test]
    fn test_provider_display_matches_as_str() {
        for provider in Provider::all() {
            assert_eq!(provider.to_string(), provider.as_str());
        }
    }

    #[test]
    fn test_provider_serde() {
        let json = serde_json::to_string(&Provider::Sqlite).unwrap();
        assert_eq!(json, "\"sqlite\"");

        let provider: Provider = serde_json::from_str("\"mssql\"").unwrap();
        assert_eq!(provider, Provider::Mssql);
    }
}
