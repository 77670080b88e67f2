//! Property-to-column mapping dictionaries

use crate::error::{OrmError, Result};
use std::collections::{btree_map, BTreeMap, HashMap};

/// Implemented by mapped types to name the table their columns live in
///
/// Resolved at compile time; replaces runtime discovery of a mapping
/// annotation on the type.
pub trait TableKeyed {
    /// Table identifier, matched case-insensitively against the mapping
    /// document's `Table` names
    fn table_key() -> &'static str;
}

/// Property-name to column-name dictionary for one database table
///
/// Entries are held in a `BTreeMap` so iteration, and therefore the reverse
/// lookup's first-match rule, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyColumnMap {
    entries: BTreeMap<String, String>,
}

impl PropertyColumnMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Column mapped to a property, if any
    pub fn column_for(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    /// Property mapped to a column, if any
    ///
    /// When two properties share one column the first match in ascending
    /// property-name order wins; keep column names unique per table to make
    /// reverse lookups unambiguous.
    pub fn property_for(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| c.as_str() == column)
            .map(|(p, _)| p.as_str())
    }

    /// Iterate property/column pairs in property-name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Number of mapped properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no property is mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, property: String, column: String) -> bool {
        if self.entries.contains_key(&property) {
            return false;
        }
        self.entries.insert(property, column);
        true
    }
}

/// All table mappings, keyed by normalized table name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    tables: HashMap<String, PropertyColumnMap>,
}

impl MappingTable {
    /// Create an empty mapping table
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a table identifier: trimmed, lowercased
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Register a table, rejecting duplicates
    ///
    /// Returns the normalized key the table was registered under.
    pub fn add_table(&mut self, name: &str) -> Result<String> {
        let key = Self::normalize(name);
        if self.tables.contains_key(&key) {
            return Err(OrmError::Configuration(format!(
                "Table '{}' is mapped more than once",
                name
            )));
        }
        self.tables.insert(key.clone(), PropertyColumnMap::new());
        Ok(key)
    }

    /// Add one property/column pair to a registered table
    pub fn insert_pair(
        &mut self,
        table: &str,
        property: impl Into<String>,
        column: impl Into<String>,
    ) -> Result<()> {
        let key = Self::normalize(table);
        let property = property.into();
        let map = self
            .tables
            .get_mut(&key)
            .ok_or_else(|| OrmError::NoMappingForTable(key.clone()))?;
        if !map.insert(property.clone(), column.into()) {
            return Err(OrmError::DuplicateMappingProperty {
                table: key,
                property,
            });
        }
        Ok(())
    }

    /// The whole mapping for one table; fails if the table is unknown
    ///
    /// Returns a borrowed read-only view, never a copy.
    pub fn mapping_for(&self, table: &str) -> Result<&PropertyColumnMap> {
        let key = Self::normalize(table);
        self.tables
            .get(&key)
            .ok_or(OrmError::NoMappingForTable(key))
    }

    /// Column mapped to a property of a table
    pub fn column_for(&self, table: &str, property: &str) -> Result<&str> {
        let map = self.mapping_for(table)?;
        map.column_for(property)
            .ok_or_else(|| OrmError::NoMappingForProperty {
                table: Self::normalize(table),
                property: property.to_string(),
            })
    }

    /// Property mapped to a column of a table (reverse lookup)
    pub fn property_for(&self, table: &str, column: &str) -> Result<&str> {
        let map = self.mapping_for(table)?;
        map.property_for(column)
            .ok_or_else(|| OrmError::NoMappingForColumn {
                table: Self::normalize(table),
                column: column.to_string(),
            })
    }

    /// Normalized table keys, sorted
    pub fn table_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of mapped tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no table is mapped
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MappingTable {
        let mut table = MappingTable::new();
        table.add_table("Users").unwrap();
        table.insert_pair("Users", "Id", "user_id").unwrap();
        table.insert_pair("Users", "Name", "user_name").unwrap();
        table
    }

    #[test]
    fn test_lookup_is_case_normalized() {
        let table = sample();
        assert_eq!(table.column_for("users", "Id").unwrap(), "user_id");
        assert_eq!(table.column_for("USERS", "Name").unwrap(), "user_name");
    }

    #[test]
    fn test_missing_table() {
        let table = sample();
        let err = table.column_for("orders", "Id").unwrap_err();
        assert!(matches!(err, OrmError::NoMappingForTable(ref t) if t == "orders"));
        assert!(table.mapping_for("orders").is_err());
    }

    #[test]
    fn test_missing_property_and_column() {
        let table = sample();
        assert!(matches!(
            table.column_for("users", "Email").unwrap_err(),
            OrmError::NoMappingForProperty { .. }
        ));
        assert!(matches!(
            table.property_for("users", "email").unwrap_err(),
            OrmError::NoMappingForColumn { .. }
        ));
    }

    #[test]
    fn test_round_trip() {
        let table = sample();
        let column = table.column_for("users", "Id").unwrap();
        assert_eq!(table.property_for("users", column).unwrap(), "Id");
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let mut table = sample();
        let err = table.insert_pair("Users", "Id", "other_col").unwrap_err();
        assert!(matches!(err, OrmError::DuplicateMappingProperty { .. }));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut table = sample();
        assert!(table.add_table("users").is_err());
    }

    #[test]
    fn test_reverse_lookup_first_match_is_deterministic() {
        let mut table = MappingTable::new();
        table.add_table("t").unwrap();
        table.insert_pair("t", "Zeta", "shared").unwrap();
        table.insert_pair("t", "Alpha", "shared").unwrap();
        // Ascending property-name order wins.
        assert_eq!(table.property_for("t", "shared").unwrap(), "Alpha");
    }
}
