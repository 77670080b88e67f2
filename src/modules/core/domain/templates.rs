//! SQL template dictionaries

use crate::error::{OrmError, Result};
use ormlet_types::SqlOperation;
use std::collections::HashMap;

/// The four template dictionaries, one per operation category
///
/// Each dictionary maps an operation name to raw templated SQL text carrying
/// positional `{N}` placeholders. Names are unique within their category;
/// a violated uniqueness is a fatal configuration error at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlTemplateSet {
    inserts: HashMap<String, String>,
    selects: HashMap<String, String>,
    updates: HashMap<String, String>,
    deletes: HashMap<String, String>,
}

impl SqlTemplateSet {
    /// Create an empty template set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, rejecting duplicate names within the category
    pub fn insert(
        &mut self,
        category: SqlOperation,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        let map = self.category_mut(category);
        if map.contains_key(&name) {
            return Err(OrmError::DuplicateTemplateName { category, name });
        }
        map.insert(name, template.into());
        Ok(())
    }

    /// Look up a template by category and name
    pub fn get(&self, category: SqlOperation, name: &str) -> Option<&str> {
        self.category(category).get(name).map(String::as_str)
    }

    /// The dictionary for one category
    pub fn category(&self, category: SqlOperation) -> &HashMap<String, String> {
        match category {
            SqlOperation::Insert => &self.inserts,
            SqlOperation::Select => &self.selects,
            SqlOperation::Update => &self.updates,
            SqlOperation::Delete => &self.deletes,
        }
    }

    fn category_mut(&mut self, category: SqlOperation) -> &mut HashMap<String, String> {
        match category {
            SqlOperation::Insert => &mut self.inserts,
            SqlOperation::Select => &mut self.selects,
            SqlOperation::Update => &mut self.updates,
            SqlOperation::Delete => &mut self.deletes,
        }
    }

    /// Template names in one category, sorted
    pub fn names(&self, category: SqlOperation) -> Vec<&str> {
        let mut names: Vec<&str> = self.category(category).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of templates across all categories
    pub fn len(&self) -> usize {
        SqlOperation::all()
            .iter()
            .map(|op| self.category(*op).len())
            .sum()
    }

    /// True when no category holds any template
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut set = SqlTemplateSet::new();
        set.insert(
            SqlOperation::Insert,
            "addUser",
            "INSERT INTO users (name) VALUES ({0})",
        )
        .unwrap();

        assert_eq!(
            set.get(SqlOperation::Insert, "addUser"),
            Some("INSERT INTO users (name) VALUES ({0})")
        );
        assert_eq!(set.get(SqlOperation::Select, "addUser"), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut set = SqlTemplateSet::new();
        set.insert(SqlOperation::Select, "byId", "SELECT 1").unwrap();
        let err = set
            .insert(SqlOperation::Select, "byId", "SELECT 2")
            .unwrap_err();
        assert!(matches!(
            err,
            OrmError::DuplicateTemplateName {
                category: SqlOperation::Select,
                ..
            }
        ));
    }

    #[test]
    fn test_same_name_across_categories_allowed() {
        let mut set = SqlTemplateSet::new();
        set.insert(SqlOperation::Insert, "user", "INSERT ...").unwrap();
        set.insert(SqlOperation::Delete, "user", "DELETE ...").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_names_sorted() {
        let mut set = SqlTemplateSet::new();
        set.insert(SqlOperation::Update, "b", "U b").unwrap();
        set.insert(SqlOperation::Update, "a", "U a").unwrap();
        assert_eq!(set.names(SqlOperation::Update), vec!["a", "b"]);
    }
}
