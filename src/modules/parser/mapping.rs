//! Mapping dictionary construction

use crate::xml::{is_named, XmlSource};
use ormlet_core::{MappingTable, OrmError, Result};
use roxmltree::Node;

/// Build the table mapping dictionary from a validated mapping document
///
/// Every namespace-qualified `Table` element contributes one table keyed by
/// its `name` attribute; each child element carries `property` and `column`
/// attributes and inserts one pair. A duplicate property within a table
/// aborts the whole build; tables are otherwise independent.
pub fn build_mapping_table(source: &XmlSource) -> Result<MappingTable> {
    let doc = source.document()?;
    let namespace = source.namespace();

    let mut table = MappingTable::new();
    for node in doc
        .descendants()
        .filter(|n| is_named(*n, namespace, "Table"))
    {
        let name = node.attribute("name").ok_or_else(|| {
            OrmError::Configuration(format!(
                "Table element in '{}' has no 'name' attribute",
                source.path().display()
            ))
        })?;
        let key = table.add_table(name)?;

        for child in node.children().filter(Node::is_element) {
            let property = child.attribute("property").ok_or_else(|| {
                OrmError::Configuration(format!(
                    "mapping entry for table '{}' has no 'property' attribute",
                    name
                ))
            })?;
            let column = child.attribute("column").ok_or_else(|| {
                OrmError::Configuration(format!(
                    "mapping entry '{}' for table '{}' has no 'column' attribute",
                    property, name
                ))
            })?;
            table.insert_pair(&key, property, column)?;
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(xml: &str) -> XmlSource {
        XmlSource::parse_str(xml).unwrap()
    }

    #[test]
    fn test_builds_tables_independently() {
        let table = build_mapping_table(&source(
            r#"<TableMappings xmlns="urn:test:mappings">
  <Table name="Users">
    <Map property="Id" column="user_id"/>
    <Map property="Name" column="user_name"/>
  </Table>
  <Table name="Orders">
    <Map property="Id" column="order_id"/>
  </Table>
</TableMappings>"#,
        ))
        .unwrap();

        assert_eq!(table.len(), 2);
        let users = table.mapping_for("users").unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.column_for("Id"), Some("user_id"));
        // Sibling tables map the same property to different columns.
        assert_eq!(table.column_for("orders", "Id").unwrap(), "order_id");
    }

    #[test]
    fn test_duplicate_property_aborts() {
        let err = build_mapping_table(&source(
            r#"<TableMappings xmlns="urn:test:mappings">
  <Table name="Users">
    <Map property="Id" column="a"/>
    <Map property="Id" column="b"/>
  </Table>
</TableMappings>"#,
        ))
        .unwrap_err();

        assert!(matches!(err, OrmError::DuplicateMappingProperty { .. }));
    }

    #[test]
    fn test_duplicate_table_aborts() {
        let err = build_mapping_table(&source(
            r#"<TableMappings xmlns="urn:test:mappings">
  <Table name="Users"/>
  <Table name="users"/>
</TableMappings>"#,
        ))
        .unwrap_err();

        assert!(matches!(err, OrmError::Configuration(_)));
    }

    #[test]
    fn test_missing_attributes_rejected() {
        let err = build_mapping_table(&source(
            r#"<TableMappings xmlns="urn:test:mappings">
  <Table name="Users">
    <Map property="Id"/>
  </Table>
</TableMappings>"#,
        ))
        .unwrap_err();

        assert!(matches!(err, OrmError::Configuration(_)));
    }

    #[test]
    fn test_empty_document_builds_empty_table() {
        let table =
            build_mapping_table(&source(r#"<TableMappings xmlns="urn:test:mappings"/>"#)).unwrap();
        assert!(table.is_empty());
    }
}
