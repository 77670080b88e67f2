//! Provider-specific statement resolution

use crate::xml::{find_child, is_named, XmlSource};
use ormlet_core::Result;
use ormlet_types::Provider;
use roxmltree::Node;
use std::str::FromStr;
use tracing::{debug, error, warn};

/// Name of the provider-specific statement that retrieves the last
/// auto-generated id after an insert
pub const LAST_INSERT_ID_NAME: &str = "getlastinsertid";

/// Resolve the last-inserted-id statement for the active provider
///
/// Scans the `ProviderSpecific` section of the templates document for a
/// `Select` whose `name` is `getlastinsertid` and whose `provider` matches.
/// An unmatched provider is a configuration condition that is logged, not
/// raised: `Ok(None)` tells the execution layer that auto-increment
/// retrieval is unsupported for this provider.
pub fn resolve_last_insert_id(source: &XmlSource, provider: Provider) -> Result<Option<String>> {
    let doc = source.document()?;
    let namespace = source.namespace();
    let root = doc.root_element();

    let Some(section) = find_child(root, namespace, "ProviderSpecific") else {
        error!(
            %provider,
            "templates document '{}' has no ProviderSpecific section",
            source.path().display()
        );
        return Ok(None);
    };

    let mut found = None;
    for node in section.children().filter(Node::is_element) {
        if !is_named(node, namespace, "Select") {
            continue;
        }
        let Some(declared) = node.attribute("provider") else {
            continue;
        };
        if Provider::from_str(declared).is_err() {
            warn!(
                "provider-specific statement in '{}' names unknown provider '{}'",
                source.path().display(),
                declared
            );
            continue;
        }
        if node.attribute("name") == Some(LAST_INSERT_ID_NAME)
            && declared.parse() == Ok(provider)
        {
            found = Some(node);
            break;
        }
    }

    match found {
        Some(node) => {
            let text = node.text().map(str::trim).unwrap_or_default();
            if text.is_empty() {
                error!(
                    %provider,
                    "provider-specific '{}' statement is empty", LAST_INSERT_ID_NAME
                );
                return Ok(None);
            }
            Ok(Some(text.to_string()))
        }
        None => {
            error!(
                %provider,
                "no provider-specific '{}' statement matches the active provider",
                LAST_INSERT_ID_NAME
            );
            debug!(
                "looked for <Select name=\"{}\" provider=\"{}\"> in '{}'",
                LAST_INSERT_ID_NAME,
                provider,
                source.path().display()
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<SqlTemplates xmlns="urn:test:templates">
  <Selects>
    <Statement name="one">SELECT 1</Statement>
  </Selects>
  <ProviderSpecific>
    <Select name="getlastinsertid" provider="sqlite">SELECT last_insert_rowid()</Select>
    <Select name="getlastinsertid" provider="mysql">SELECT LAST_INSERT_ID()</Select>
  </ProviderSpecific>
</SqlTemplates>"#;

    fn source(xml: &str) -> XmlSource {
        XmlSource::parse_str(xml).unwrap()
    }

    #[test]
    fn test_resolves_matching_provider() {
        let statement = resolve_last_insert_id(&source(DOC), Provider::Sqlite).unwrap();
        assert_eq!(statement.as_deref(), Some("SELECT last_insert_rowid()"));

        let statement = resolve_last_insert_id(&source(DOC), Provider::Mysql).unwrap();
        assert_eq!(statement.as_deref(), Some("SELECT LAST_INSERT_ID()"));
    }

    #[test]
    fn test_unmatched_provider_stays_unset() {
        let statement = resolve_last_insert_id(&source(DOC), Provider::Postgres).unwrap();
        assert_eq!(statement, None);
    }

    #[test]
    fn test_missing_section_stays_unset() {
        let doc = r#"<SqlTemplates xmlns="urn:test:templates"><Selects/></SqlTemplates>"#;
        let statement = resolve_last_insert_id(&source(doc), Provider::Sqlite).unwrap();
        assert_eq!(statement, None);
    }

    #[test]
    fn test_empty_statement_stays_unset() {
        let doc = r#"<SqlTemplates xmlns="urn:test:templates">
  <ProviderSpecific>
    <Select name="getlastinsertid" provider="sqlite"> </Select>
  </ProviderSpecific>
</SqlTemplates>"#;
        let statement = resolve_last_insert_id(&source(doc), Provider::Sqlite).unwrap();
        assert_eq!(statement, None);
    }
}
