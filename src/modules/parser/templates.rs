//! Template dictionary construction

use crate::xml::{find_child, XmlSource};
use ormlet_core::{OrmError, Result, SqlTemplateSet};
use ormlet_types::{placeholder, SqlOperation};
use roxmltree::Node;

/// Build the four template dictionaries from a validated templates document
///
/// Each category section (`Inserts`, `Selects`, `Updates`, `Deletes`) is
/// optional; an absent section leaves its dictionary empty. Every child of a
/// present section contributes one template keyed by its `name` attribute,
/// with the node text as the template body. A duplicate name within one
/// category aborts construction.
pub fn build_template_set(source: &XmlSource) -> Result<SqlTemplateSet> {
    let doc = source.document()?;
    let namespace = source.namespace();
    let root = doc.root_element();

    let mut set = SqlTemplateSet::new();
    for operation in SqlOperation::all().iter().copied() {
        let Some(section) = find_child(root, namespace, operation.section_name()) else {
            continue;
        };
        for node in section.children().filter(Node::is_element) {
            let name = node.attribute("name").ok_or_else(|| {
                OrmError::Configuration(format!(
                    "{} template in '{}' has no 'name' attribute",
                    operation,
                    source.path().display()
                ))
            })?;
            let template = node.text().map(str::trim).unwrap_or_default();
            set.insert(operation, name, template)?;
        }
    }
    Ok(set)
}

/// Report templates whose positional placeholders skip indices
///
/// The execution layer binds arguments positionally, so `{0},{2}` without
/// `{1}` is almost always a typo in the document. Diagnostics only; the
/// builder itself does not police numbering.
pub fn lint_placeholders(set: &SqlTemplateSet) -> Vec<String> {
    let mut notes = Vec::new();
    for operation in SqlOperation::all().iter().copied() {
        for name in set.names(operation) {
            let template = set.get(operation, name).unwrap_or_default();
            let gaps = placeholder::gaps(template);
            if !gaps.is_empty() {
                notes.push(format!(
                    "{} template '{}' skips placeholder indices {:?}",
                    operation, name, gaps
                ));
            }
        }
    }
    notes
}
