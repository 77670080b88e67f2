//! Schema validation for the configuration documents
//!
//! Schemas are XSD files compiled at construction into per-element rules
//! (declared/required attributes, allowed child elements). Validation walks
//! every element of every document and accumulates violations instead of
//! failing on the first one; a non-empty report fails the whole run with a
//! single aggregated error so operators see everything at once.
//!
//! The compiler covers the XSD subset the configuration vocabularies use:
//! global and inline element declarations, named complex types, sequence /
//! choice / all groups, element refs, attributes with `use="required"`, and
//! simple-content extensions.

use ormlet_core::{OrmError, Result, ValidationReport};
use roxmltree::{Document, Node};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Validates XML documents against a set of namespace-bound XSD schemas
#[derive(Debug)]
pub struct SchemaValidator {
    schemas: HashMap<String, CompiledSchema>,
}

#[derive(Debug)]
struct CompiledSchema {
    path: PathBuf,
    elements: HashMap<String, ElementRule>,
}

#[derive(Debug, Default)]
struct ElementRule {
    declared_attributes: Vec<String>,
    required_attributes: Vec<String>,
    /// `None` leaves child elements unconstrained
    children: Option<HashSet<String>>,
}

impl SchemaValidator {
    /// Build a validator from parallel namespace / schema-file lists
    ///
    /// The lists must be the same length, schemas cannot be given without
    /// namespaces, and every schema file must exist and parse.
    pub fn new(namespaces: &[String], schema_paths: &[PathBuf]) -> Result<Self> {
        if namespaces.is_empty() && !schema_paths.is_empty() {
            return Err(OrmError::Configuration(
                "schema files were given without target namespaces".to_string(),
            ));
        }
        if namespaces.len() != schema_paths.len() {
            return Err(OrmError::Configuration(format!(
                "{} namespaces paired with {} schema files",
                namespaces.len(),
                schema_paths.len()
            )));
        }

        let mut schemas = HashMap::new();
        for (namespace, path) in namespaces.iter().zip(schema_paths) {
            if !path.exists() {
                return Err(OrmError::Configuration(format!(
                    "Schema file '{}' for namespace '{}' does not exist",
                    path.display(),
                    namespace
                )));
            }
            let text = fs::read_to_string(path)?;
            schemas.insert(namespace.clone(), compile(path, &text)?);
        }
        Ok(Self { schemas })
    }

    /// Validate one or more documents against the registered schemas
    ///
    /// Missing or unparsable files abort immediately; schema violations and
    /// warnings are collected across all files and aggregated into one
    /// `ValidationFailed` afterwards.
    pub fn validate<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        let mut report = ValidationReport::new();
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                return Err(OrmError::NotFound(path.to_path_buf()));
            }
            let text = fs::read_to_string(path)?;
            let doc = Document::parse(&text).map_err(|e| OrmError::MalformedXml {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;
            self.validate_document(path, &doc, &mut report);
        }
        report.into_result()
    }

    fn validate_document(&self, path: &Path, doc: &Document, report: &mut ValidationReport) {
        // Warn once per unresolved namespace, not once per element.
        let mut unresolved: HashSet<Option<String>> = HashSet::new();

        for node in doc.descendants().filter(Node::is_element) {
            let namespace = node.tag_name().namespace();
            let local = node.tag_name().name();

            let Some(schema) = namespace.and_then(|uri| self.schemas.get(uri)) else {
                if unresolved.insert(namespace.map(str::to_string)) {
                    match namespace {
                        Some(uri) => report.push_warning(format!(
                            "{}: no schema location resolved for namespace '{}'",
                            path.display(),
                            uri
                        )),
                        None => report.push_warning(format!(
                            "{}: element '{}' is not namespace-qualified; no schema applies",
                            path.display(),
                            local
                        )),
                    }
                }
                continue;
            };

            let pos = doc.text_pos_at(node.range().start);
            let Some(rule) = schema.elements.get(local) else {
                report.push_error(format!(
                    "{}:{}:{}: element '{}' is not declared in schema '{}'",
                    path.display(),
                    pos.row,
                    pos.col,
                    local,
                    schema.path.display()
                ));
                continue;
            };

            for required in &rule.required_attributes {
                if node.attribute(required.as_str()).is_none() {
                    report.push_error(format!(
                        "{}:{}:{}: element '{}' is missing required attribute '{}'",
                        path.display(),
                        pos.row,
                        pos.col,
                        local,
                        required
                    ));
                }
            }

            for attr in node.attributes() {
                if attr.namespace().is_some() {
                    continue;
                }
                if !rule.declared_attributes.iter().any(|a| a == attr.name()) {
                    report.push_warning(format!(
                        "{}:{}:{}: attribute '{}' on element '{}' is not declared in the schema",
                        path.display(),
                        pos.row,
                        pos.col,
                        attr.name(),
                        local
                    ));
                }
            }

            if let Some(allowed) = &rule.children {
                for child in node.children().filter(Node::is_element) {
                    let child_local = child.tag_name().name();
                    if !allowed.contains(child_local) {
                        let child_pos = doc.text_pos_at(child.range().start);
                        report.push_error(format!(
                            "{}:{}:{}: element '{}' is not allowed inside '{}'",
                            path.display(),
                            child_pos.row,
                            child_pos.col,
                            child_local,
                            local
                        ));
                    }
                }
            }
        }
    }
}

fn compile(path: &Path, text: &str) -> Result<CompiledSchema> {
    let doc = Document::parse(text).map_err(|e| OrmError::MalformedXml {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    let root = doc.root_element();

    // Top-level named complex types, resolvable through `type=` references.
    let named_types: HashMap<&str, Node> = root
        .children()
        .filter(Node::is_element)
        .filter(|n| is_xs(*n, "complexType"))
        .filter_map(|n| n.attribute("name").map(|name| (name, n)))
        .collect();

    let mut elements = HashMap::new();
    for node in doc.descendants().filter(|n| is_xs(*n, "element")) {
        // `ref=` occurrences point at a declaration compiled elsewhere.
        let Some(name) = node.attribute("name") else {
            continue;
        };
        elements.insert(name.to_string(), rule_for(node, &named_types));
    }

    Ok(CompiledSchema {
        path: path.to_path_buf(),
        elements,
    })
}

fn rule_for(element: Node, named_types: &HashMap<&str, Node>) -> ElementRule {
    let complex_type = element
        .children()
        .filter(Node::is_element)
        .find(|n| is_xs(*n, "complexType"))
        .or_else(|| {
            element
                .attribute("type")
                .and_then(|t| named_types.get(local_part(t)).copied())
        });

    let Some(complex_type) = complex_type else {
        // Simple or built-in typed content: text only, nothing to constrain.
        return ElementRule::default();
    };

    let mut rule = ElementRule {
        children: Some(HashSet::new()),
        ..ElementRule::default()
    };
    collect_content(complex_type, &mut rule);
    rule
}

fn collect_content(node: Node, rule: &mut ElementRule) {
    for child in node.children().filter(Node::is_element) {
        if is_xs(child, "attribute") {
            if let Some(name) = child.attribute("name") {
                rule.declared_attributes.push(name.to_string());
                if child.attribute("use") == Some("required") {
                    rule.required_attributes.push(name.to_string());
                }
            }
        } else if is_xs(child, "element") {
            let name = child
                .attribute("name")
                .or_else(|| child.attribute("ref").map(local_part));
            if let (Some(name), Some(allowed)) = (name, rule.children.as_mut()) {
                allowed.insert(name.to_string());
            }
        } else if is_xs(child, "any") {
            rule.children = None;
        } else if is_xs(child, "sequence")
            || is_xs(child, "choice")
            || is_xs(child, "all")
            || is_xs(child, "simpleContent")
            || is_xs(child, "complexContent")
            || is_xs(child, "extension")
            || is_xs(child, "restriction")
        {
            collect_content(child, rule);
        }
    }
}

fn is_xs(node: Node, local: &str) -> bool {
    node.tag_name().name() == local && node.tag_name().namespace() == Some(XS_NS)
}

fn local_part(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}
