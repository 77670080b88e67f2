//! XML document loading and root inspection

use ormlet_core::{OrmError, Result};
use roxmltree::{Document, Node};
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded XML document plus its root element's namespace binding
///
/// The source owns the document text; `document()` re-yields a parsed view
/// for traversal. The configuration documents declare a default namespace on
/// their root, so element matching downstream is always done on
/// (namespace, local-name) pairs taken from here.
#[derive(Debug, Clone)]
pub struct XmlSource {
    path: PathBuf,
    text: String,
    root_name: String,
    prefix: Option<String>,
    namespace: Option<String>,
}

impl XmlSource {
    /// Open and inspect a document from a file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OrmError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::from_text(path.to_path_buf(), text)
    }

    /// Inspect a document held in memory (tests, embedded samples)
    pub fn parse_str(text: impl Into<String>) -> Result<Self> {
        Self::from_text(PathBuf::from("<inline>"), text.into())
    }

    fn from_text(path: PathBuf, text: String) -> Result<Self> {
        let (root_name, prefix, namespace) = {
            let doc = Document::parse(&text).map_err(|e| OrmError::MalformedXml {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;
            let root = doc.root_element();
            let namespace = root.tag_name().namespace().map(str::to_string);
            let prefix = namespace
                .as_deref()
                .and_then(|uri| root.lookup_prefix(uri))
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            (root.tag_name().name().to_string(), prefix, namespace)
        };
        Ok(Self {
            path,
            text,
            root_name,
            prefix,
            namespace,
        })
    }

    /// Parse the owned text into a navigable document
    pub fn document(&self) -> Result<Document<'_>> {
        Document::parse(&self.text).map_err(|e| OrmError::MalformedXml {
            path: self.path.display().to_string(),
            detail: e.to_string(),
        })
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Local name of the document element
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Namespace prefix bound to the root's namespace, if it is not the
    /// default namespace
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Namespace URI of the document element
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// True when a node carries the given namespace and local name
pub fn is_named(node: Node, namespace: Option<&str>, local: &str) -> bool {
    node.tag_name().name() == local && node.tag_name().namespace() == namespace
}

/// First child element with the given namespace and local name
pub fn find_child<'a, 'input>(
    parent: Node<'a, 'input>,
    namespace: Option<&str>,
    local: &str,
) -> Option<Node<'a, 'input>> {
    parent
        .children()
        .filter(Node::is_element)
        .find(|n| is_named(*n, namespace, local))
}
