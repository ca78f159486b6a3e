mod element;
pub use element::Element;

mod parse;

use crate::{Error, Result};

use std::io::Read;

/// A parsed mapping document.
///
/// The document keeps the source text it was parsed from. Serializing a
/// merge splices new statements into that text, so content the merge does
/// not touch is reproduced byte for byte.
#[derive(Debug, Clone)]
pub struct Document {
    /// The raw document text
    source: String,

    /// The root element, usually `<mapper>`
    root: Element,

    /// Byte offset of the root's closing tag. `None` when the root is
    /// self-closing.
    root_close: Option<usize>,

    /// Value of the root's `namespace` attribute
    namespace: String,
}

impl Document {
    /// Parses a mapping document from a string.
    pub fn parse(source: impl Into<String>) -> Result<Document> {
        let source = source.into();
        let tree = parse::parse(&source).map_err(Error::malformed_document)?;

        let Some(namespace) = tree.root.attr("namespace") else {
            return Err(Error::missing_namespace(tree.root.name()));
        };
        let namespace = namespace.to_string();

        Ok(Document {
            source,
            root: tree.root,
            root_close: tree.root_close,
            namespace,
        })
    }

    /// Reads and parses a mapping document from `input`.
    ///
    /// The reader is consumed to the end; no other I/O is performed.
    pub fn read(mut input: impl Read) -> Result<Document> {
        let mut buf = vec![];
        input.read_to_end(&mut buf)?;

        let source = String::from_utf8(buf).map_err(|err| {
            Error::malformed_document(format!("input is not valid UTF-8: {err}"))
        })?;

        Document::parse(source)
    }

    /// The text the document was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The type identifier declared by the root's `namespace` attribute
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Top-level elements under the root, in document order
    pub fn elements(&self) -> &[Element] {
        self.root.children()
    }

    /// Finds a top-level element by tag name and `id` attribute.
    pub fn find(&self, name: &str, id: &str) -> Option<&Element> {
        self.elements()
            .iter()
            .find(|element| element.name() == name && element.id() == Some(id))
    }

    pub(crate) fn root_close(&self) -> Option<usize> {
        self.root_close
    }
}

/// Parses a standalone element, returning the raw parse failure message.
pub(crate) fn parse_element(src: &str) -> std::result::Result<Element, String> {
    parse::parse(src).map(|tree| tree.root)
}
