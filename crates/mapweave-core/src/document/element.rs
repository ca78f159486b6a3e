use std::ops::Range;

/// An element of a mapping document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name
    pub(super) name: String,

    /// Attributes in document order, values unescaped
    pub(super) attributes: Vec<(String, String)>,

    /// Child elements in document order
    pub(super) children: Vec<Element>,

    /// Direct text and CDATA content, unescaped and concatenated
    pub(super) text: String,

    /// Byte range of the element in the text it was parsed from
    pub(super) span: Range<usize>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the named attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `id` attribute, which names the operation for statement elements
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
