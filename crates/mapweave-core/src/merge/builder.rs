use crate::{
    document::{self, Document, Element},
    Error, Result,
};

use std::{fmt, io::Write};

/// Indentation used when the document has no top-level element to copy
/// indentation from.
const DEFAULT_INDENT: &str = "    ";

/// A synthesized statement, checked to be a well-formed element whose `id`
/// is the operation it was rendered for.
#[derive(Debug, Clone)]
pub struct Fragment {
    text: String,
    element: Element,
}

impl Fragment {
    pub fn parse(operation: &str, text: impl Into<String>) -> Result<Fragment> {
        let text = text.into().trim().to_string();
        let element = document::parse_element(&text)
            .map_err(|message| Error::fragment_parse(operation, message))?;

        if element.id() != Some(operation) {
            return Err(Error::fragment_parse(
                operation,
                format!(
                    "expected root element <{}> to have id `{operation}`, found {}",
                    element.name(),
                    element
                        .id()
                        .map_or_else(|| "none".to_string(), |id| format!("`{id}`"))
                ),
            ));
        }

        Ok(Fragment { text, element })
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The statement element's own markup, without any prolog or comments
    /// the template emitted around it
    pub fn statement(&self) -> &str {
        &self.text[self.element.span()]
    }
}

/// Accumulates the statements added to a document.
///
/// The source document is never modified; [`MergeBuilder::build`] produces
/// a new snapshot.
#[derive(Debug)]
pub struct MergeBuilder<'a> {
    doc: &'a Document,
    added: Vec<Fragment>,
    retained: Vec<String>,
}

impl<'a> MergeBuilder<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            added: vec![],
            retained: vec![],
        }
    }

    /// Appends a new top-level statement.
    pub fn push(&mut self, fragment: Fragment) -> &mut Self {
        self.added.push(fragment);
        self
    }

    /// Records that the document's own definition of `operation` was kept.
    pub fn retain(&mut self, operation: impl Into<String>) -> &mut Self {
        self.retained.push(operation.into());
        self
    }

    pub fn build(self) -> MergedDocument {
        let text = if self.added.is_empty() {
            self.doc.source().to_string()
        } else {
            self.splice()
        };

        MergedDocument {
            namespace: self.doc.namespace().to_string(),
            text,
            added: self.added.into_iter().map(|f| f.element).collect(),
            retained: self.retained,
            pass_through: false,
        }
    }

    /// Copies the source, inserting the new statements before the root's
    /// closing tag.
    fn splice(&self) -> String {
        let src = self.doc.source();
        let indent = indent_of(self.doc);
        let mut out = String::with_capacity(
            src.len() + self.added.iter().map(|f| f.statement().len() + 8).sum::<usize>(),
        );

        match self.doc.root_close() {
            Some(close) => {
                // Keep the closing tag's own indentation in front of it.
                let head = &src[..close];
                let trimmed = head.trim_end_matches([' ', '\t']);

                out.push_str(trimmed);
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                self.push_fragments(&mut out, indent);
                out.push_str(&head[trimmed.len()..]);
                out.push_str(&src[close..]);
            }
            None => {
                // A self-closing root ends in `/>`; open it up.
                let end = self.doc.root().span().end;

                out.push_str(&src[..end - 2]);
                out.push_str(">\n");
                self.push_fragments(&mut out, indent);
                out.push_str("</");
                out.push_str(self.doc.root().name());
                out.push('>');
                out.push_str(&src[end..]);
            }
        }

        out
    }

    fn push_fragments(&self, out: &mut String, indent: &str) {
        for fragment in &self.added {
            let mut in_cdata = false;
            for line in fragment.statement().lines() {
                if in_cdata {
                    // character data is copied as-is
                    out.push_str(line);
                } else if !line.trim().is_empty() {
                    out.push_str(indent);
                    out.push_str(line);
                }
                out.push('\n');
                in_cdata = in_cdata_after(line, in_cdata);
            }
        }
    }
}

/// Whether a CDATA section is still open at the end of `line`.
fn in_cdata_after(mut line: &str, mut in_cdata: bool) -> bool {
    loop {
        let marker = if in_cdata { "]]>" } else { "<![CDATA[" };
        let Some(at) = line.find(marker) else {
            return in_cdata;
        };
        line = &line[at + marker.len()..];
        in_cdata = !in_cdata;
    }
}

/// Leading whitespace of the first top-level element's line.
fn indent_of(doc: &Document) -> &str {
    let src = doc.source();

    doc.elements()
        .first()
        .and_then(|element| {
            let before = &src[..element.span().start];
            let line_start = before.rfind('\n')? + 1;
            let indent = &before[line_start..];
            (!indent.is_empty() && indent.chars().all(|c| c == ' ' || c == '\t')).then_some(indent)
        })
        .unwrap_or(DEFAULT_INDENT)
}

/// The result of merging one document. Immutable once built.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    namespace: String,

    /// The serialized document
    text: String,

    /// Statements added by the merge, in insertion order
    added: Vec<Element>,

    /// Operations the document already defined
    retained: Vec<String>,

    /// True when the document was not eligible for merging
    pass_through: bool,
}

impl MergedDocument {
    pub(crate) fn pass_through(doc: &Document) -> Self {
        Self {
            namespace: doc.namespace().to_string(),
            text: doc.source().to_string(),
            added: vec![],
            retained: vec![],
            pass_through: true,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Statements added by the merge
    pub fn added(&self) -> &[Element] {
        &self.added
    }

    /// Operation names added by the merge
    pub fn added_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.added.iter().filter_map(Element::id)
    }

    /// Operations declared by a contract that the document already defined
    pub fn retained(&self) -> &[String] {
        &self.retained
    }

    /// True if the document's type is unknown or has no table, in which
    /// case the output equals the input.
    pub fn is_pass_through(&self) -> bool {
        self.pass_through
    }

    pub fn write_to(&self, mut output: impl Write) -> Result<()> {
        output.write_all(self.text.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for MergedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn select(id: &str) -> Fragment {
        Fragment::parse(
            id,
            format!("<select id=\"{id}\">\n    SELECT 1\n</select>\n"),
        )
        .unwrap()
    }

    #[test]
    fn splice_before_closing_tag() {
        let doc = Document::parse(
            "<mapper namespace=\"a.B\">\n  <sql id=\"cols\">a</sql>\n</mapper>\n",
        )
        .unwrap();

        let mut builder = MergeBuilder::new(&doc);
        builder.push(select("one"));
        let merged = builder.build();

        assert_eq!(
            merged.as_str(),
            "<mapper namespace=\"a.B\">\n  <sql id=\"cols\">a</sql>\n  <select id=\"one\">\n      SELECT 1\n  </select>\n</mapper>\n"
        );
        assert_eq!(merged.added_ids().collect::<Vec<_>>(), ["one"]);
    }

    #[test]
    fn splice_keeps_indented_closing_tag() {
        let doc = Document::parse("<mapper namespace=\"a.B\"><sql id=\"x\"/>\n  </mapper>").unwrap();

        let mut builder = MergeBuilder::new(&doc);
        builder.push(select("one"));

        assert_eq!(
            builder.build().as_str(),
            "<mapper namespace=\"a.B\"><sql id=\"x\"/>\n    <select id=\"one\">\n        SELECT 1\n    </select>\n  </mapper>"
        );
    }

    #[test]
    fn splice_into_self_closing_root() {
        let doc = Document::parse("<mapper namespace=\"a.B\"/>\n").unwrap();

        let mut builder = MergeBuilder::new(&doc);
        builder.push(select("one"));

        assert_eq!(
            builder.build().as_str(),
            "<mapper namespace=\"a.B\">\n    <select id=\"one\">\n        SELECT 1\n    </select>\n</mapper>\n"
        );
    }

    #[test]
    fn splice_drops_text_around_statement() {
        let doc = Document::parse("<mapper namespace=\"a.B\"/>\n").unwrap();
        let fragment = Fragment::parse(
            "one",
            "<?xml version=\"1.0\"?>\n<!-- generated -->\n<select id=\"one\">SELECT 1</select>\n<!-- end -->",
        )
        .unwrap();
        assert_eq!(fragment.statement(), "<select id=\"one\">SELECT 1</select>");

        let mut builder = MergeBuilder::new(&doc);
        builder.push(fragment);

        assert_eq!(
            builder.build().as_str(),
            "<mapper namespace=\"a.B\">\n    <select id=\"one\">SELECT 1</select>\n</mapper>\n"
        );
    }

    #[test]
    fn splice_keeps_cdata_lines() {
        let doc = Document::parse("<mapper namespace=\"a.B\"/>\n").unwrap();
        let fragment = Fragment::parse(
            "one",
            "<select id=\"one\"><![CDATA[\nSELECT *\n  FROM t\n]]>\n  <if test=\"x\">AND 1</if>\n</select>",
        )
        .unwrap();

        let mut builder = MergeBuilder::new(&doc);
        builder.push(fragment);

        assert_eq!(
            builder.build().as_str(),
            "<mapper namespace=\"a.B\">\n    <select id=\"one\"><![CDATA[\nSELECT *\n  FROM t\n]]>\n      <if test=\"x\">AND 1</if>\n    </select>\n</mapper>\n"
        );
    }

    #[test]
    fn nothing_added_copies_source() {
        let src = "<mapper namespace=\"a.B\">  <sql id=\"x\"/></mapper>";
        let doc = Document::parse(src).unwrap();

        let mut builder = MergeBuilder::new(&doc);
        builder.retain("x");
        let merged = builder.build();

        assert_eq!(merged.as_str(), src);
        assert_eq!(merged.retained(), ["x"]);
        assert!(!merged.is_pass_through());
    }

    #[test]
    fn fragment_id_must_match_operation() {
        let err = Fragment::parse("insert", "<insert id=\"save\"/>").unwrap_err();
        assert!(err.is_fragment_parse());

        let err = Fragment::parse("insert", "<insert id=\"insert\">").unwrap_err();
        assert!(err.is_fragment_parse());
    }
}
