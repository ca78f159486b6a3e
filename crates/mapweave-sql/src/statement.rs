use crate::serializer::{Serializer, ToSql};

use quick_xml::escape::{escape, partial_escape};

const INDENT: &str = "    ";

/// Writes one statement element, e.g. `<select id="..."> ... </select>`.
///
/// SQL lines are escaped as element text; nested dynamic SQL tags (`<if>`,
/// `<where>`, ...) are written with [`Statement::element`].
pub(crate) struct Statement<'a> {
    serializer: &'a Serializer,
    tag: &'static str,
    dst: String,
    depth: usize,
}

impl<'a> Statement<'a> {
    /// Opens the statement element. Attributes with a `None` value are
    /// omitted.
    pub(crate) fn open(
        serializer: &'a Serializer,
        tag: &'static str,
        attrs: &[(&str, Option<&str>)],
    ) -> Self {
        let mut stmt = Statement {
            serializer,
            tag,
            dst: String::new(),
            depth: 0,
        };

        stmt.open_tag(tag, attrs.iter().filter_map(|(k, v)| Some((*k, (*v)?))));
        stmt
    }

    /// Writes a line of SQL. Fragments spanning several lines are indented
    /// line by line.
    pub(crate) fn line(&mut self, fragment: impl ToSql) -> &mut Self {
        let sql = self.serializer.sql(fragment);
        for line in sql.lines() {
            self.indent();
            self.dst.push_str(&partial_escape(line));
            self.dst.push('\n');
        }
        self
    }

    /// Writes a nested dynamic SQL element.
    pub(crate) fn element(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.open_tag(tag, attrs.iter().copied());
        body(self);
        self.close_tag(tag);
        self.dst.push('\n');
        self
    }

    /// `<if test="...">` around `body`
    pub(crate) fn when(&mut self, test: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.element("if", &[("test", test)], body)
    }

    pub(crate) fn finish(mut self) -> String {
        let tag = self.tag;
        self.close_tag(tag);
        self.dst
    }

    fn open_tag<'b>(&mut self, tag: &str, attrs: impl Iterator<Item = (&'b str, &'b str)>) {
        self.indent();
        self.dst.push('<');
        self.dst.push_str(tag);
        for (name, value) in attrs {
            self.dst.push(' ');
            self.dst.push_str(name);
            self.dst.push_str("=\"");
            self.dst.push_str(&escape(value));
            self.dst.push('"');
        }
        self.dst.push_str(">\n");
        self.depth += 1;
    }

    fn close_tag(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.dst.push_str("</");
        self.dst.push_str(tag);
        self.dst.push('>');
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.dst.push_str(INDENT);
        }
    }
}
