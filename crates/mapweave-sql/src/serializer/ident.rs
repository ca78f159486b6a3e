use super::{Flavor, Formatter, ToSql};

/// A table or column name, quoted for the flavor.
pub(crate) struct Ident<S>(pub(crate) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = self.0.as_ref();

        let quote = match f.serializer.flavor {
            Flavor::Plain => {
                f.dst.push_str(name);
                return;
            }
            Flavor::Mysql => '`',
            Flavor::Postgresql => '"',
        };

        f.dst.push(quote);
        for c in name.chars() {
            // Double embedded quote characters
            if c == quote {
                f.dst.push(quote);
            }
            f.dst.push(c);
        }
        f.dst.push(quote);
    }
}
