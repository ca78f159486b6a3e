#[macro_use]
mod fmt;
pub(crate) use fmt::ToSql;

mod delim;
pub(crate) use delim::Comma;

mod flavor;
pub use flavor::Flavor;

mod ident;
pub(crate) use ident::Ident;

mod param;
pub(crate) use param::Param;

/// Renders SQL fragments for one database flavor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    /// Statements here only differ in identifier quoting.
    flavor: Flavor,
}

pub(crate) struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new(flavor: Flavor) -> Serializer {
        Serializer { flavor }
    }

    /// Serializes a fragment to a string.
    pub(crate) fn sql(&self, fragment: impl ToSql) -> String {
        let mut ret = String::new();

        let mut f = Formatter {
            serializer: self,
            dst: &mut ret,
        };
        fragment.to_sql(&mut f);

        ret
    }
}
