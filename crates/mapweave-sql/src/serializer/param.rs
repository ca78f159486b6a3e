use super::{Formatter, ToSql};

use mapweave_core::ColumnMapping;

/// A bound statement parameter, `#{property,jdbcType=TYPE}`.
pub(crate) struct Param<'a> {
    pub(crate) mapping: &'a ColumnMapping,

    /// Object path in front of the property, e.g. `record.`
    pub(crate) prefix: &'static str,
}

impl<'a> Param<'a> {
    pub(crate) fn new(mapping: &'a ColumnMapping) -> Self {
        Param { mapping, prefix: "" }
    }

    pub(crate) fn prefixed(mapping: &'a ColumnMapping, prefix: &'static str) -> Self {
        Param { mapping, prefix }
    }
}

impl ToSql for Param<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "#{", self.prefix, &self.mapping.property);
        if let Some(jdbc_type) = &self.mapping.jdbc_type {
            fmt!(f, ",jdbcType=", jdbc_type);
        }
        fmt!(f, "}");
    }
}
