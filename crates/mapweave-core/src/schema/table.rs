use super::ColumnMapping;
use crate::{Error, Result};

/// Table metadata handed to statement templates.
///
/// A context is built for a single document and is read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContext {
    /// Namespace of the mapper interface
    namespace: String,

    /// Name of the table the mapper reads and writes
    table: String,

    /// The `<id>` mapping of the `BaseResultMap`
    identity: Option<ColumnMapping>,

    /// All column mappings of the `BaseResultMap`, in document order
    columns: Vec<ColumnMapping>,

    /// The key type bound by the mapper's contracts
    key_type: Option<String>,

    /// The entity type bound by the mapper's contracts
    entity_type: Option<String>,
}

impl TableContext {
    pub fn new(
        namespace: impl Into<String>,
        table: impl Into<String>,
        columns: Vec<ColumnMapping>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            table: table.into(),
            identity: None,
            columns,
            key_type: None,
            entity_type: None,
        }
    }

    pub fn with_identity(mut self, identity: ColumnMapping) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the identity (primary key) mapping.
    ///
    /// Key-based statements cannot be rendered without one, so its absence
    /// is an error here rather than at resolution time.
    pub fn identity(&self) -> Result<&ColumnMapping> {
        self.identity.as_ref().ok_or_else(|| {
            Error::invalid_result_map(format!(
                "mapper `{}` declares no <id> mapping",
                self.namespace
            ))
        })
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    /// Column mappings other than the identity mapping
    pub fn non_identity_columns(&self) -> impl Iterator<Item = &ColumnMapping> + '_ {
        self.columns
            .iter()
            .filter(move |column| Some(*column) != self.identity.as_ref())
    }

    pub fn key_type(&self) -> Option<&str> {
        self.key_type.as_deref()
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableContext {
        let id = ColumnMapping::new("id", "id").jdbc_type("BIGINT");
        TableContext::new(
            "com.acme.UserMapper",
            "sys_user",
            vec![id.clone(), ColumnMapping::new("user_name", "userName")],
        )
        .with_identity(id)
    }

    #[test]
    fn non_identity_columns_skip_key() {
        let cx = users();
        let names: Vec<_> = cx.non_identity_columns().map(|c| c.column.as_str()).collect();
        assert_eq!(names, ["user_name"]);
    }

    #[test]
    fn identity_required() {
        let cx = TableContext::new("com.acme.LogMapper", "log", vec![]);
        let err = cx.identity().unwrap_err();
        assert!(err.is_invalid_result_map());
        assert!(users().identity().is_ok());
    }
}
