use crate::{Error, Result};
use crate::document::Element;

/// Maps one storage column to a field of the entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// The name of the column in the database.
    pub column: String,

    /// The storage type tag (`jdbcType`), if declared.
    pub jdbc_type: Option<String>,

    /// The entity field the column maps to.
    pub property: String,
}

impl ColumnMapping {
    pub fn new(column: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            jdbc_type: None,
            property: property.into(),
        }
    }

    pub fn jdbc_type(mut self, jdbc_type: impl Into<String>) -> Self {
        self.jdbc_type = Some(jdbc_type.into());
        self
    }

    /// Reads a mapping from an `<id>` or `<result>` element.
    pub(crate) fn from_element(element: &Element) -> Result<Self> {
        let require = |name: &str| {
            element.attr(name).ok_or_else(|| {
                Error::invalid_result_map(format!(
                    "<{}> mapping has no `{name}` attribute",
                    element.name()
                ))
            })
        };

        Ok(Self {
            column: require("column")?.to_string(),
            jdbc_type: element.attr("jdbcType").map(str::to_string),
            property: require("property")?.to_string(),
        })
    }
}
