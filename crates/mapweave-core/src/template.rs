use crate::{resolve::OperationSet, schema::TableContext, Error, Result};

use indexmap::IndexMap;
use std::fmt;

/// A statement template: renders one operation's statement element from
/// table metadata.
///
/// Templates must be pure functions of the context; they are shared across
/// threads when documents are merged in parallel.
pub type Template = dyn Fn(&TableContext) -> Result<String> + Send + Sync;

/// Maps operation names to statement templates.
#[derive(Default)]
pub struct Templates {
    templates: IndexMap<String, Box<Template>>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the template for `operation`, replacing any previous one.
    pub fn register<F>(&mut self, operation: impl Into<String>, template: F) -> &mut Self
    where
        F: Fn(&TableContext) -> Result<String> + Send + Sync + 'static,
    {
        self.templates.insert(operation.into(), Box::new(template));
        self
    }

    pub fn with<F>(mut self, operation: impl Into<String>, template: F) -> Self
    where
        F: Fn(&TableContext) -> Result<String> + Send + Sync + 'static,
    {
        self.register(operation, template);
        self
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.templates.contains_key(operation)
    }

    /// Names of the registered operations, in registration order
    pub fn operations(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    /// Checks that every operation in `operations` has a template.
    pub fn validate(&self, operations: &OperationSet) -> Result<()> {
        match operations.iter().find(|operation| !self.contains(operation)) {
            Some(operation) => Err(Error::unknown_operation(operation)),
            None => Ok(()),
        }
    }

    /// Renders the statement for `operation`.
    pub fn render(&self, operation: &str, cx: &TableContext) -> Result<String> {
        let Some(template) = self.templates.get(operation) else {
            return Err(Error::unknown_operation(operation));
        };

        template(cx)
    }
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.templates.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Contract;

    fn cx() -> TableContext {
        TableContext::new("a.B", "b", vec![])
    }

    #[test]
    fn render_registered() {
        let templates = Templates::new().with("countAll", |cx: &TableContext| {
            Ok(format!(
                "<select id=\"countAll\">SELECT COUNT(*) FROM {}</select>",
                cx.table()
            ))
        });

        assert_eq!(
            templates.render("countAll", &cx()).unwrap(),
            "<select id=\"countAll\">SELECT COUNT(*) FROM b</select>"
        );
        assert!(templates.render("missing", &cx()).unwrap_err().is_unknown_operation());
    }

    #[test]
    fn validate_reports_first_missing_operation() {
        let mut templates = Templates::new();
        for op in Contract::PrimaryKey.operations() {
            templates.register(*op, |_: &TableContext| Ok(String::new()));
        }

        let pk: OperationSet = [Contract::PrimaryKey].into_iter().collect();
        assert!(templates.validate(&pk).is_ok());

        let base: OperationSet = [Contract::Base].into_iter().collect();
        let err = templates.validate(&base).unwrap_err();
        assert!(err.is_unknown_operation());
        assert_eq!(
            err.to_string(),
            "no statement template for operation `countByQuery`"
        );
    }
}
