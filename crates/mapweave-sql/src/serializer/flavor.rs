use serde::{Deserialize, Serialize};

/// SQL flavor of the generated statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Identifiers are written as-is
    #[default]
    Plain,

    /// Identifiers are quoted with backticks
    Mysql,

    /// Identifiers are quoted with double quotes
    Postgresql,
}
