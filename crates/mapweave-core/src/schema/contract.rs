use serde::{Deserialize, Serialize};

/// A generic data-access contract a mapper interface may implement.
///
/// Each contract declares a fixed set of operations. Contracts are
/// parameterized by entity and key types; the bound arguments live on
/// [`ContractBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contract {
    /// `BaseOperations<Entity, Query, Key>`: CRUD plus query-object lookups
    Base,

    /// `ExampleOperations<Entity>`: criteria ("example") based operations
    Example,

    /// `PrimaryKeyOperations<Entity, Key>`: operations addressed by key
    PrimaryKey,
}

const BASE_OPERATIONS: &[&str] = &[
    "insert",
    "insertSelective",
    "selectByPrimaryKey",
    "updateByPrimaryKey",
    "updateByPrimaryKeySelective",
    "deleteByPrimaryKey",
    "selectByQuery",
    "countByQuery",
];

const EXAMPLE_OPERATIONS: &[&str] = &[
    "selectByExample",
    "countByExample",
    "deleteByExample",
    "updateByExample",
    "updateByExampleSelective",
];

const PRIMARY_KEY_OPERATIONS: &[&str] = &[
    "selectByPrimaryKey",
    "updateByPrimaryKey",
    "updateByPrimaryKeySelective",
    "deleteByPrimaryKey",
];

impl Contract {
    pub const ALL: [Contract; 3] = [Contract::Base, Contract::Example, Contract::PrimaryKey];

    /// The interface name of the contract
    pub fn name(self) -> &'static str {
        match self {
            Contract::Base => "BaseOperations",
            Contract::Example => "ExampleOperations",
            Contract::PrimaryKey => "PrimaryKeyOperations",
        }
    }

    /// Names of the operations the contract declares
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            Contract::Base => BASE_OPERATIONS,
            Contract::Example => EXAMPLE_OPERATIONS,
            Contract::PrimaryKey => PRIMARY_KEY_OPERATIONS,
        }
    }

    /// Names of the contract's type parameters, in declaration order
    pub fn type_params(self) -> &'static [&'static str] {
        match self {
            Contract::Base => &["Entity", "Query", "Key"],
            Contract::Example => &["Entity"],
            Contract::PrimaryKey => &["Entity", "Key"],
        }
    }

    /// Position of the key type parameter, if the contract binds one
    pub fn key_param(self) -> Option<usize> {
        match self {
            Contract::Base => Some(2),
            Contract::Example => None,
            Contract::PrimaryKey => Some(1),
        }
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A contract implemented by a mapper type, with its type arguments bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContractBinding {
    Base {
        entity: String,
        query: String,
        key: String,
    },
    Example {
        entity: String,
    },
    PrimaryKey {
        entity: String,
        key: String,
    },
}

impl ContractBinding {
    pub fn contract(&self) -> Contract {
        match self {
            ContractBinding::Base { .. } => Contract::Base,
            ContractBinding::Example { .. } => Contract::Example,
            ContractBinding::PrimaryKey { .. } => Contract::PrimaryKey,
        }
    }

    /// Bound type arguments, in the order of [`Contract::type_params`]
    pub fn args(&self) -> Vec<&str> {
        match self {
            ContractBinding::Base { entity, query, key } => {
                vec![entity.as_str(), query.as_str(), key.as_str()]
            }
            ContractBinding::Example { entity } => vec![entity.as_str()],
            ContractBinding::PrimaryKey { entity, key } => vec![entity.as_str(), key.as_str()],
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            ContractBinding::Base { entity, .. }
            | ContractBinding::Example { entity }
            | ContractBinding::PrimaryKey { entity, .. } => entity,
        }
    }

    /// The bound key type, taken from the contract's key parameter slot
    pub fn key_type(&self) -> Option<&str> {
        let slot = self.contract().key_param()?;
        self.args().get(slot).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_param_slots_match_bindings() {
        let base = ContractBinding::Base {
            entity: "User".into(),
            query: "UserQuery".into(),
            key: "Integer".into(),
        };
        assert_eq!(base.key_type(), Some("Integer"));

        let pk = ContractBinding::PrimaryKey {
            entity: "Order".into(),
            key: "Long".into(),
        };
        assert_eq!(pk.key_type(), Some("Long"));

        let example = ContractBinding::Example {
            entity: "User".into(),
        };
        assert_eq!(example.key_type(), None);
    }

    #[test]
    fn arity_matches_type_params() {
        let bindings = [
            ContractBinding::Base {
                entity: "E".into(),
                query: "Q".into(),
                key: "K".into(),
            },
            ContractBinding::Example { entity: "E".into() },
            ContractBinding::PrimaryKey {
                entity: "E".into(),
                key: "K".into(),
            },
        ];

        for binding in &bindings {
            assert_eq!(
                binding.args().len(),
                binding.contract().type_params().len(),
                "{}",
                binding.contract()
            );
        }
    }

    #[test]
    fn primary_key_operations_are_base_operations() {
        for op in Contract::PrimaryKey.operations() {
            assert!(Contract::Base.operations().contains(op), "{op}");
        }
    }
}
