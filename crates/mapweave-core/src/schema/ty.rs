use super::{Contract, ContractBinding};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What the merge needs to know about a mapper interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fully qualified name, matched against a document's `namespace`
    pub namespace: String,

    /// Table the type is annotated with. Types without a table are passed
    /// through untouched.
    #[serde(default)]
    pub table: Option<String>,

    /// Capability contracts the type implements
    #[serde(default)]
    pub contracts: Vec<ContractBinding>,
}

impl TypeDescriptor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            table: None,
            contracts: vec![],
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn implements(mut self, binding: ContractBinding) -> Self {
        self.contracts.push(binding);
        self
    }

    /// Returns the binding for `contract`. When a contract is listed more
    /// than once the last binding wins.
    pub fn binding(&self, contract: Contract) -> Option<&ContractBinding> {
        self.contracts
            .iter()
            .rev()
            .find(|binding| binding.contract() == contract)
    }
}

/// Resolves a document namespace to a type descriptor.
pub trait TypeResolver: Send + Sync {
    /// Returns `None` when the namespace names no known type.
    fn resolve(&self, namespace: &str) -> Option<&TypeDescriptor>;
}

/// In-memory set of type descriptors, keyed by namespace.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor, returning the one it replaced.
    pub fn insert(&mut self, ty: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(ty.namespace.clone(), ty)
    }

    pub fn with(mut self, ty: TypeDescriptor) -> Self {
        self.insert(ty);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.types.values()
    }
}

impl FromIterator<TypeDescriptor> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = TypeCatalog::new();
        for ty in iter {
            catalog.insert(ty);
        }
        catalog
    }
}

impl TypeResolver for TypeCatalog {
    fn resolve(&self, namespace: &str) -> Option<&TypeDescriptor> {
        self.types.get(namespace)
    }
}
