use crate::{
    document::{Document, Element},
    schema::{ColumnMapping, Contract, TableContext, TypeDescriptor},
    Error, Result,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// `id` of the result map column mappings are read from
pub const BASE_RESULT_MAP: &str = "BaseResultMap";

/// Which contract's key binding is used when a type binds a key type
/// through both [`Contract::Base`] and [`Contract::PrimaryKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyTypePolicy {
    /// The primary-key contract's binding wins.
    #[default]
    PrimaryKeyFirst,

    /// The base contract's binding wins.
    BaseFirst,
}

impl KeyTypePolicy {
    fn order(self) -> [Contract; 2] {
        match self {
            KeyTypePolicy::PrimaryKeyFirst => [Contract::PrimaryKey, Contract::Base],
            KeyTypePolicy::BaseFirst => [Contract::Base, Contract::PrimaryKey],
        }
    }
}

/// Union of the operations declared by a type's contracts.
///
/// Names declared by more than one contract appear once. Iteration is in
/// name order so merges are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSet {
    names: BTreeSet<&'static str>,
}

impl OperationSet {
    /// Adds every operation `contract` declares.
    pub fn add_contract(&mut self, contract: Contract) {
        self.names.extend(contract.operations().iter().copied());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Contract> for OperationSet {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        let mut set = OperationSet::default();
        for contract in iter {
            set.add_contract(contract);
        }
        set
    }
}

/// Table metadata and operations resolved for one document.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub table: TableContext,
    pub operations: OperationSet,
}

/// Resolves the table metadata and operation set of a mapping document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: KeyTypePolicy,
}

impl Resolver {
    pub fn new(policy: KeyTypePolicy) -> Self {
        Self { policy }
    }

    /// Resolves `ty` against `doc`.
    ///
    /// Returns `Ok(None)` when the type carries no table name; such
    /// documents are passed through unchanged.
    pub fn resolve(&self, doc: &Document, ty: &TypeDescriptor) -> Result<Option<Resolution>> {
        let Some(table) = ty.table.as_deref() else {
            return Ok(None);
        };

        let Some(result_map) = doc.find("resultMap", BASE_RESULT_MAP) else {
            return Err(Error::missing_base_result_map(doc.namespace()));
        };
        let (identity, columns) = read_result_map(result_map)?;

        let operations: OperationSet = Contract::ALL
            .into_iter()
            .filter(|contract| ty.binding(*contract).is_some())
            .collect();

        let mut cx = TableContext::new(doc.namespace(), table, columns);
        if let Some(identity) = identity {
            cx = cx.with_identity(identity);
        }
        if let Some(key_type) = self.key_type(ty) {
            cx = cx.with_key_type(key_type);
        }
        if let Some(entity_type) = Contract::ALL
            .into_iter()
            .find_map(|contract| ty.binding(contract).map(|binding| binding.entity()))
        {
            cx = cx.with_entity_type(entity_type);
        }

        tracing::debug!(
            namespace = doc.namespace(),
            table,
            key_type = cx.key_type(),
            operations = operations.len(),
            "resolved mapper"
        );

        Ok(Some(Resolution {
            table: cx,
            operations,
        }))
    }

    fn key_type<'a>(&self, ty: &'a TypeDescriptor) -> Option<&'a str> {
        self.policy
            .order()
            .into_iter()
            .find_map(|contract| ty.binding(contract)?.key_type())
    }
}

/// Reads the identity mapping and the ordered column mappings.
fn read_result_map(result_map: &Element) -> Result<(Option<ColumnMapping>, Vec<ColumnMapping>)> {
    let mut identity = None;
    let mut columns = vec![];

    for child in result_map.children() {
        match child.name() {
            "id" => {
                if identity.is_some() {
                    return Err(Error::invalid_result_map(
                        "more than one <id> mapping declared",
                    ));
                }
                let mapping = ColumnMapping::from_element(child)?;
                identity = Some(mapping.clone());
                columns.push(mapping);
            }
            "result" => columns.push(ColumnMapping::from_element(child)?),
            // associations, collections and discriminators map no column
            // of this table
            _ => {}
        }
    }

    Ok((identity, columns))
}
