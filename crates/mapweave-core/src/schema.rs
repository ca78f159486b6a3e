mod column;
pub use column::ColumnMapping;

mod contract;
pub use contract::{Contract, ContractBinding};

mod table;
pub use table::TableContext;

mod ty;
pub use ty::{TypeCatalog, TypeDescriptor, TypeResolver};
