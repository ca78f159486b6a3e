//! Merges synthesized SQL statements into MyBatis-style mapping documents.
//!
//! A mapping document names its mapper interface through the root
//! `namespace` attribute. The interface's capability contracts imply a set of
//! operations; every operation the document does not define itself is
//! rendered from a statement template and appended to the document.
//!
//! ```text
//! Document ──▶ Resolver ──▶ (TableContext, OperationSet) ──▶ Merger ──▶ MergedDocument
//! ```

mod error;
pub use error::{Error, IntoError};

pub mod document;
pub use document::{Document, Element};

pub mod merge;
pub use merge::{MergedDocument, Merger};

pub mod resolve;
pub use resolve::{KeyTypePolicy, OperationSet, Resolver};

pub mod schema;
pub use schema::{
    ColumnMapping, Contract, ContractBinding, TableContext, TypeCatalog, TypeDescriptor,
    TypeResolver,
};

pub mod template;
pub use template::Templates;

/// A Result type alias that uses mapweave's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
