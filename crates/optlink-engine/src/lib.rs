//! # optlink-engine
//!
//! The modeling-engine boundary of optlink.
//!
//! The optimization engine itself (model compilation, solving) is an
//! external collaborator; this crate specifies the three contracts
//! optlink consumes it through, plus the typed data model they share:
//!
//! - **Types**: [`ElementType`] and [`ScalarValue`], the closed set of
//!   scalar kinds crossing the boundary
//! - **Schemas**: [`ElementSchema`], [`TupleSchema`], [`FieldSchema`],
//!   the classified shape of a declared data element
//! - **Catalog**: [`SchemaCatalog`] resolves element names against a
//!   [`DefinitionSource`] (the engine's introspection API)
//! - **Handler**: [`DataHandler`], the ordered builder protocol used to
//!   materialize sets and tuples inside the engine
//! - **Tuples**: [`TupleRead`] and [`TupleSource`], read access to
//!   solved tuple sets
//! - **Memory**: [`MemoryModel`], an in-memory implementation of all
//!   three contracts for hosts and tests without a live engine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod definition;
pub mod handler;
pub mod memory;
pub mod schema;
pub mod tuple;
pub mod types;

// Re-export commonly used items at the crate root
pub use catalog::SchemaCatalog;
pub use definition::{ComponentDefinition, DefinitionKind, DefinitionSource, ElementDefinition};
pub use handler::DataHandler;
pub use memory::{MemoryModel, MemoryTuple};
pub use schema::{ElementSchema, FieldSchema, TupleSchema};
pub use tuple::{TupleRead, TupleSource};
pub use types::{ElementType, ScalarValue};
