//! Resolved schema model for the fbgen code generator.
//!
//! The schema front end hands over a fully resolved description of
//! namespaces, enums, fixed structs and tables, with offsets, sizes and
//! alignments already computed. This crate loads that description from
//! JSON, checks that every reference resolves, and exposes read-only
//! lookups for the code generators.

mod defs;
mod error;
mod namespace;
mod schema;
mod types;

pub use defs::{Attributes, EnumDef, EnumVal, FieldDef, StructDef};
pub use error::{Error, ReferenceKind, Result, SourceContext};
pub use namespace::Namespace;
pub use schema::Schema;
pub use types::{Scalar, Type};
