//! Schema definitions to declarations.
//!
//! - [`TypeMapper`] - Type names, casts, masks and default literals for one backend
//! - [`EnumEmitter`] - Enums, name tables and (C#) typed enum wrappers
//! - [`StructEmitter`] - Fixed struct and table accessors, builders, lookup and clone
//!
//! Emitters only build [`Declaration`](crate::builder::Declaration)s; a
//! [`Renderer`](crate::language::Renderer) spells them.

mod enums;
mod structs;
mod type_mapper;
mod wrappers;

pub use enums::{EnumEmitter, name_table};
pub use structs::{BuildPlan, FieldPath, StructEmitter};
pub use type_mapper::TypeMapper;

use crate::builder::Expr;

/// A call on the `builder` parameter.
pub(crate) fn builder_call(method: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::call(Expr::ident("builder"), method, args)
}
