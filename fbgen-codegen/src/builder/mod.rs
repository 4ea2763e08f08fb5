//! Code model and layout.
//!
//! Emitters describe code as data:
//! - [`Expr`] and [`Statement`] - Expression and statement trees
//! - [`MethodSpec`] - Methods, properties, constructors and indexers
//! - [`ClassSpec`], [`EnumSpec`] - Declarations and their [`Member`]s
//!
//! A [`Renderer`](crate::language::Renderer) lowers the model to
//! [`CodeFragment`]s, which [`CodeBuilder`] lays out with indentation.

mod code_builder;
mod expr;
mod fragment;
mod function;
mod indent;
mod structure;

pub use code_builder::CodeBuilder;
pub use expr::{Expr, HelperScope, Statement};
pub use fragment::CodeFragment;
pub use function::{Layout, MethodKind, MethodSpec, ParamSpec};
pub use indent::Indent;
pub use structure::{
    ClassKind, ClassSpec, Declaration, EnumSpec, FieldSpec, Member, VariantSpec, Visibility,
};
