//! Backend-neutral code generation for the fbgen code generator.
//!
//! This crate turns a resolved [`fbgen_schema::Schema`] into accessor
//! source code. Backends supply a [`language::BackendProfile`] and a
//! [`language::Renderer`]; everything else is shared.
//!
//! # Module Organization
//!
//! - [`builder`] - Code model (expressions, statements, declarations) and [`builder::CodeBuilder`]
//! - [`language`] - Backend profiles, rendering and the [`language::LanguageCodegen`] trait
//! - [`emit`] - TypeMapper, enum and struct emitters, collection wrappers
//! - [`assemble`] - File assembly, make rules and the binary pass-through
//! - [`testing`] - Sample schemas for backend tests (feature-gated)

pub mod assemble;
pub mod builder;
pub mod emit;
pub mod language;

mod error;
mod generator;
mod options;

pub use error::{Error, Result};
pub use generator::CodeGenerator;
pub use options::{DEFAULT_MAX_SPARSENESS, GenerateOptions};

#[cfg(any(test, feature = "testing"))]
pub mod testing;
