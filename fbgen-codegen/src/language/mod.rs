//! Backend abstractions.
//!
//! This module provides the pieces a backend is made of:
//! - [`BackendProfile`] - Lexical description of a backend, with [`JAVA`] and [`CSHARP`]
//! - [`Renderer`] - Lowers the code model to text
//! - [`LanguageCodegen`] - Main trait for backend generators
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewFile`] - Generated file preview

mod profile;
mod profiles;
mod renderer;
mod traits;

pub use profile::{
    BackendProfile, ByteAccess, Capabilities, ComparatorStyle, DocStyle, FloatSpelling, KeySort,
    NamespaceStyle, ReferenceNames, Widening,
};
pub use profiles::{CSHARP, JAVA};
pub use renderer::Renderer;
pub use traits::{GenerateResult, LanguageCodegen, PreviewFile};
