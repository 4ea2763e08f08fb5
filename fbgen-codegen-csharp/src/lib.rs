//! C# backend for the fbgen code generator.
//!
//! Generates accessor structs for the `FlatBuffers` .NET runtime: one
//! `IFlatbufferObject` value type per table or struct, one native enum per
//! enum or union, and the typed collection wrappers that go with them.
//!
//! # Usage
//!
//! This crate is used by the `fbgen` binary. You typically don't need to
//! use it directly.
//!
//! ```ignore
//! use fbgen_codegen::GenerateOptions;
//! use fbgen_codegen_csharp::{Generator, LanguageCodegen};
//! use fbgen_schema::Schema;
//! use std::path::Path;
//!
//! let schema = Schema::open("monster.json")?;
//! let options = GenerateOptions::default();
//! let generator = Generator::new(&schema, &options);
//!
//! let result = generator.generate(Path::new("Generated"))?;
//! println!("{} files written", result.written.len());
//! ```
//!
//! # Generated Output
//!
//! - `<namespace dirs>/<Type>.cs` for every enum, union, struct and table
//! - `<namespace dirs>/<file_name>.cs` instead when `one_file` is set

mod generator;
mod renderer;

pub use fbgen_codegen::language::{CSHARP, GenerateResult, LanguageCodegen, PreviewFile};
pub use generator::Generator;
pub use renderer::CSharpRenderer;
