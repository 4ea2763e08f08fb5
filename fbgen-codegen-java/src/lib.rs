//! Java backend for the fbgen code generator.
//!
//! Generates accessor classes for the `com.google.flatbuffers` runtime:
//! one final class per table or struct extending `Table`/`Struct`, and one
//! constants class per enum or union.
//!
//! # Usage
//!
//! This crate is used by the `fbgen` binary. You typically don't need to
//! use it directly.
//!
//! ```ignore
//! use fbgen_codegen::GenerateOptions;
//! use fbgen_codegen_java::{Generator, LanguageCodegen};
//! use fbgen_schema::Schema;
//! use std::path::Path;
//!
//! let schema = Schema::open("monster.json")?;
//! let options = GenerateOptions::default();
//! let generator = Generator::new(&schema, &options);
//!
//! // Preview files without writing
//! let files = generator.preview()?;
//!
//! // Generate files to disk
//! let result = generator.generate(Path::new("src/main/java"))?;
//! ```
//!
//! # Generated Output
//!
//! - `<namespace dirs>/<Type>.java` for every enum, union, struct and table
//! - `<namespace dirs>/<file_name>.java` instead when `one_file` is set

mod generator;
mod renderer;

pub use fbgen_codegen::language::{GenerateResult, JAVA, LanguageCodegen, PreviewFile};
pub use generator::Generator;
pub use renderer::JavaRenderer;
