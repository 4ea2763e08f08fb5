//! Source files, dependency rules and binary output.
//!
//! - [`FileAssembler`] - Wraps rendered declarations in header, namespace and imports
//! - [`make_rule`] - Build-tool dependency line for generated sources
//! - [`write_binary`] - Writes a schema's precomputed root object

mod binary;
mod deps;
mod file;

pub use binary::{binary_file_name, binary_make_rule, write_binary};
pub use deps::make_rule;
pub use file::{FileAssembler, SourceFile};
