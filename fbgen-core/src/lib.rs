//! Core utilities and types for the fbgen code generator.
//!
//! This crate provides the generated-file abstraction and identifier
//! helpers shared by every backend.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile, WriteResult};
// String utilities
pub use utils::{make_camel, to_lower_first, to_upper_first};
