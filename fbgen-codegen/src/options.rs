use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Average gap between enum constants at or above which no name table is
/// emitted.
pub const DEFAULT_MAX_SPARSENESS: u64 = 5;

/// Generation flags, usually read from `fbgen.toml` and overridden on the
/// command line.
///
/// ```
/// use fbgen_codegen::GenerateOptions;
///
/// let options: GenerateOptions = "mutable_buffer = true".parse().unwrap();
/// assert!(options.mutable_buffer);
/// assert_eq!(options.max_sparseness, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Concatenate every declaration into one file named after the schema.
    pub one_file: bool,
    /// Emit in-place mutators for scalar fields.
    pub mutable_buffer: bool,
    /// Annotate nullable accessors where the backend supports it.
    pub gen_nullable: bool,
    /// Mark generated types with the backend's generated-code annotation.
    pub gen_generated: bool,
    pub max_sparseness: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            one_file: false,
            mutable_buffer: false,
            gen_nullable: false,
            gen_generated: false,
            max_sparseness: DEFAULT_MAX_SPARSENESS,
        }
    }
}

impl GenerateOptions {
    /// Load options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for GenerateOptions {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
