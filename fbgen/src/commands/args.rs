//! Argument groups shared by several subcommands.

use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use fbgen_codegen::GenerateOptions;
use fbgen_schema::Schema;

use super::UnwrapOrExit;
use crate::language::Language;

/// Which schema to read and which backend to run.
#[derive(Args)]
pub struct Target {
    /// Resolved schema (JSON)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Target language
    #[arg(short, long, value_enum)]
    pub lang: Language,
}

impl Target {
    /// Load the schema, printing its diagnostic and exiting on failure.
    pub fn load(&self) -> Schema {
        Schema::open(&self.schema).unwrap_or_exit()
    }
}

/// Generation options: a TOML file, then flags on top.
#[derive(Args, Default)]
pub struct OptionArgs {
    /// TOML file with generation options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Put every type in one file named after the schema
    #[arg(long)]
    pub one_file: bool,

    /// Generate in-place mutators for scalar fields
    #[arg(long)]
    pub mutable_buffer: bool,

    /// Annotate nullable accessors (Java)
    #[arg(long)]
    pub gen_nullable: bool,

    /// Mark generated types with a generated-code annotation (Java)
    #[arg(long)]
    pub gen_generated: bool,

    /// Average gap between enum values at which name tables are dropped
    #[arg(long)]
    pub max_sparseness: Option<u64>,
}

impl OptionArgs {
    /// Options from `--config` (or defaults) with flags applied on top.
    /// Flags only switch features on.
    pub fn resolve(&self) -> Result<GenerateOptions> {
        let mut options = match &self.config {
            Some(path) => GenerateOptions::from_file(path)
                .wrap_err_with(|| format!("Failed to load options from {}", path.display()))?,
            None => GenerateOptions::default(),
        };
        options.one_file |= self.one_file;
        options.mutable_buffer |= self.mutable_buffer;
        options.gen_nullable |= self.gen_nullable;
        options.gen_generated |= self.gen_generated;
        if let Some(max) = self.max_sparseness {
            options.max_sparseness = max;
        }
        tracing::debug!(?options, "resolved generation options");
        Ok(options)
    }
}
