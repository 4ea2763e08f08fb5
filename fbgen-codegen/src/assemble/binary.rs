//! Pass-through of a precomputed root object.

use std::path::{Path, PathBuf};

use fbgen_core::{File, WriteResult};
use fbgen_schema::Schema;

use super::make_rule;

/// `<out>/<file_name>.<file_extension>`, with `bin` when the schema names
/// no extension.
pub fn binary_file_name(schema: &Schema, output_dir: &Path) -> PathBuf {
    let extension = schema.file_extension.as_deref().unwrap_or("bin");
    output_dir.join(format!("{}.{extension}", schema.file_name))
}

/// Write the schema's precomputed buffer. `None` when there is none.
pub fn write_binary(schema: &Schema, output_dir: &Path) -> eyre::Result<Option<WriteResult>> {
    let Some(buffer) = &schema.buffer else {
        return Ok(None);
    };
    let file = File::binary(binary_file_name(schema, output_dir), buffer.clone());
    file.write().map(Some)
}

/// Dependency rule of the binary file on the schema declaring the root
/// type and its includes; empty when there is no buffer.
pub fn binary_make_rule(schema: &Schema, output_dir: &Path) -> String {
    if schema.buffer.is_none() {
        return String::new();
    }
    let source = schema.root_file.clone().unwrap_or_else(|| schema.file_name.clone());
    let mut sources = vec![source];
    for include in &schema.included_files {
        if !sources.contains(include) {
            sources.push(include.clone());
        }
    }
    make_rule(&[binary_file_name(schema, output_dir)], &sources)
}
