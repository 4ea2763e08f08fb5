//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;

/// Trait for language-specific code generators.
///
/// Implement this trait to add a backend to the `fbgen` binary.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "java", "csharp")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "java", "cs")
    fn file_extension(&self) -> &'static str;

    /// Render every file without touching the disk.
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;

    /// Dependency rule listing every output file and the schema's includes.
    fn make_rule(&self, output_dir: &Path) -> String;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files whose content changed or that did not exist.
    pub written: Vec<String>,
    /// Files that already held identical content.
    pub unchanged: Vec<String>,
}

impl GenerateResult {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
