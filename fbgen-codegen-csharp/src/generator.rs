//! C# code generator.

use std::path::{Path, PathBuf};

use eyre::Result;
use fbgen_codegen::{
    CodeGenerator, GenerateOptions,
    assemble::SourceFile,
    language::{GenerateResult, LanguageCodegen, PreviewFile},
};
use fbgen_schema::Schema;

use crate::CSharpRenderer;

/// C# code generator producing accessors for the FlatBuffers .NET runtime.
pub struct Generator<'a> {
    inner: CodeGenerator<'a, CSharpRenderer>,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        Ok(self.inner.preview()?)
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.inner.generate(output_dir)
    }

    fn make_rule(&self, output_dir: &Path) -> String {
        self.inner.make_rule(output_dir)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, options: &'a GenerateOptions) -> Self {
        Self {
            inner: CodeGenerator::new(schema, CSharpRenderer::new(), options),
        }
    }

    /// Rendered files, in definition order.
    pub fn files(&self) -> fbgen_codegen::Result<Vec<SourceFile>> {
        self.inner.files()
    }

    pub fn output_paths(&self, output_dir: &Path) -> Vec<PathBuf> {
        self.inner.output_paths(output_dir)
    }
}
