use std::path::{Path, PathBuf};

use fbgen_core::GeneratedFile;
use fbgen_schema::Namespace;

use crate::{
    GenerateOptions,
    builder::CodeBuilder,
    language::BackendProfile,
};

/// One generated source file: a rendered body wrapped in the backend's
/// file preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    namespace: Namespace,
    name: String,
    extension: &'static str,
    content: String,
}

impl SourceFile {
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path below the output directory, `/` separated.
    pub fn relative_path(&self) -> String {
        let mut parts = self.namespace.components().to_vec();
        parts.push(format!("{}.{}", self.name, self.extension));
        parts.join("/")
    }
}

impl GeneratedFile for SourceFile {
    fn path(&self, base: &Path) -> PathBuf {
        self.namespace
            .dir(base)
            .join(format!("{}.{}", self.name, self.extension))
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}

/// Wraps rendered declarations into [`SourceFile`]s.
#[derive(Debug, Clone, Copy)]
pub struct FileAssembler<'a> {
    profile: &'a BackendProfile,
    options: &'a GenerateOptions,
}

impl<'a> FileAssembler<'a> {
    pub fn new(profile: &'a BackendProfile, options: &'a GenerateOptions) -> Self {
        Self { profile, options }
    }

    /// Build the file `<namespace dirs>/<name>.<ext>` around `body`.
    ///
    /// Returns `None` for an empty body. `includes` controls the import
    /// block, which enum files skip on some backends.
    pub fn assemble(
        &self,
        namespace: &Namespace,
        name: &str,
        body: &str,
        includes: bool,
    ) -> Option<SourceFile> {
        if body.trim().is_empty() {
            return None;
        }
        let p = self.profile;
        let style = p.namespace;
        let scoped = !namespace.is_root();
        let nullable = self.options.gen_nullable.then_some(p.nullable_import).flatten();
        let generated = self.options.gen_generated.then_some(p.generated_annotation).flatten();

        let content = CodeBuilder::default()
            .lines(p.header)
            .blank()
            .when(scoped, |b| {
                b.line(format!(
                    "{} {}{}",
                    style.keyword,
                    namespace.join("."),
                    style.terminator
                ))
                .lines(style.open)
                .blank()
            })
            .when(includes, |b| b.lines(p.includes).blank())
            .when_some(nullable, |b, line| b.line(line).blank())
            .lines(p.class_annotation)
            .lines(generated)
            .raw(body)
            .when_some(style.close.filter(|_| scoped), |b, line| b.blank().line(line))
            .build();

        Some(SourceFile {
            namespace: namespace.clone(),
            name: name.to_string(),
            extension: p.file_extension,
            content,
        })
    }
}
