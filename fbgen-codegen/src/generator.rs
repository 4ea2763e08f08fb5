use std::path::{Path, PathBuf};

use fbgen_core::{GeneratedFile, WriteResult};
use fbgen_schema::{Namespace, Schema};
use tracing::{debug, info, warn};

use crate::{
    GenerateOptions, Result,
    assemble::{FileAssembler, SourceFile, make_rule},
    emit::{EnumEmitter, StructEmitter, TypeMapper},
    language::{BackendProfile, GenerateResult, PreviewFile, Renderer},
};

/// One rendered definition waiting for its file.
struct Unit<'a> {
    namespace: &'a Namespace,
    name: &'a str,
    body: String,
    includes: bool,
}

/// Generates every definition of a schema with one backend.
///
/// Each definition is emitted with a [`TypeMapper`] bound to its own
/// namespace, so nothing is shared between definitions. Every file is
/// rendered before the first one is written.
pub struct CodeGenerator<'a, R> {
    schema: &'a Schema,
    renderer: R,
    options: &'a GenerateOptions,
}

impl<'a, R: Renderer> CodeGenerator<'a, R> {
    pub fn new(schema: &'a Schema, renderer: R, options: &'a GenerateOptions) -> Self {
        Self {
            schema,
            renderer,
            options,
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn options(&self) -> &'a GenerateOptions {
        self.options
    }

    pub fn profile(&self) -> &BackendProfile {
        self.renderer.profile()
    }

    fn units(&self) -> Result<Vec<Unit<'a>>> {
        let profile = self.renderer.profile();
        let mut units = Vec::new();
        for def in self.schema.enums() {
            let mapper = TypeMapper::new(profile, self.schema, &def.namespace);
            let declarations = EnumEmitter::new(mapper, self.options).emit(def)?;
            debug!(
                backend = profile.name,
                name = %def.qualified_name(),
                union = def.is_union,
                "emitted enum"
            );
            units.push(Unit {
                namespace: &def.namespace,
                name: &def.name,
                body: self.renderer.render(&declarations),
                includes: profile.caps.enum_includes,
            });
        }
        for def in self.schema.structs() {
            let mapper = TypeMapper::new(profile, self.schema, &def.namespace);
            let declarations = StructEmitter::new(mapper, self.options).emit(def)?;
            units.push(Unit {
                namespace: &def.namespace,
                name: &def.name,
                body: self.renderer.render(&declarations),
                includes: true,
            });
        }
        Ok(units)
    }

    /// Render every output file.
    pub fn files(&self) -> Result<Vec<SourceFile>> {
        self.warn_unsupported();
        let assembler = FileAssembler::new(self.profile(), self.options);
        let units = self.units()?;
        if self.options.one_file {
            let body: String = units.iter().map(|unit| unit.body.as_str()).collect();
            let file = assembler.assemble(
                &self.schema.current_namespace,
                &self.schema.file_name,
                &body,
                true,
            );
            return Ok(file.into_iter().collect());
        }
        Ok(units
            .iter()
            .filter_map(|unit| assembler.assemble(unit.namespace, unit.name, &unit.body, unit.includes))
            .collect())
    }

    pub fn preview(&self) -> Result<Vec<PreviewFile>> {
        Ok(self
            .files()?
            .into_iter()
            .map(|file| PreviewFile {
                path: file.relative_path(),
                content: file.render(),
            })
            .collect())
    }

    /// Write every file below `output_dir`, skipping files whose content
    /// is unchanged.
    pub fn generate(&self, output_dir: &Path) -> eyre::Result<GenerateResult> {
        let files = self.files()?;
        let mut result = GenerateResult::default();
        for file in &files {
            match file.write(output_dir)? {
                WriteResult::Written => result.written.push(file.relative_path()),
                WriteResult::Unchanged => result.unchanged.push(file.relative_path()),
            }
        }
        info!(
            backend = self.profile().name,
            written = result.written.len(),
            unchanged = result.unchanged.len(),
            "generation finished"
        );
        Ok(result)
    }

    /// Paths of the files a run writes, without rendering them.
    pub fn output_paths(&self, output_dir: &Path) -> Vec<PathBuf> {
        let extension = self.profile().file_extension;
        let path = |namespace: &Namespace, name: &str| {
            namespace.dir(output_dir).join(format!("{name}.{extension}"))
        };
        if self.options.one_file {
            return vec![path(&self.schema.current_namespace, &self.schema.file_name)];
        }
        let enums = self.schema.enums().map(|def| path(&def.namespace, &def.name));
        let structs = self.schema.structs().map(|def| path(&def.namespace, &def.name));
        enums.chain(structs).collect()
    }

    pub fn make_rule(&self, output_dir: &Path) -> String {
        make_rule(&self.output_paths(output_dir), &self.schema.included_files)
    }

    fn warn_unsupported(&self) {
        let profile = self.profile();
        if self.options.gen_nullable && profile.nullable_annotation.is_none() {
            warn!(backend = profile.name, "gen_nullable has no effect on this backend");
        }
        if self.options.gen_generated && profile.generated_annotation.is_none() {
            warn!(backend = profile.name, "gen_generated has no effect on this backend");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        builder::ClassSpec,
        language::{CSHARP, JAVA},
        testing,
    };

    /// Bracket-style arrays and colon inheritance, enough to exercise the
    /// driver with either profile.
    struct PlainRenderer(&'static BackendProfile);

    impl Renderer for PlainRenderer {
        fn profile(&self) -> &BackendProfile {
            self.0
        }

        fn inheritance(&self, class: &ClassSpec) -> String {
            let parents: Vec<&str> = class
                .base
                .iter()
                .chain(&class.interfaces)
                .map(String::as_str)
                .collect();
            if parents.is_empty() {
                String::new()
            } else {
                format!(" : {}", parents.join(", "))
            }
        }

        fn array_type(&self, element: &str, rank: usize) -> String {
            format!("{element}{}", "[]".repeat(rank))
        }

        fn index(&self, recv: &str, indices: &[String]) -> String {
            format!("{recv}[{}]", indices.join("]["))
        }
    }

    fn generator<'a>(
        schema: &'a Schema,
        profile: &'static BackendProfile,
        options: &'a GenerateOptions,
    ) -> CodeGenerator<'a, PlainRenderer> {
        CodeGenerator::new(schema, PlainRenderer(profile), options)
    }

    #[test]
    fn test_one_file_per_definition() {
        let schema = testing::monster_schema();
        let options = GenerateOptions::default();
        let files = generator(&schema, &JAVA, &options).files().unwrap();
        let paths: Vec<String> = files.iter().map(SourceFile::relative_path).collect();
        assert_eq!(
            paths,
            [
                "Game/Color.java",
                "Game/Equipment.java",
                "Game/Vec3.java",
                "Game/Weapon.java",
                "Game/Monster.java"
            ]
        );
    }

    #[test]
    fn test_enum_includes_follow_backend() {
        let schema = testing::monster_schema();
        let options = GenerateOptions::default();

        let java = generator(&schema, &JAVA, &options).files().unwrap();
        assert!(!java[0].render().contains("import "));
        assert!(java[2].render().contains("import com.google.flatbuffers.*;"));

        let cs = generator(&schema, &CSHARP, &options).files().unwrap();
        assert!(cs[0].render().contains("using global::FlatBuffers;"));
    }

    #[test]
    fn test_one_file_mode() {
        let schema = testing::monster_schema();
        let options = GenerateOptions {
            one_file: true,
            ..GenerateOptions::default()
        };
        let files = generator(&schema, &CSHARP, &options).files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path(), "Game/monster.cs");
        let text = files[0].render();
        let color = text.find("enum Color").unwrap();
        let monster = text.find("struct Monster").unwrap();
        assert!(color < monster);
        assert_eq!(text.matches("namespace Game").count(), 1);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let schema = testing::monster_schema();
        let options = GenerateOptions::default();
        let dir = testing::scratch_dir().unwrap();
        let generator = generator(&schema, &CSHARP, &options);

        let first = generator.generate(dir.path()).unwrap();
        assert_eq!(first.written.len(), 5);
        assert!(dir.path().join("Game").join("Monster.cs").exists());

        let before = fs::read_to_string(dir.path().join("Game").join("Monster.cs")).unwrap();
        let second = generator.generate(dir.path()).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.total(), 5);
        let after = fs::read_to_string(dir.path().join("Game").join("Monster.cs")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_preview_matches_files() {
        let schema = testing::monster_schema();
        let options = GenerateOptions::default();
        let generator = generator(&schema, &JAVA, &options);
        let preview = generator.preview().unwrap();
        let files = generator.files().unwrap();
        assert_eq!(preview.len(), files.len());
        assert_eq!(preview[4].path, "Game/Monster.java");
        assert_eq!(preview[4].content, files[4].render());
    }

    #[test]
    fn test_make_rule_lists_outputs_and_includes() {
        let schema = testing::monster_schema();
        let options = GenerateOptions::default();
        let out = Path::new("out");
        let rule = generator(&schema, &JAVA, &options).make_rule(out);
        let first = out.join("Game").join("Color.java");
        let last = out.join("Game").join("Monster.java");
        assert!(rule.starts_with(&format!("{} ", first.display())));
        assert!(rule.ends_with(&format!("{}: monster.fbs weapon.fbs", last.display())));
    }

    #[test]
    fn test_make_rule_in_one_file_mode() {
        let schema = testing::monster_schema();
        let options = GenerateOptions {
            one_file: true,
            ..GenerateOptions::default()
        };
        let out = Path::new("out");
        let rule = generator(&schema, &CSHARP, &options).make_rule(out);
        let file = out.join("Game").join("monster.cs");
        assert_eq!(rule, format!("{}: monster.fbs weapon.fbs", file.display()));
    }

    #[test]
    fn test_failed_emission_writes_nothing() {
        let mut schema = testing::monster_schema();
        let mut broken = testing::table_def(
            "Broken",
            vec![("payload", fbgen_schema::Type::union("Game.Equipment"))],
        );
        broken.fields.push(fbgen_schema::FieldDef::new(
            "stats",
            fbgen_schema::Type::vector(fbgen_schema::Type::union("Game.Equipment")),
            testing::slot(1),
        ));
        schema.add_struct(broken);
        let options = GenerateOptions::default();
        let dir = testing::scratch_dir().unwrap();

        let result = generator(&schema, &CSHARP, &options).generate(dir.path());
        assert!(result.is_err());
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
