use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use fbgen_codegen::language::{GenerateResult, LanguageCodegen};

use super::args::{OptionArgs, Target};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    target: Target,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    options: OptionArgs,

    /// Preview generated code without writing to disk
    #[arg(long)]
    dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let schema = self.target.load();
        let options = self.options.resolve()?;
        let generator = self.target.lang.generator(&schema, &options);

        if self.dry_run {
            self.run_preview(generator.as_ref())
        } else {
            let result = generator
                .generate(&self.out)
                .wrap_err("Failed to generate code")?;
            self.report(generator.language(), &result);
            Ok(())
        }
    }

    fn run_preview(&self, generator: &dyn LanguageCodegen) -> Result<()> {
        let files = generator.preview().wrap_err("Failed to generate code")?;

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }

    fn report(&self, language: &str, result: &GenerateResult) {
        println!("Generated {language}: {}", self.out.display());
        for path in &result.written {
            println!("  + {path}");
        }
        if !result.unchanged.is_empty() {
            println!("  {} unchanged", result.unchanged.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        cmd: GenerateCommand,
    }

    const SCHEMA: &str = r#"{
      "file_name": "stats",
      "current_namespace": ["Game"],
      "structs": [
        {
          "name": "Stat",
          "namespace": ["Game"],
          "fixed": false,
          "bytesize": 0,
          "minalign": 1,
          "fields": [
            { "name": "id", "type": { "kind": "string" }, "offset": 4 },
            { "name": "val", "type": { "kind": "scalar", "scalar": "long" }, "offset": 6 }
          ]
        }
      ]
    }"#;

    #[test]
    fn test_generates_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("stats.json");
        fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("gen");

        let harness = Harness::try_parse_from([
            "generate",
            "--schema",
            schema.to_str().unwrap(),
            "--lang",
            "java",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        harness.cmd.run().unwrap();

        let stat = fs::read_to_string(out.join("Game").join("Stat.java")).unwrap();
        assert!(stat.contains("public final class Stat extends Table {"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("stats.json");
        fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("gen");

        let harness = Harness::try_parse_from([
            "generate",
            "--schema",
            schema.to_str().unwrap(),
            "--lang",
            "csharp",
            "--out",
            out.to_str().unwrap(),
            "--dry-run",
        ])
        .unwrap();
        harness.cmd.run().unwrap();
        assert!(!out.exists());
    }
}
