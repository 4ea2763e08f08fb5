use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use fbgen_codegen::assemble::{binary_file_name, binary_make_rule, write_binary};
use fbgen_core::WriteResult;
use fbgen_schema::Schema;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct BinaryCommand {
    /// Resolved schema (JSON) carrying a precomputed root object
    #[arg(short, long)]
    schema: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Print the make rule of the binary instead of writing it
    #[arg(long)]
    deps: bool,
}

impl BinaryCommand {
    pub fn run(&self) -> Result<()> {
        let schema = Schema::open(&self.schema).unwrap_or_exit();

        if self.deps {
            let rule = binary_make_rule(&schema, &self.out);
            if !rule.is_empty() {
                println!("{rule}");
            }
            return Ok(());
        }

        let path = binary_file_name(&schema, &self.out);
        match write_binary(&schema, &self.out).wrap_err("Failed to write binary")? {
            Some(WriteResult::Written) => println!("Wrote {}", path.display()),
            Some(WriteResult::Unchanged) => println!("Unchanged {}", path.display()),
            None => tracing::warn!(schema = %self.schema.display(), "schema carries no buffer"),
        }
        Ok(())
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
        cmd: BinaryCommand,
    }

    fn run(args: &[&str]) {
        let mut argv = vec!["binary"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().cmd.run().unwrap();
    }

    #[test]
    fn test_writes_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("stats.json");
        fs::write(
            &schema,
            r#"{ "file_name": "stats", "file_extension": "sta", "buffer": [4, 0, 0, 0] }"#,
        )
        .unwrap();

        run(&[
            "--schema",
            schema.to_str().unwrap(),
            "--out",
            dir.path().to_str().unwrap(),
        ]);
        assert_eq!(fs::read(dir.path().join("stats.sta")).unwrap(), [4, 0, 0, 0]);
    }

    #[test]
    fn test_no_buffer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("stats.json");
        fs::write(&schema, r#"{ "file_name": "stats" }"#).unwrap();
        let out = dir.path().join("out");

        run(&[
            "--schema",
            schema.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ]);
        assert!(!out.join("stats.bin").exists());
    }
}
