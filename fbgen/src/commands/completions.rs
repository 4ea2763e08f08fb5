use std::{fs::File, io, path::PathBuf};

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::{Context, Result};

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        match &self.out {
            Some(path) => {
                let mut file = File::create(path)
                    .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                self.write(&mut file);
                tracing::info!(shell = %self.shell, path = %path.display(), "wrote completions");
            }
            None => self.write(&mut io::stdout()),
        }
        Ok(())
    }

    fn write(&self, out: &mut dyn io::Write) {
        clap_complete::generate(self.shell, &mut Cli::command(), "fbgen", out);
    }
}
