mod args;
mod binary;
mod completions;
mod deps;
mod generate;

use binary::BinaryCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use deps::DepsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on schema errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for fbgen_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "fbgen")]
#[command(version)]
#[command(about = "Generate FlatBuffers accessors for Java and C# from a resolved schema")]
pub(crate) struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Deps(cmd) => cmd.run(),
            Commands::Binary(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate accessor sources from a schema
    Generate(GenerateCommand),

    /// Print the make rule of the generated sources
    Deps(DepsCommand),

    /// Write the schema's precomputed root object
    Binary(BinaryCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
