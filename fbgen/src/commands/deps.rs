use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::args::{OptionArgs, Target};

#[derive(Args)]
pub struct DepsCommand {
    #[command(flatten)]
    target: Target,

    /// Output directory the rule's targets live in
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    options: OptionArgs,
}

impl DepsCommand {
    /// Print `<outputs>: <includes>` for build tools.
    pub fn run(&self) -> Result<()> {
        let schema = self.target.load();
        let options = self.options.resolve()?;
        let generator = self.target.lang.generator(&schema, &options);
        println!("{}", generator.make_rule(&self.out));
        Ok(())
    }
}
