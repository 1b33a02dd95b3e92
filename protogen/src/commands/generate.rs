use clap::Args;
use eyre::Result;
use protogen_core::{SharedStream, WriteMode};

use super::{TreeArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Print every generated file to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Stop at the first directory that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let mode = if self.stdout {
            WriteMode::Stream(SharedStream::stdout())
        } else {
            WriteMode::Files
        };
        let config = self.tree.load_config(mode, self.fail_fast);

        let report = ops::generate(&self.tree.roots(), config).unwrap_or_exit();

        // Generated code owns stdout while streaming
        let mut out = if self.stdout {
            TerminalOutput::stderr()
        } else {
            TerminalOutput::stdout()
        };
        report.render(&mut out);

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
