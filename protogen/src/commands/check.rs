use clap::Args;
use eyre::Result;
use protogen_core::WriteMode;

use super::{TreeArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub tree: TreeArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = self.tree.load_config(WriteMode::Check, false);
        let report = ops::check(&self.tree.roots(), config).unwrap_or_exit();

        report.render(&mut TerminalOutput::stdout());

        if !report.is_clean() {
            std::process::exit(1);
        }
        Ok(())
    }
}
