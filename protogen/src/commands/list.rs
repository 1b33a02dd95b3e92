use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use protogen_core::WriteMode;
use protogen_go::DeclarationKind;

use super::{TreeArgs, UnwrapOrExit};
use crate::{
    ops::{self, ListOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Declaration kind to list: type, func, var or const
    #[arg(short, long, default_value = "type")]
    pub kind: DeclarationKind,

    /// Include unexported names
    #[arg(long)]
    pub unexported: bool,

    /// Only plain struct types, as written into the generated file
    #[arg(long)]
    pub structs_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: Format,
}

impl ListCommand {
    /// Run the list command
    pub fn run(&self) -> Result<()> {
        let config = self.tree.load_config(WriteMode::Files, false);
        let options = ListOptions {
            kind: self.kind,
            unexported: self.unexported,
            structs_only: self.structs_only,
        };
        let report = ops::list(&self.tree.roots(), config, options).unwrap_or_exit();

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::stdout()),
            Format::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .wrap_err("Failed to serialize listing")?;
                println!("{}", json);
            }
        }

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
