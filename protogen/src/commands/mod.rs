mod check;
mod completions;
mod generate;
mod list;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;
use protogen_codegen::WalkConfig;
use protogen_core::{ConfigFile, DEFAULT_GOFILE, WriteMode};

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, E>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "protogen")]
#[command(version)]
#[command(about = "Generate protobuf generator files for every Go package in a tree")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write proto_generator.go into every Go package directory
    Generate(GenerateCommand),

    /// Report packages whose generated file is missing or out of date
    Check(CheckCommand),

    /// List top-level declarations of every Go package
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Arguments shared by every command that walks a source tree.
#[derive(Args, Debug, Default)]
pub(crate) struct TreeArgs {
    /// Directories to walk (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Name of the generated file in each package directory
    #[arg(long, value_name = "NAME")]
    pub gofile: Option<String>,

    /// Only process the given directories, not their subdirectories
    #[arg(long)]
    pub no_recurse: bool,

    /// Directory name never descended into (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Path to protogen.toml (defaults to ./protogen.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl TreeArgs {
    pub fn roots(&self) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.dirs.clone()
        }
    }

    /// Read the configuration file and layer the command line on top.
    pub fn load_config(&self, mode: WriteMode, fail_fast: bool) -> WalkConfig {
        let file = ConfigFile::discover(self.config.as_deref()).unwrap_or_exit();
        self.walk_config(file, mode, fail_fast)
    }

    fn walk_config(&self, file: ConfigFile, mode: WriteMode, fail_fast: bool) -> WalkConfig {
        let gofile = self
            .gofile
            .clone()
            .or(file.gofile)
            .unwrap_or_else(|| DEFAULT_GOFILE.to_string());

        let mut exclude = file.exclude;
        exclude.extend(self.exclude.iter().cloned());

        WalkConfig {
            gofile,
            mode,
            recurse: !self.no_recurse && file.recurse.unwrap_or(true),
            fail_fast: fail_fast || file.fail_fast.unwrap_or(false),
            exclude,
        }
    }
}
