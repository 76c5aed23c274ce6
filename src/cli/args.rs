//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Inline translations into the source tree and write it to `outDir`
//! - `init`: Initialize the `.i18nrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Localization JSON file (overrides config file)
    #[arg(long)]
    pub locale: Option<PathBuf>,

    /// Plural localization JSON file (overrides config file)
    #[arg(long)]
    pub plural_locale: Option<PathBuf>,

    /// Output directory (overrides config file)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Report missing translations as errors
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Only report diagnostics, do not write any output
    #[arg(long)]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub args: BuildArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace translate calls with their localized strings
    Build(BuildCommand),
    /// Initialize a new .i18nrc.json configuration file
    Init,
}
