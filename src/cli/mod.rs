//! Command-line interface layer.
//!
//! Everything here is a thin shell over [`crate::core`]: argument parsing,
//! logging setup, file I/O and report printing.

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod logging;
pub mod report;

pub use args::{Arguments, BuildArgs, BuildCommand, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Build(cmd)) => {
            let summary = commands::build::build(cmd)?;
            report::print(&summary, verbose);
            Ok(summary.exit_status())
        }
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
