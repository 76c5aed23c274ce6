use std::process::ExitCode;

use clap::Parser;
use i18n_inline::cli::{Arguments, ExitStatus, logging::init_tracing, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
