//! `taskgate` — validate and inspect task-control service configuration

use clap::Parser;

use taskgate::cli::args::Cli;
use taskgate::cli::commands;
use taskgate::error::ExitCode;
use taskgate::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
