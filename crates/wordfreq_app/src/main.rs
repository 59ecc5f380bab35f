mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use wordfreq_core::FreqError;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    wordfreq_logging::initialize(wordfreq_logging::level_for_verbosity(
        cli.verbose,
        cli.quiet,
    ));

    match commands::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<FreqError>())
                .map_or("error", FreqError::kind);
            eprintln!("wordfreq: {kind}: {err:#}");
            ExitCode::FAILURE
        }
    }
}
