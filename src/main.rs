//! Skysphere - celestial sphere and sun path visualizations.

use std::process::ExitCode;

use clap::Parser;

use skysphere::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
