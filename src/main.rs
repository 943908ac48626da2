//! `calci` binary: opens the keypad, or evaluates `--eval` keys headlessly.

use calci::{logging, App, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    let _guard = match logging::init_logging(&config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("calci: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match config.eval.as_deref() {
        Some(keys) => calci::evaluate(keys, config.chain).map(|display| println!("{display}")),
        None => App::new(&config).and_then(App::run),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            eprintln!("calci: {e}");
            ExitCode::FAILURE
        }
    }
}
