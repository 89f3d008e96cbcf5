//! Corral CLI - command dispatch for directories of scripts

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = corral_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
