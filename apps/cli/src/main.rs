//! # pcbuild Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments (clap)
//! 2. Load configuration (file, then `PCBUILD_*`, then `--db`)
//! 3. Initialize tracing
//! 4. Open the database and run the command (see `pcbuild_cli::run`)
//!
//! ## Exit Codes
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | Error (bad input, database, config, I/O) |
//! | 2    | `check` found the build incompatible     |

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pcbuild_cli::cli::{Cli, Command};
use pcbuild_cli::config::AppConfig;
use pcbuild_cli::logging::init_tracing;
use pcbuild_cli::Outcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so config errors go straight to stderr
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose, config.log_filter.as_deref());

    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    let command = cli.command.unwrap_or(Command::Interactive);
    match pcbuild_cli::run(command, config) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Incompatible) => ExitCode::from(2),
        Err(err) => {
            error!(code = ?err.code(), error = %err, "Command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
