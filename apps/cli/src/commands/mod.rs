//! # Commands Module
//!
//! One module per subcommand. Each takes the opened [`App`] and a writer
//! for its stdout output.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── import.rs   ◄─── pcbuild import <csv>
//! ├── search.rs   ◄─── pcbuild search [--category] [--term] [--manufacturer]
//! └── check.rs    ◄─── pcbuild check --cpu .. --psu .. [--json]
//!
//! pcbuild / pcbuild interactive ──► crate::menu::Menu
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs                                                                │
//! │     │  Cli::parse(), AppConfig::load(), init_tracing()                  │
//! │     ▼                                                                   │
//! │  crate::run(command, config)                                            │
//! │     │  App::open() ──► Database::new() + migrations                    │
//! │     │  ensure_catalog() unless the command is `import`                  │
//! │     ▼                                                                   │
//! │  commands::dispatch(&app, command, stdout)                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Outcome::Success | Outcome::Incompatible | AppError                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod check;
pub mod import;
pub mod search;

use std::io::{self, Write};

use crate::cli::Command;
use crate::error::AppResult;
use crate::menu::Menu;
use crate::{App, Outcome};

/// Runs `command` against an opened app.
pub fn dispatch(app: &App, command: Command, out: &mut impl Write) -> AppResult<Outcome> {
    match command {
        Command::Interactive => {
            let stdin = io::stdin();
            let mut menu = Menu::new(app.builder(), stdin.lock(), out);
            menu.run()?;
            Ok(Outcome::Success)
        }
        Command::Import { csv } => import::run(app, &csv, out),
        Command::Search(args) => search::run(app, &args, out),
        Command::Check(args) => check::run(app, &args, out),
    }
}
