//! # pcbuild CLI Library
//!
//! Everything behind the `pcbuild` binary. `main.rs` only parses arguments,
//! loads configuration, starts logging and maps the [`Outcome`] to an exit
//! code.
//!
//! ## Module Organization
//! ```text
//! pcbuild_cli/
//! ├── lib.rs          ◄─── You are here (App + run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── config.toml + PCBUILD_* environment
//! ├── logging.rs      ◄─── tracing subscriber setup
//! ├── catalog.rs      ◄─── DbCatalog: sync catalog over the async repository
//! ├── observer.rs     ◄─── TracingObserver: builder events → tracing
//! ├── menu.rs         ◄─── Interactive text menu
//! ├── render.rs       ◄─── Plain-text output lines
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   ├── import.rs   ◄─── pcbuild import
//! │   ├── search.rs   ◄─── pcbuild search
//! │   └── check.rs    ◄─── pcbuild check
//! └── error.rs        ◄─── AppError + ErrorCode
//! ```
//!
//! ## Runtime Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App                                                                    │
//! │  ├── Runtime   (tokio, multi-thread)  ◄── created once at startup       │
//! │  ├── Database  (sqlx pool)            ◄── opened on that runtime        │
//! │  └── AppConfig                                                          │
//! │                                                                         │
//! │  The menu and the core stay synchronous. Database calls cross into      │
//! │  the runtime through App::block_on or DbCatalog.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod observer;
pub mod render;

use std::future::Future;
use std::io;

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use pcbuild_core::PcBuilder;
use pcbuild_db::{import, Database, DbConfig, ImportReport};

use crate::catalog::DbCatalog;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::observer::TracingObserver;

/// How a successful run ended. Mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0.
    Success,
    /// `check` found the build incompatible. Exit 2.
    Incompatible,
}

/// Opened application: runtime, database and configuration.
pub struct App {
    // Declared before `runtime` so the pool is dropped while it is alive.
    db: Database,
    runtime: Runtime,
    config: AppConfig,
}

impl App {
    /// Opens the database named by `config`, running migrations.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let path = config.resolved_database_path()?;
        info!(db_path = %path.display(), "Database path determined");
        Self::open_with(config, DbConfig::new(path))
    }

    /// Opens with an explicit database configuration.
    pub fn open_with(config: AppConfig, db_config: DbConfig) -> AppResult<Self> {
        let runtime = Builder::new_multi_thread().enable_all().build()?;
        let db = runtime.block_on(Database::new(db_config))?;

        Ok(App {
            db,
            runtime,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs a database future to completion on the app runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Synchronous catalog view for the core.
    pub fn catalog(&self) -> DbCatalog {
        DbCatalog::new(
            self.runtime.handle().clone(),
            &self.db,
            self.config.search_limit,
        )
    }

    /// A fresh builder session that logs through `tracing`.
    pub fn builder(&self) -> PcBuilder<DbCatalog> {
        PcBuilder::new(self.catalog()).with_observer(TracingObserver)
    }

    /// Imports `catalog_csv` when the database holds no components.
    pub fn ensure_catalog(&self) -> AppResult<Option<ImportReport>> {
        let report = self.block_on(import::import_if_empty(&self.db, &self.config.catalog_csv))?;
        Ok(report)
    }

    /// Closes the pool, waiting for connections to finish.
    pub fn close(self) {
        self.runtime.block_on(self.db.close());
    }
}

/// Opens the app and runs `command`, writing to stdout.
///
/// Every command except `import` first loads the configured catalog file
/// into an empty database.
pub fn run(command: Command, config: AppConfig) -> AppResult<Outcome> {
    let app = App::open(config)?;

    if !matches!(command, Command::Import { .. }) {
        if let Some(report) = app.ensure_catalog()? {
            info!(imported = report.imported, source = %report.source, "Catalog loaded");
        }
    }

    let stdout = io::stdout();
    let outcome = commands::dispatch(&app, command, &mut stdout.lock());
    app.close();
    outcome
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pcbuild_core::ComponentRecord;
    use std::io::Write;

    /// App over an empty in-memory database.
    pub fn memory_app() -> App {
        App::open_with(AppConfig::default(), DbConfig::in_memory()).unwrap()
    }

    /// App with a small compatible-by-default catalog.
    ///
    /// | id | type        | name               | notes               |
    /// |----|-------------|--------------------|---------------------|
    /// | 1  | cpu         | Ryzen 5 5600X      | AM4, 65W, $199.99   |
    /// | 2  | cpu         | Core i5-12400F     | LGA1700, 65W        |
    /// | 3  | motherboard | B550 Tomahawk      | AM4, DDR4, $29.99   |
    /// | 4  | ram         | Vengeance LPX 16GB | DDR4, 10W, $20.00   |
    /// | 5  | psu         | CX650              | 650W, $89.00        |
    /// | 6  | gpu         | RTX 3060           | 170W, $329.00       |
    pub fn seeded_app() -> App {
        let app = memory_app();
        let records = [
            ComponentRecord::new(1, "cpu", "Ryzen 5 5600X")
                .with_manufacturer("AMD")
                .with_socket("AM4")
                .with_power(65)
                .with_price_cents(19999),
            ComponentRecord::new(2, "cpu", "Core i5-12400F")
                .with_manufacturer("Intel")
                .with_socket("LGA1700")
                .with_power(65)
                .with_price_cents(14999),
            ComponentRecord::new(3, "motherboard", "B550 Tomahawk")
                .with_manufacturer("MSI")
                .with_socket("AM4")
                .with_memory_type("DDR4")
                .with_power(0)
                .with_price_cents(2999),
            ComponentRecord::new(4, "ram", "Vengeance LPX 16GB")
                .with_manufacturer("Corsair")
                .with_memory_type("DDR4")
                .with_power(10)
                .with_price_cents(2000),
            ComponentRecord::new(5, "psu", "CX650")
                .with_manufacturer("Corsair")
                .with_power(650)
                .with_price_cents(8900),
            ComponentRecord::new(6, "gpu", "RTX 3060")
                .with_manufacturer("NVIDIA")
                .with_power(170)
                .with_price_cents(32900),
        ];

        let repo = app.database().components();
        for record in &records {
            app.block_on(repo.insert(record)).unwrap();
        }
        app
    }

    pub fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_ensure_catalog_imports_once() {
        let file = write_csv(
            "id,type,name,manufacturer,model,socket,memory_type,power,price\n\
             1,gpu,RTX 3060,NVIDIA,,,,170,329\n",
        );
        let config = AppConfig {
            catalog_csv: file.path().to_path_buf(),
            ..AppConfig::default()
        };
        let app = App::open_with(config, DbConfig::in_memory()).unwrap();

        let first = app.ensure_catalog().unwrap();
        let second = app.ensure_catalog().unwrap();

        assert_eq!(first.map(|r| r.imported), Some(1));
        assert!(second.is_none());
    }

    #[test]
    fn test_ensure_catalog_without_file() {
        let config = AppConfig {
            catalog_csv: "/no/such/components.csv".into(),
            ..AppConfig::default()
        };
        let app = App::open_with(config, DbConfig::in_memory()).unwrap();

        assert!(app.ensure_catalog().unwrap().is_none());
        assert_eq!(app.block_on(app.database().components().count()).unwrap(), 0);
    }

    #[test]
    fn test_builder_session_over_seeded_catalog() {
        let app = seeded_app();
        let mut builder = app.builder();

        for (slot, id) in [("cpu", 1), ("motherboard", 3), ("ram", 4), ("psu", 5)] {
            builder.select(slot, id).unwrap();
        }

        assert!(builder.evaluate_compatibility().is_compatible());
    }
}
