//! # Catalog Database
//!
//! Opens the SQLite file holding the component catalog.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("~/.local/share/pcbuild/pcbuild.db")                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                            │
//! │       │  file:    WAL journal, synchronous NORMAL, busy timeout         │
//! │       │  memory:  one connection that never idles out                   │
//! │       │  then 001_components.sql if not applied yet                     │
//! │       ▼                                                                 │
//! │  db.components() ──► ComponentRepository (shares the pool)             │
//! │  import::import_csv(&db, path) ──► one transaction on the same pool     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is read far more often than it is written; WAL lets the
//! menu keep reading while an import commits.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::component::ComponentRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where and how to open the catalog.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created when missing. `:memory:` for a private
    /// in-memory catalog.
    pub database_path: PathBuf,

    /// Pool size. Forced to 1 for in-memory catalogs.
    pub max_connections: u32,

    /// How long a statement waits on a locked database.
    pub busy_timeout: Duration,

    /// Apply pending migrations on open.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// In-memory catalog, gone when the pool closes. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig::new(MEMORY_PATH).max_connections(1)
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_memory(&self) -> bool {
        self.database_path == Path::new(MEMORY_PATH)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle on the catalog pool. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the catalog and, unless disabled, migrates it.
    ///
    /// ## Errors
    /// - `ConnectionFailed`: the file cannot be opened or created
    /// - `MigrationFailed`: the schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening catalog database");

        let pool = if config.is_memory() {
            // Every connection to :memory: is a separate database, so the
            // single connection must outlive idle reaping.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(SqliteConnectOptions::new().in_memory(true))
                .await
        } else {
            let options = SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(config.busy_timeout);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await
        }
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = pool.options().get_max_connections(), "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// `(known, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Queries over the `components` table.
    pub fn components(&self) -> ComponentRepository {
        ComponentRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections, then closes the pool.
    pub async fn close(&self) {
        debug!("Closing catalog database");
        self.pool.close().await;
    }

    /// Whether the catalog answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM components")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
