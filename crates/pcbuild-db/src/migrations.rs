//! # Catalog Schema Migrations
//!
//! The schema ships inside the binary via `sqlx::migrate!`, so a fresh
//! `pcbuild.db` needs nothing but the executable.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_components.sql   components table, type/manufacturer indexes
//!
//! Database::new ──► MIGRATOR.run ──► _sqlx_migrations bookkeeping
//! ```
//!
//! Applied files are checksummed by sqlx: edit nothing that has shipped,
//! add `NNN_description.sql` instead.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration not yet recorded.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let (known, applied) = migration_status(pool).await?;
    if applied >= known {
        debug!(known, "Catalog schema up to date");
        return Ok(());
    }

    info!(pending = known - applied, "Applying catalog migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// `(known, applied)`: migrations embedded in the binary, and those
/// recorded in the database. A never-migrated database reports 0 applied;
/// any other failure is returned.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let known = MIGRATOR.iter().count();

    let applied: i64 = match sqlx::query_scalar(
        "SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1",
    )
    .fetch_one(pool)
    .await
    {
        Ok(count) => count,
        Err(sqlx::Error::Database(err)) if err.message().contains("no such table") => 0,
        Err(err) => return Err(err.into()),
    };

    Ok((known, usize::try_from(applied).unwrap_or_default()))
}
