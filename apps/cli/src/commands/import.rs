//! `pcbuild import <csv>`: loads a catalog file in one transaction.

use std::io::Write;
use std::path::Path;

use pcbuild_db::import;
use tracing::info;

use crate::error::AppResult;
use crate::render;
use crate::{App, Outcome};

/// Imports `csv` into the database, all rows or none.
///
/// Rows whose id is already present abort the import with a row error.
pub fn run(app: &App, csv: &Path, out: &mut impl Write) -> AppResult<Outcome> {
    let report = app.block_on(import::import_csv(app.database(), csv))?;

    info!(
        imported = report.imported,
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Import finished"
    );
    writeln!(out, "{}", render::import_summary(&report))?;
    Ok(Outcome::Success)
}
