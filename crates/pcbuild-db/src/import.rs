//! # Catalog Import
//!
//! Loads a component catalog from CSV into the `components` table.
//!
//! ## File Format
//! ```text
//! id,type,name,manufacturer,model,socket,memory_type,power,price
//! 1,cpu,Ryzen 5 5600X,AMD,100-100000065BOX,AM4,,65,199.99
//! 2,psu,CX650,Corsair,CP-9020278,,,650,89.00
//! ```
//! Empty cells are NULL. `power` is watts and may carry decimals; it is
//! stored as milliwatts. `price` is in currency units and stored as cents.
//!
//! ## All Or Nothing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    row 1 ── parse ── validate ── INSERT ✓                               │
//! │    row 2 ── parse ── validate ── INSERT ✓                               │
//! │    row 3 ── parse ✗ (or invalid, or duplicate id)                       │
//! │  ROLLBACK ──► DbError::ImportRow { row: 3, .. }                         │
//! │               DbError::Csv for unreadable or ragged input               │
//! │                                                                         │
//! │  every row ok ──► COMMIT ──► ImportReport                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Each row must describe a selectable component (a cpu needs a socket, a
//! psu needs its capacity, ...), so nothing enters the catalog that would
//! later be rejected as malformed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::component::insert_record;
use pcbuild_core::validation::validate_component_id;
use pcbuild_core::{Category, Component, ComponentRecord, Watts};

/// Summary of a successful import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    /// Where the rows came from (file path or a caller-supplied label).
    pub source: String,

    /// Number of rows stored.
    pub imported: usize,

    /// Rows stored per category.
    pub by_category: BTreeMap<Category, usize>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// One CSV line as written in the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: i64,
    #[serde(rename = "type")]
    category: String,
    name: String,
    manufacturer: Option<String>,
    model: Option<String>,
    socket: Option<String>,
    memory_type: Option<String>,
    power: Option<f64>,
    price: Option<f64>,
}

impl CsvRow {
    fn into_record(self) -> Result<ComponentRecord, String> {
        validate_component_id(self.id).map_err(|e| e.to_string())?;

        let power_mw = self.power.map(scale_milliwatts).transpose()?;
        let price_cents = self.price.map(round_cents).transpose()?.unwrap_or(0);

        Ok(ComponentRecord {
            id: self.id,
            category: self.category,
            name: self.name,
            manufacturer: self.manufacturer.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            socket: self.socket,
            memory_type: self.memory_type,
            power_mw,
            price_cents,
        })
    }
}

fn scale_milliwatts(value: f64) -> Result<i64, String> {
    Watts::from_watts_f64(value)
        .and_then(|watts| i64::try_from(watts.milliwatts()).ok())
        .ok_or_else(|| format!("power must be a non-negative number of watts, got {value}"))
}

fn round_cents(value: f64) -> Result<i64, String> {
    // Keeps value * 100 inside f64's exact integer range
    if !value.is_finite() || value < 0.0 || value > 1e12 {
        return Err(format!("price must be a non-negative amount, got {value}"));
    }
    Ok((value * 100.0).round() as i64)
}

/// Imports the catalog file at `path`.
pub async fn import_csv(db: &Database, path: impl AsRef<Path>) -> DbResult<ImportReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DbError::Io {
        path: path.display().to_string(),
        source,
    })?;

    import_reader(db, file, path.display().to_string()).await
}

/// Imports catalog rows from any reader. `source` only labels the report.
pub async fn import_reader<R: Read>(
    db: &Database,
    reader: R,
    source: impl Into<String>,
) -> DbResult<ImportReport> {
    let source = source.into();
    let started_at = Utc::now();
    info!(source = %source, "Importing component catalog");

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.headers()?;

    let mut tx = db.pool().begin().await?;
    let mut by_category: BTreeMap<Category, usize> = BTreeMap::new();
    let mut imported = 0usize;

    for (index, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row_number = index as u64 + 1;

        let row = match row {
            Ok(row) => row,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                return Err(DbError::import_row(row_number, err.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let record = row
            .into_record()
            .map_err(|message| DbError::import_row(row_number, message))?;

        let component = Component::from_record(&record)
            .map_err(|e| DbError::import_row(row_number, e.to_string()))?;

        insert_record(&mut tx, &record).await.map_err(|e| match e {
            DbError::UniqueViolation { .. } => {
                DbError::import_row(row_number, format!("duplicate id {}", record.id))
            }
            other => DbError::import_row(row_number, other.to_string()),
        })?;

        *by_category.entry(component.category()).or_default() += 1;
        imported += 1;
    }

    // Dropping `tx` on any early return above rolls the import back
    tx.commit().await?;

    let report = ImportReport {
        source,
        imported,
        by_category,
        started_at,
        finished_at: Utc::now(),
    };
    info!(
        source = %report.source,
        imported = report.imported,
        "Catalog import committed"
    );
    Ok(report)
}

/// Imports `path` only when the catalog is empty and the file exists.
///
/// ## Returns
/// * `Ok(Some(report))` - The file was imported
/// * `Ok(None)` - Catalog already populated, or no such file
pub async fn import_if_empty(db: &Database, path: impl AsRef<Path>) -> DbResult<Option<ImportReport>> {
    let path = path.as_ref();

    let existing = db.components().count().await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping import");
        return Ok(None);
    }

    if !path.exists() {
        warn!(path = %path.display(), "Catalog is empty and no catalog file was found");
        return Ok(None);
    }

    import_csv(db, path).await.map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================
