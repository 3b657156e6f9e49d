//! # Component Repository
//!
//! Database operations for catalog components.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  SearchFilter { category: cpu, term: "5600", manufacturer: "AMD" }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  type = 'cpu'                                   (unset → no condition)  │
//! │  AND (name LIKE '%5600%' OR model LIKE '%5600%')                       │
//! │  AND manufacturer = 'AMD'                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY id, LIMIT n                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `%` and `_` typed by the user match literally; they are escaped before
//! the term reaches `LIKE`.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pcbuild_core::{Category, ComponentId, ComponentRecord, SearchFilter};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        type,
        name,
        manufacturer,
        model,
        socket,
        memory_type,
        power_mw,
        price_cents
    FROM components
"#;

/// Repository for component database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.components();
///
/// let cpus = repo.search(&SearchFilter::new().category(Category::Cpu), 50).await?;
/// let one = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ComponentRepository {
    pool: SqlitePool,
}

impl ComponentRepository {
    /// Creates a new ComponentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ComponentRepository { pool }
    }

    /// Gets a component by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Component found
    /// * `Ok(None)` - No component with this id
    pub async fn get_by_id(&self, id: ComponentId) -> DbResult<Option<ComponentRecord>> {
        debug!(id, "Fetching component");

        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let record = sqlx::query_as::<_, ComponentRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if record.is_none() {
            debug!(id, "Component not found");
        }
        Ok(record)
    }

    /// Returns components matching every criterion set in `filter`,
    /// ordered by id, at most `limit` rows.
    pub async fn search(&self, filter: &SearchFilter, limit: u32) -> DbResult<Vec<ComponentRecord>> {
        debug!(
            category = ?filter.category,
            term = ?filter.term,
            manufacturer = ?filter.manufacturer,
            limit,
            "Searching components"
        );

        let pattern = filter
            .term
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)));

        let sql = format!(
            r#"{SELECT_COLUMNS}
            WHERE (?1 IS NULL OR type = ?1)
              AND (?2 IS NULL OR name LIKE ?2 ESCAPE '\' OR model LIKE ?2 ESCAPE '\')
              AND (?3 IS NULL OR manufacturer = ?3)
            ORDER BY id
            LIMIT ?4
            "#
        );

        let records = sqlx::query_as::<_, ComponentRecord>(&sql)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(pattern)
            .bind(filter.manufacturer.as_deref())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Search returned components");
        Ok(records)
    }

    /// Inserts a component.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - id already exists
    pub async fn insert(&self, record: &ComponentRecord) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_record(&mut conn, record).await
    }

    /// Total number of components in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Distinct non-empty manufacturers, alphabetically, optionally within
    /// one category.
    pub async fn manufacturers(&self, category: Option<Category>) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT manufacturer
            FROM components
            WHERE manufacturer <> ''
              AND (?1 IS NULL OR type = ?1)
            ORDER BY manufacturer
            "#,
        )
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

/// Inserts one record on an existing connection or transaction.
pub(crate) async fn insert_record(
    conn: &mut SqliteConnection,
    record: &ComponentRecord,
) -> DbResult<()> {
    debug!(id = record.id, name = %record.name, "Inserting component");

    sqlx::query(
        r#"
        INSERT INTO components (
            id, type, name, manufacturer, model,
            socket, memory_type, power_mw, price_cents, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )
    .bind(record.id)
    .bind(&record.category)
    .bind(&record.name)
    .bind(&record.manufacturer)
    .bind(&record.model)
    .bind(record.socket.as_deref())
    .bind(record.memory_type.as_deref())
    .bind(record.power_mw)
    .bind(record.price_cents)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await
    .map_err(|err| match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, record.id),
        other => other,
    })?;

    Ok(())
}

/// Escapes `LIKE` wildcards so they match literally (escape char `\`).
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
