//! # Database Catalog
//!
//! Adapts the async `ComponentRepository` to the synchronous
//! `ComponentCatalog` trait the core consumes.
//!
//! ## Runtime Bridge
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PcBuilder::select (sync)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbCatalog::find_by_id                                                  │
//! │       │  handle.block_on(repo.get_by_id(id))                            │
//! │       ▼                                                                 │
//! │  tokio runtime owned by the CLI ──► sqlx ──► SQLite                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Must not be called from inside an async task; the CLI never does.

use tokio::runtime::Handle;

use pcbuild_core::{ComponentCatalog, ComponentId, ComponentRecord, SearchFilter};
use pcbuild_db::{ComponentRepository, Database, DbError};

/// Catalog backed by the SQLite component table.
#[derive(Debug, Clone)]
pub struct DbCatalog {
    handle: Handle,
    components: ComponentRepository,
    search_limit: u32,
}

impl DbCatalog {
    /// Creates a catalog over `db`; `handle` must belong to a live runtime.
    pub fn new(handle: Handle, db: &Database, search_limit: u32) -> Self {
        DbCatalog {
            handle,
            components: db.components(),
            search_limit,
        }
    }

    /// Distinct manufacturers, optionally within one category.
    pub fn manufacturers(
        &self,
        category: Option<pcbuild_core::Category>,
    ) -> Result<Vec<String>, DbError> {
        self.handle.block_on(self.components.manufacturers(category))
    }
}

impl ComponentCatalog for DbCatalog {
    type Error = DbError;

    fn find_by_id(&self, id: ComponentId) -> Result<Option<ComponentRecord>, DbError> {
        self.handle.block_on(self.components.get_by_id(id))
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<ComponentRecord>, DbError> {
        self.handle
            .block_on(self.components.search(filter, self.search_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbuild_core::{Category, CoreError, PcBuilder};
    use pcbuild_db::DbConfig;
    use tokio::runtime::Runtime;

    fn catalog(runtime: &Runtime) -> DbCatalog {
        let db = runtime
            .block_on(async {
                let db = Database::new(DbConfig::in_memory()).await?;
                let repo = db.components();
                repo.insert(
                    &ComponentRecord::new(1, "cpu", "Ryzen 5 5600X")
                        .with_manufacturer("AMD")
                        .with_socket("AM4")
                        .with_power(65),
                )
                .await?;
                repo.insert(
                    &ComponentRecord::new(2, "gpu", "RTX 3060")
                        .with_manufacturer("NVIDIA")
                        .with_power(170),
                )
                .await?;
                Ok::<_, DbError>(db)
            })
            .unwrap();

        DbCatalog::new(runtime.handle().clone(), &db, 1)
    }

    #[test]
    fn test_builder_over_database() {
        let runtime = Runtime::new().unwrap();
        let mut builder = PcBuilder::new(catalog(&runtime));

        let cpu = builder.select("cpu", 1).unwrap();
        assert_eq!(cpu.name(), "Ryzen 5 5600X");

        let err = builder.select("cpu", 9999).unwrap_err();
        assert!(matches!(err, CoreError::ComponentNotFound(9999)));
        assert_eq!(builder.selection().cpu().unwrap().info.id, 1);
    }

    #[test]
    fn test_search_applies_limit() {
        let runtime = Runtime::new().unwrap();
        let catalog = catalog(&runtime);

        let all = catalog.search(&SearchFilter::new()).unwrap();
        assert_eq!(all.len(), 1);

        let gpus = catalog
            .search(&SearchFilter::new().category(Category::Gpu))
            .unwrap();
        assert_eq!(gpus[0].id, 2);
    }

    #[test]
    fn test_manufacturers() {
        let runtime = Runtime::new().unwrap();
        let catalog = catalog(&runtime);

        assert_eq!(catalog.manufacturers(None).unwrap(), vec!["AMD", "NVIDIA"]);
    }
}
