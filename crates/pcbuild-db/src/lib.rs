//! # pcbuild-db: Catalog Store for PC Build
//!
//! SQLite storage for the component catalog, with sqlx for async access
//! and a CSV importer for loading catalog files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PC Build Data Flow                               │
//! │                                                                         │
//! │  pcbuild CLI (menu, search, check, import)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pcbuild-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (component.rs)│    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ComponentRepo │    │ 001_compon.. │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────┴───────┐                                             │   │
//! │  │   │  import.rs    │  CSV ──► one transaction ──► components     │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/pcbuild.db                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Component repository
//! - [`import`] - CSV catalog import
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pcbuild_db::{import, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pcbuild.db")).await?;
//! import::import_if_empty(&db, "data/components.csv").await?;
//!
//! let gpus = db.components().search(&SearchFilter::new().category(Category::Gpu), 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod import;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use import::ImportReport;
pub use pool::{Database, DbConfig};
pub use repository::component::ComponentRepository;
