//! # pcbuild-core: Pure Business Logic for PC Build
//!
//! This crate is the **heart** of PC Build. It holds the selection state and
//! the compatibility rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PC Build Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pcbuild CLI (apps/cli)                       │   │
//! │  │    Menu ──► Search ──► Select ──► Check ──► Show selection      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pcbuild-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │ selection │  │compatibility│  │ builder  │  │   │
//! │  │   │ Component │  │ Selection │  │  Verdict    │  │PcBuilder │  │   │
//! │  │   │ Category  │  │  slots    │  │  rules      │  │ session  │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ComponentCatalog trait                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 pcbuild-db (Catalog Layer)                      │   │
//! │  │              SQLite queries, migrations, CSV import             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Component sum type, categories, catalog records, watts
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for catalog records
//! - [`selection`] - The Selection Store (one slot per category)
//! - [`compatibility`] - The Compatibility Evaluator
//! - [`catalog`] - The catalog lookup capability the core consumes
//! - [`observer`] - Observability hook injected by the caller
//! - [`builder`] - Session object exposed to the presentation layer
//!
//! ## Example Usage
//!
//! ```rust
//! use pcbuild_core::compatibility::evaluate;
//! use pcbuild_core::{Category, Component, ComponentRecord, Selection};
//!
//! let cpu = ComponentRecord::new(1, "cpu", "Ryzen 5 5600X")
//!     .with_socket("AM4")
//!     .with_power(65);
//! let component = Component::from_record(&cpu).unwrap();
//!
//! let mut selection = Selection::new();
//! selection.select(Category::Cpu, component).unwrap();
//!
//! // Motherboard, RAM and PSU are still missing
//! assert!(!evaluate(&selection).is_compatible());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod catalog;
pub mod compatibility;
pub mod error;
pub mod money;
pub mod observer;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use builder::PcBuilder;
pub use catalog::{ComponentCatalog, SearchFilter};
pub use compatibility::{Verdict, VerdictKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use observer::{BuildObserver, NoopObserver};
pub use selection::{Selection, SelectionSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a component name, manufacturer or model.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a search term.
///
/// Longer terms are rejected before they reach the catalog.
pub const MAX_SEARCH_TERM_LEN: usize = 100;
