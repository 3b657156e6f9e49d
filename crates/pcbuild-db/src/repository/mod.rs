//! # Repository Module
//!
//! Database repository implementations for the component catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI / catalog adapter                                                 │
//! │       │                                                                 │
//! │       │  db.components().search(&filter, 50)                           │
//! │       ▼                                                                 │
//! │  ComponentRepository                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── search(&self, filter, limit)                                      │
//! │  ├── insert(&self, record)                                             │
//! │  ├── count(&self)                                                      │
//! │  └── manufacturers(&self, category)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ComponentRepository`](component::ComponentRepository) - Catalog lookup and search

pub mod component;
