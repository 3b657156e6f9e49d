//! # Builder Session
//!
//! [`PcBuilder`] is what the presentation layer talks to. It owns one
//! Selection Store and consults a catalog when a component is selected.
//!
//! ## Select Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select("cpu", 42)                                                      │
//! │       │                                                                 │
//! │       ├── parse "cpu" ─────────── unknown key? ──► InvalidCategory      │
//! │       │                                                                 │
//! │       ├── catalog.find_by_id(42) ─ none? ────────► ComponentNotFound    │
//! │       │                         └─ failed? ──────► Catalog              │
//! │       │                                                                 │
//! │       ├── Component::from_record ─ bad row? ─────► MalformedComponent.. │
//! │       │                                                                 │
//! │       └── selection.select(cpu, ..) ─ not a cpu? ► TypeMismatch         │
//! │                                                                         │
//! │  Any error: observer.selection_rejected, selection unchanged            │
//! │  Success:   observer.component_selected, slot overwritten               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each session is independent. Nothing is shared between two builders
//! except, possibly, a read-only catalog.

use crate::catalog::ComponentCatalog;
use crate::compatibility::{evaluate_with, Verdict};
use crate::error::{CoreError, CoreResult};
use crate::observer::{BuildObserver, NoopObserver};
use crate::selection::{Selection, SelectionSnapshot};
use crate::types::{Category, Component, ComponentId};

/// A single build session.
pub struct PcBuilder<C> {
    catalog: C,
    selection: Selection,
    observer: Box<dyn BuildObserver>,
}

impl<C: ComponentCatalog> PcBuilder<C> {
    /// Starts a session with an empty selection.
    pub fn new(catalog: C) -> Self {
        PcBuilder {
            catalog,
            selection: Selection::new(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Installs an observer for selections and evaluations.
    pub fn with_observer(mut self, observer: impl BuildObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// The catalog this session reads from.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Read access to the Selection Store.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects component `id` for the slot named by `category`.
    ///
    /// ## Errors
    /// `InvalidCategory` (before any lookup), `ComponentNotFound`,
    /// `MalformedComponentRecord`, `TypeMismatch`, `Catalog`. The previous
    /// value of the slot is kept on every error.
    pub fn select(&mut self, category: &str, id: ComponentId) -> CoreResult<Component> {
        let slot = match category.parse::<Category>() {
            Ok(slot) => slot,
            Err(err) => {
                self.observer.selection_rejected(None, &err);
                return Err(err);
            }
        };

        self.select_slot(slot, id)
    }

    /// Selects component `id` for an already-parsed slot.
    pub fn select_slot(&mut self, slot: Category, id: ComponentId) -> CoreResult<Component> {
        match self.lookup_and_store(slot, id) {
            Ok(component) => {
                self.observer.component_selected(slot, &component);
                Ok(component)
            }
            Err(err) => {
                self.observer.selection_rejected(Some(slot), &err);
                Err(err)
            }
        }
    }

    fn lookup_and_store(&mut self, slot: Category, id: ComponentId) -> CoreResult<Component> {
        let record = self
            .catalog
            .find_by_id(id)
            .map_err(CoreError::catalog)?
            .ok_or(CoreError::ComponentNotFound(id))?;

        let component = Component::from_record(&record)?;
        self.selection.select(slot, component.clone())?;
        Ok(component)
    }

    /// Evaluates the current selection.
    pub fn evaluate_compatibility(&self) -> Verdict {
        evaluate_with(&self.selection, self.observer.as_ref())
    }

    /// Category → component mapping for display.
    pub fn snapshot_selection(&self) -> SelectionSnapshot {
        self.selection.all()
    }

    /// Empties one slot and returns what it held.
    pub fn clear(&mut self, slot: Category) -> Option<Component> {
        self.selection.clear(slot)
    }

    /// Empties every slot.
    pub fn reset(&mut self) {
        self.selection.reset();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
