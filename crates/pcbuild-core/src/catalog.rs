//! # Catalog Capability
//!
//! The core does not store components. It consumes a catalog through the
//! [`ComponentCatalog`] trait; `pcbuild-db` provides the SQLite-backed
//! implementation and the CLI adapts it.
//!
//! Filtering itself is the catalog's job. [`SearchFilter`] only carries the
//! criteria.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Category, ComponentId, ComponentRecord};
use crate::validation::validate_search_term;

// =============================================================================
// Search Filter
// =============================================================================

/// Criteria for `ComponentCatalog::search`. All set criteria must match.
///
/// ## Semantics
/// - `category`: exact category
/// - `term`: substring of the name **or** the model
/// - `manufacturer`: exact manufacturer
///
/// Empty strings are normalized to "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub category: Option<Category>,
    pub term: Option<String>,
    pub manufacturer: Option<String>,
}

impl SearchFilter {
    /// A filter that matches every component.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the name/model term.
    ///
    /// ## Errors
    /// `TooLong` when the term exceeds the maximum search length.
    pub fn term(mut self, term: &str) -> Result<Self, ValidationError> {
        self.term = validate_search_term(term)?;
        Ok(self)
    }

    pub fn manufacturer(mut self, manufacturer: &str) -> Self {
        let manufacturer = manufacturer.trim();
        self.manufacturer = if manufacturer.is_empty() {
            None
        } else {
            Some(manufacturer.to_string())
        };
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.term.is_none() && self.manufacturer.is_none()
    }
}

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read-only access to component records.
///
/// Implementations own the records; the core copies what it selects.
pub trait ComponentCatalog {
    /// Failure of the catalog itself (not "not found").
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up a record by id. `Ok(None)` when the id is unknown.
    fn find_by_id(&self, id: ComponentId) -> Result<Option<ComponentRecord>, Self::Error>;

    /// Returns every record matching `filter`.
    fn search(&self, filter: &SearchFilter) -> Result<Vec<ComponentRecord>, Self::Error>;
}

impl<C: ComponentCatalog + ?Sized> ComponentCatalog for &C {
    type Error = C::Error;

    fn find_by_id(&self, id: ComponentId) -> Result<Option<ComponentRecord>, Self::Error> {
        (**self).find_by_id(id)
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<ComponentRecord>, Self::Error> {
        (**self).search(filter)
    }
}
