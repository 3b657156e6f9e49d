//! # Error Types
//!
//! Domain-specific error types for pcbuild-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pcbuild-core errors (this file)                                       │
//! │  ├── CoreError        - Selection failures                             │
//! │  └── ValidationError  - Catalog record field failures                  │
//! │                                                                         │
//! │  pcbuild-db errors (separate crate)                                    │
//! │  └── DbError          - Database and import failures                   │
//! │                                                                         │
//! │  pcbuild CLI errors (in app)                                           │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Verdicts Are Not Errors
//! An incompatible build (socket mismatch, weak PSU, ...) is a normal
//! outcome and is returned as a [`Verdict`](crate::compatibility::Verdict).
//! Only selection failures and catalog failures live here.

use thiserror::Error;

use crate::types::{Category, ComponentId};

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while selecting a component.
///
/// Every variant leaves the Selection Store untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no component with this id.
    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// The caller used a category key that is not one of the five slots.
    ///
    /// ## When This Occurs
    /// - Typo in a category key (`"cpus"`, `"video"`)
    /// - Wrong case (`"CPU"`); keys are matched exactly
    #[error("Invalid category '{0}': expected one of cpu, gpu, ram, motherboard, psu")]
    InvalidCategory(String),

    /// The looked-up component belongs to a different slot.
    ///
    /// ## User Workflow
    /// ```text
    /// select("gpu", 1)
    ///      │
    ///      ▼
    /// catalog: id 1 = "Ryzen 5 5600X" (cpu)
    ///      │
    ///      ▼
    /// TypeMismatch { id: 1, expected: gpu, actual: cpu }
    /// ```
    #[error("Component {id} is a {actual}, cannot be selected as {expected}")]
    TypeMismatch {
        id: ComponentId,
        expected: Category,
        actual: Category,
    },

    /// A catalog row could not be turned into a typed component.
    #[error("Malformed component record {id}: {source}")]
    MalformedComponentRecord {
        id: ComponentId,
        #[source]
        source: ValidationError,
    },

    /// The catalog itself failed (database unavailable, corrupt row, ...).
    #[error("Catalog lookup failed: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Wraps a catalog failure.
    pub fn catalog(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CoreError::Catalog(Box::new(err))
    }

    /// Creates a MalformedComponentRecord error.
    pub fn malformed(id: ComponentId, source: ValidationError) -> Self {
        CoreError::MalformedComponentRecord { id, source }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Raised by the per-category constructors when a catalog record lacks a
/// field its category needs, and by input validators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TypeMismatch {
            id: 7,
            expected: Category::Gpu,
            actual: Category::Cpu,
        };
        assert_eq!(
            err.to_string(),
            "Component 7 is a cpu, cannot be selected as gpu"
        );

        assert_eq!(
            CoreError::ComponentNotFound(9999).to_string(),
            "Component not found: 9999"
        );
    }

    #[test]
    fn test_malformed_record_message() {
        let err = CoreError::malformed(
            3,
            ValidationError::Required {
                field: "socket".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Malformed component record 3: socket is required"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
