//! # Validation Module
//!
//! Field validators used when turning catalog rows into typed components
//! and when accepting user input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CSV import (pcbuild-db)                                      │
//! │  ├── Column parsing (numbers, known category keys)                     │
//! │  └── Rejects the whole file on the first bad row                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Component constructors (THIS MODULE)                         │
//! │  ├── Required category-specific fields (socket, memory_type, ...)      │
//! │  └── MalformedComponentRecord instead of a half-built component        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── PRIMARY KEY uniqueness                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::ComponentId;
use crate::{MAX_NAME_LEN, MAX_SEARCH_TERM_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a component name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use pcbuild_core::validation::validate_component_name;
///
/// assert!(validate_component_name("Ryzen 5 5600X").is_ok());
/// assert!(validate_component_name("").is_err());
/// ```
pub fn validate_component_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_label("name", name)
}

/// Validates an optional descriptive label (manufacturer, model).
///
/// Empty is allowed; only the length is bounded.
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category-specific text field that must be present.
///
/// ## Returns
/// The value, unchanged. Compatibility comparisons are exact, so no
/// trimming or case folding happens here; a blank value counts as missing.
pub fn validate_required_text(field: &str, value: Option<&str>) -> ValidationResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

/// Validates a search term.
///
/// ## Rules
/// - Can be empty (no filter)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed term, or `None` when there is nothing to filter on.
pub fn validate_search_term(term: &str) -> ValidationResult<Option<String>> {
    let term = term.trim();

    if term.chars().count() > MAX_SEARCH_TERM_LEN {
        return Err(ValidationError::TooLong {
            field: "search term".to_string(),
            max: MAX_SEARCH_TERM_LEN,
        });
    }

    if term.is_empty() {
        Ok(None)
    } else {
        Ok(Some(term.to_string()))
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
///
/// ## Example
/// ```rust
/// use pcbuild_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(29999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stored power figure in milliwatts.
///
/// ## Returns
/// The value as unsigned milliwatts; negative values are rejected.
pub fn validate_power_mw(milliwatts: i64) -> ValidationResult<u64> {
    u64::try_from(milliwatts).map_err(|_| ValidationError::OutOfRange {
        field: "power".to_string(),
        min: 0,
        max: i64::MAX,
    })
}

/// Validates a component id typed by a user.
pub fn validate_component_id(id: ComponentId) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
