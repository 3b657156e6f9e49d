//! # Application Error Type
//!
//! Unified error type for the `pcbuild` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in pcbuild                                │
//! │                                                                         │
//! │  Command / menu                                                        │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ├── Catalog failure? ─── DbError ───────────┐                  │
//! │         ├── Selection failure? ─ CoreError ─────────┤                  │
//! │         ├── Bad config file? ─── AppError::Config ──┼──► main          │
//! │         └── Terminal I/O? ────── io::Error ─────────┘      │           │
//! │                                                            ▼           │
//! │                                         error!(code = ..) + stderr     │
//! │                                         exit code 1                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An incompatible build is not an error. `check` reports it through its
//! exit code instead.

use std::path::PathBuf;

use pcbuild_core::CoreError;
use pcbuild_db::DbError;
use thiserror::Error;

/// Error returned by every fallible CLI operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Selection or validation failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catalog storage or import failure.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// No platform data directory and no explicit database path.
    #[error("Could not determine app data directory; pass --db or set PCBUILD_DB_PATH")]
    NoDataDir,

    /// Terminal or file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classification, logged next to every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Component id or category unknown
    NotFound,

    /// Input or catalog data rejected
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Configuration problem
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        AppError::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Classifies the error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(CoreError::ComponentNotFound(_))
            | AppError::Core(CoreError::InvalidCategory(_)) => ErrorCode::NotFound,
            AppError::Core(CoreError::Catalog(_)) => ErrorCode::DatabaseError,
            AppError::Core(_) => ErrorCode::ValidationError,
            AppError::Db(
                DbError::ImportRow { .. }
                | DbError::Csv(_)
                | DbError::UniqueViolation { .. }
                | DbError::ConstraintViolation { .. },
            ) => ErrorCode::ValidationError,
            AppError::Db(_) => ErrorCode::DatabaseError,
            AppError::Config { .. } | AppError::NoDataDir => ErrorCode::ConfigError,
            AppError::Io(_) | AppError::Json(_) => ErrorCode::Internal,
        }
    }
}

/// Result type for CLI operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: AppError = CoreError::ComponentNotFound(9999).into();

        assert_eq!(err.to_string(), "Component not found: 9999");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_import_errors_are_validation() {
        let err: AppError = DbError::import_row(4, "duplicate id 7").into();

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Import failed at row 4: duplicate id 7");
    }

    #[test]
    fn test_config_error_message() {
        let err = AppError::config("/etc/pcbuild.toml", "expected a table");

        assert_eq!(
            err.to_string(),
            "Invalid configuration /etc/pcbuild.toml: expected a table"
        );
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }
}
