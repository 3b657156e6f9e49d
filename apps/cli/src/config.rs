//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`PCBUILD_*`)
//! 3. Config file (`--config`, else `<platform config dir>/config.toml`)
//! 4. Defaults (this file)
//!
//! ## Example `config.toml`
//! ```toml
//! database_path = "/home/me/pcbuild/catalog.db"
//! catalog_csv = "/home/me/pcbuild/components.csv"
//! search_limit = 100
//! log_filter = "info,pcbuild=debug"
//! ```
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Overrides the database file.
pub const ENV_DB_PATH: &str = "PCBUILD_DB_PATH";

/// Overrides the catalog file imported into an empty database.
pub const ENV_CATALOG_CSV: &str = "PCBUILD_CATALOG_CSV";

const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "pcbuild.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite file. `None` → `<platform data dir>/pcbuild.db`.
    pub database_path: Option<PathBuf>,

    /// Catalog imported automatically when the database is empty.
    pub catalog_csv: PathBuf,

    /// Maximum rows a listing shows.
    pub search_limit: u32,

    /// tracing filter directives used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            catalog_csv: PathBuf::from("data/components.csv"),
            search_limit: 200,
            log_filter: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `explicit`, or from the platform config
    /// file when `explicit` is `None`, then applies environment overrides.
    ///
    /// ## Errors
    /// - `explicit` names a file that cannot be read
    /// - the file is not valid TOML for this struct
    ///
    /// A missing platform config file is not an error.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => AppConfig::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        debug!(path = %path.display(), "Loading configuration file");

        let content = std::fs::read_to_string(path).map_err(|e| AppError::config(path, e))?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| AppError::config(path, e))?;

        if config.search_limit == 0 {
            return Err(AppError::config(path, "search_limit must be at least 1"));
        }
        Ok(config)
    }

    /// Applies `PCBUILD_*` overrides. `lookup` abstracts the environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|v| !v.is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup(ENV_CATALOG_CSV).filter(|v| !v.is_empty()) {
            self.catalog_csv = PathBuf::from(path);
        }
    }

    /// Resolves the database file, creating the platform data directory
    /// when it is used.
    pub fn resolved_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(AppError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "pcbuild", "pcbuild")
}

/// `<platform config dir>/config.toml`, if the platform has one.
///
/// - **Linux**: `~/.config/pcbuild/config.toml`
/// - **macOS**: `~/Library/Application Support/com.pcbuild.pcbuild/config.toml`
/// - **Windows**: `%APPDATA%\pcbuild\pcbuild\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.database_path, None);
        assert_eq!(config.catalog_csv, PathBuf::from("data/components.csv"));
        assert_eq!(config.search_limit, 200);
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config("search_limit = 25\ncatalog_csv = \"/srv/parts.csv\"\n");

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.search_limit, 25);
        assert_eq!(config.catalog_csv, PathBuf::from("/srv/parts.csv"));
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config("serach_limit = 25\n");

        let err = AppConfig::from_file(file.path()).unwrap_err();

        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let file = write_config("search_limit = 0\n");

        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/no/such/pcbuild.toml"))).unwrap_err();

        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DB_PATH, "/tmp/override.db"),
            (ENV_CATALOG_CSV, ""),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/override.db")));
        // Empty values are ignored
        assert_eq!(config.catalog_csv, PathBuf::from("data/components.csv"));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/x.db")),
            ..AppConfig::default()
        };

        assert_eq!(
            config.resolved_database_path().unwrap(),
            PathBuf::from("/tmp/x.db")
        );
    }
}
