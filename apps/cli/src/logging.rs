//! Tracing subscriber setup.
//!
//! Logs go to stderr so menu and listing output on stdout stays clean.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,pcbuild=debug,sqlx=warn";
const VERBOSE_FILTER: &str = "debug,sqlx=warn";

/// Initializes the global tracing subscriber.
///
/// ## Filter Resolution
/// 1. `RUST_LOG`, when set
/// 2. `-v` → `debug,sqlx=warn`
/// 3. `log_filter` from the config file
/// 4. `info,pcbuild=debug,sqlx=warn`
pub fn init_tracing(verbose: bool, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, configured)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn filter_directives(verbose: bool, configured: Option<&str>) -> &str {
    if verbose {
        VERBOSE_FILTER
    } else {
        configured.unwrap_or(DEFAULT_FILTER)
    }
}
