//! Configuration types for the SQLite store.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for opening a store.
///
/// # Examples
///
/// ```
/// use ac_sqlite::config::StoreConfig;
/// use std::path::PathBuf;
///
/// // In-memory store (default)
/// let config = StoreConfig::default();
///
/// // File-based store
/// let config = StoreConfig {
///     database_path: Some(PathBuf::from("marketplace.db")),
///     create_if_missing: true,
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file path. If None, uses an in-memory database
    pub database_path: Option<PathBuf>,

    /// Whether to create and seed the database if it doesn't exist
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
        }
    }
}
