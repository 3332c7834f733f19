//! Database location and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::schema::DEFAULT_LOCK_WAIT_SECONDS;
use crate::error::{Error, Result};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "staybook.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STAYBOOK_DATA_DIR";

/// Parameters for opening the reservation store.
///
/// # Examples
///
/// ```
/// use staybook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/staybook.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long to wait on a locked database.
    pub busy_timeout: Duration,
    /// Create the file and its parent directory when missing.
    pub auto_create: bool,
    /// Open without write access.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a configuration with the default busy timeout and auto-create on.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_secs(DEFAULT_LOCK_WAIT_SECONDS),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Refuses to create a missing database.
    #[must_use]
    pub const fn without_auto_create(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Opens read-only. Implies no auto-create.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the data directory: `$STAYBOOK_DATA_DIR` when set, otherwise
/// `~/.staybook`.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    home::home_dir()
        .map(|home| home.join(".staybook"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "cannot determine home directory".into(),
        })
}

/// Returns the database path inside `data_dir`, or inside the default data
/// directory when none is given.
///
/// # Errors
///
/// Returns an error if the default data directory cannot be determined.
pub fn resolve_database_path(data_dir: Option<&Path>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.join(DATABASE_FILE)),
        None => Ok(default_data_dir()?.join(DATABASE_FILE)),
    }
}
