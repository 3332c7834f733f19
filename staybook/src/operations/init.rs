//! Data directory initialization.
//!
//! Creates the data directory and the reservation database, and optionally
//! writes a commented configuration file and a sample rooms file.

use std::fs;
use std::path::PathBuf;

use crate::config::{DEFAULT_CATALOG_FILE, USER_CONFIG_FILE};
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a commented `config.yaml`.
    pub create_config: bool,
    /// Write a sample rooms file.
    pub create_catalog: bool,
}

impl InitOptions {
    /// Creates options that only set up the database.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
            create_catalog: false,
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write `config.yaml`.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Sets whether to write a sample rooms file.
    #[must_use]
    pub const fn with_create_catalog(mut self, create_catalog: bool) -> Self {
        self.create_catalog = create_catalog;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether `config.yaml` was written.
    pub config_created: bool,
    /// Whether the sample rooms file was written.
    pub catalog_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# staybook configuration

# Rooms file, relative to the data directory (default: rooms.yaml)
# catalog: rooms.yaml

# Guest cancellation policy (defaults shown)
# cancellation:
#   full_refund_days: 3
#   partial_refund_days: 1
#   partial_refund_percent: 50

# Confirm a pending reservation as soon as its payment succeeds
# auto_confirm_on_payment: false

# Users allowed to confirm, reject, complete and mark no-shows
# admins:
#   - frontdesk

# Reservations per listing page (default: 20)
# page_size: 20

# Maximum lock wait time in seconds (default: 5)
# maximum_lock_wait_seconds: 5
";

const SAMPLE_CATALOG: &str = r#"rooms:
  - id: "101"
    name: Garden double
    nightly_price: 120000
    capacity: 2
    options:
      - id: breakfast
        name: Breakfast
        price: 15000
      - id: parking
        name: Parking
        price: 10000
  - id: "201"
    name: Family suite
    nightly_price: 210000
    capacity: 4
    options:
      - id: breakfast
        name: Breakfast
        price: 15000
      - id: extra-bed
        name: Extra bed
        price: 30000
"#;

fn write_if_missing(path: &std::path::Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, contents)?;
    Ok(true)
}

/// Initializes the data directory and database.
///
/// Existing configuration and rooms files are never overwritten.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the database exists and `overwrite` is
/// false, or an I/O or database error if creation fails.
///
/// # Examples
///
/// ```no_run
/// use staybook::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/staybook"))
///     .with_create_config(true)
///     .with_create_catalog(true);
///
/// let result = init_database(&options).unwrap();
/// println!("Database created: {}", result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        catalog_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    let db_exists = db_path.exists();
    if db_exists && !options.overwrite {
        return Err(Error::Validation {
            field: "database".into(),
            message: format!(
                "Database already exists at {}. Use --overwrite to replace it.",
                db_path.display()
            ),
        });
    }
    if db_exists {
        fs::remove_file(&db_path)?;
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::debug!("initialized database at {}", db_path.display());

    if options.create_config {
        result.config_created = write_if_missing(
            &options.data_dir.join(USER_CONFIG_FILE),
            DEFAULT_CONFIG_TEMPLATE,
        )?;
    }
    if options.create_catalog {
        result.catalog_created = write_if_missing(
            &options.data_dir.join(DEFAULT_CATALOG_FILE),
            SAMPLE_CATALOG,
        )?;
    }

    Ok(result)
}
