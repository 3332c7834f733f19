//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database
//! management, acting-user resolution and plan reporting.

use crate::error::CliError;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use staybook::catalog::YamlCatalog;
use staybook::database::{default_data_dir, DATABASE_FILE};
use staybook::{
    Actor, Config, ConfigBuilder, ConfiguredRoles, Database, DatabaseConfig, OperationPlan,
    ReservationId, RoleDirectory, UserId,
};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// The user the command acts as.
    pub user: Option<String>,

    /// Pin the current date instead of reading the clock.
    pub today: Option<NaiveDate>,
}

impl GlobalOptions {
    /// The instant the command runs at.
    ///
    /// With `--today`, noon of that date; otherwise the local clock.
    pub fn now(&self) -> NaiveDateTime {
        match self.today {
            Some(day) => day
                .and_hms_opt(12, 0, 0)
                .unwrap_or_else(|| day.and_time(NaiveTime::MIN)),
            None => Local::now().naive_local(),
        }
    }

    /// The current date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Resolve the data directory: `--data-dir`, then `STAYBOOK_DATA_DIR`,
/// then `~/.staybook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }
    default_data_dir().map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `staybook.local.yaml` and `staybook.yaml` found from the current directory
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let working_dir = env::current_dir()?;

    ConfigBuilder::new()
        .with_working_dir(&working_dir)
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// Open the rooms catalog named by configuration.
pub fn open_catalog(global: &GlobalOptions, config: &Config) -> Result<YamlCatalog, CliError> {
    let data_dir = resolve_data_dir(global)?;
    Ok(YamlCatalog::new(config.catalog_path(&data_dir)))
}

/// Resolve the acting user and look up their role.
///
/// # Errors
///
/// Returns `InvalidArguments` if no user was given.
pub fn resolve_actor(global: &GlobalOptions, config: &Config) -> Result<Actor, CliError> {
    let name = global.user.as_deref().ok_or_else(|| {
        CliError::InvalidArguments("this command needs --user (or STAYBOOK_USER)".to_string())
    })?;
    let id = UserId::new(name)?;
    let role = ConfiguredRoles::new(config.admins()).role_of(&id)?;
    Ok(Actor::new(id, role))
}

/// Parse a reservation id given on the command line.
pub fn parse_reservation_id(raw: i64) -> Result<ReservationId, CliError> {
    if raw <= 0 {
        return Err(CliError::InvalidArguments(format!(
            "reservation id must be positive, got {raw}"
        )));
    }
    Ok(ReservationId::new(raw))
}

/// Print a plan without executing it.
pub fn report_dry_run(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    report_warnings(&plan.warnings, global);
}

/// Print warnings to stderr unless quiet.
pub fn report_warnings(warnings: &[String], global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
