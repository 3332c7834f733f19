//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the staybook data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, shorten_path, GlobalOptions};
use clap::Parser;
use staybook::config::{DEFAULT_CATALOG_FILE, USER_CONFIG_FILE};
use staybook::database::DATABASE_FILE;
use staybook::operations::{init_database, InitOptions};
use std::path::Path;

/// Initialize staybook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize staybook data directory and database")]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Create a sample rooms file
    #[arg(long)]
    with_catalog: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Note: --disable-autoinit is ignored here; this command is the explicit
    /// way to create the database.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;

        if self.dry_run {
            self.describe(&data_dir);
            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config)
            .with_create_catalog(self.with_catalog);

        let result = init_database(&options)?;

        println!("Initialized staybook in: {}", shorten_path(&result.data_dir));

        if result.data_dir_created {
            println!("  - Created data directory");
        }

        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }

        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        if result.catalog_created {
            println!("  - Created sample rooms file");
        } else if self.with_catalog {
            println!("  - Rooms file already exists (not overwritten)");
        }

        Ok(())
    }

    fn describe(&self, data_dir: &Path) {
        println!("Dry-run mode: no changes will be made");
        println!();
        println!("Would initialize staybook in: {}", data_dir.display());

        if data_dir.exists() {
            println!("  - Data directory already exists: {}", data_dir.display());
        } else {
            println!("  - Create data directory: {}", data_dir.display());
        }

        let db_path = data_dir.join(DATABASE_FILE);
        if !db_path.exists() {
            println!("  - Create database: {}", db_path.display());
        } else if self.overwrite {
            println!("  - Remove existing database: {}", db_path.display());
            println!("  - Create new database: {}", db_path.display());
        } else {
            println!(
                "  - ERROR: Database already exists (use --overwrite to replace): {}",
                db_path.display()
            );
        }

        let extras = [
            (self.with_config, USER_CONFIG_FILE, "configuration file"),
            (self.with_catalog, DEFAULT_CATALOG_FILE, "rooms file"),
        ];
        for (wanted, file, label) in extras {
            if !wanted {
                continue;
            }
            let path = data_dir.join(file);
            if path.exists() {
                println!(
                    "  - {label} already exists (will not overwrite): {}",
                    path.display()
                );
            } else {
                println!("  - Create {label}: {}", path.display());
            }
        }
    }
}
