//! Command to validate a staybook configuration or rooms file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use staybook::catalog::CatalogFile;
use staybook::config::{ConfigLoader, ConfigValidator, DEFAULT_CATALOG_FILE};
use std::path::{Path, PathBuf};

/// Validate a configuration file or a rooms file.
#[derive(Args)]
pub struct ValidateCommand {
    /// File to validate
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Treat the file as a rooms catalog (implied for rooms.yaml)
    #[arg(long)]
    pub catalog: bool,
}

impl ValidateCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        if !self.path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.path.display()
            )));
        }

        // 2. Determine file type (rooms file vs configuration)
        if self.catalog || is_catalog_file(&self.path) {
            return validate_catalog(&self.path);
        }

        // 3. Parse the file
        let config = match ConfigLoader::load_file(&self.path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        // 4. Validate the configuration
        match ConfigValidator::validate(&config) {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}

fn is_catalog_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(DEFAULT_CATALOG_FILE)
}

fn validate_catalog(path: &Path) -> Result<(), CliError> {
    match CatalogFile::load(path) {
        Ok(file) => {
            println!("Rooms file is valid ({} room(s))", file.rooms.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {e}");
            Err(CliError::SemanticFailure(
                "Rooms file validation failed".to_string(),
            ))
        }
    }
}
