//! Configuration validation.

use crate::collaborators::PageRequest;
use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { page_size: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.cancellation.is_some() {
            config.cancellation_policy().validate()?;
        }

        if let Some(size) = config.page_size {
            if size == 0 || size > PageRequest::MAX_SIZE {
                return Err(Error::Validation {
                    field: "page_size".into(),
                    message: format!("must be between 1 and {}", PageRequest::MAX_SIZE),
                });
            }
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref catalog) = config.catalog {
            if catalog.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "catalog".into(),
                    message: "path cannot be empty".into(),
                });
            }
        }

        if let Some(ref admins) = config.admins {
            Self::validate_admins(admins)?;
        }

        Ok(())
    }

    fn validate_admins(admins: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for (i, admin) in admins.iter().enumerate() {
            let trimmed = admin.trim();
            if trimmed.is_empty() {
                return Err(Error::Validation {
                    field: format!("admins[{i}]"),
                    message: "cannot be empty or only whitespace".into(),
                });
            }
            if trimmed.contains('\0') || trimmed.len() > 255 {
                return Err(Error::Validation {
                    field: format!("admins[{i}]"),
                    message: "must be at most 255 characters without null bytes".into(),
                });
            }
            if trimmed == crate::UserId::system().as_str() {
                return Err(Error::Validation {
                    field: format!("admins[{i}]"),
                    message: "the system user cannot be listed as an admin".into(),
                });
            }
            if !seen.insert(trimmed) {
                return Err(Error::Validation {
                    field: format!("admins[{i}]"),
                    message: format!("'{trimmed}' is listed more than once"),
                });
            }
        }
        Ok(())
    }
}
