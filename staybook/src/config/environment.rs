//! Environment variable overrides.
//!
//! `STAYBOOK_*` variables sit above every configuration file and below
//! programmatic overrides.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Applies `STAYBOOK_*` environment variables to a configuration.
///
/// # Examples
///
/// ```no_run
/// use staybook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to `config`.
    ///
    /// `STAYBOOK_ADMINS` is comma separated and adds to any admins already
    /// present rather than replacing them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable when a value cannot
    /// be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(catalog) = env::var("STAYBOOK_CATALOG") {
            config.catalog = Some(catalog.into());
        }

        if let Ok(val) = env::var("STAYBOOK_AUTO_CONFIRM_ON_PAYMENT") {
            config.auto_confirm_on_payment =
                Some(Self::parse_bool("STAYBOOK_AUTO_CONFIRM_ON_PAYMENT", &val)?);
        }

        if let Ok(val) = env::var("STAYBOOK_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("STAYBOOK_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(admins) = env::var("STAYBOOK_ADMINS") {
            let existing = config.admins.get_or_insert_with(Vec::new);
            for admin in Self::parse_list(&admins) {
                if !existing.contains(&admin) {
                    existing.push(admin);
                }
            }
        }

        Self::apply_cancellation_overrides(config)?;

        if let Ok(val) = env::var("STAYBOOK_PAGE_SIZE") {
            config.page_size = Some(Self::parse_number("STAYBOOK_PAGE_SIZE", &val)?);
        }

        if let Ok(val) = env::var("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("STAYBOOK_OUTPUT_FORMAT") {
            config.output_format =
                Some(
                    OutputFormat::from_str(&val).map_err(|message| Error::Validation {
                        field: "STAYBOOK_OUTPUT_FORMAT".into(),
                        message,
                    })?,
                );
        }

        Ok(())
    }

    fn apply_cancellation_overrides(config: &mut Config) -> Result<()> {
        let mut cancellation = config.cancellation.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("STAYBOOK_FULL_REFUND_DAYS") {
            cancellation.full_refund_days =
                Some(Self::parse_number("STAYBOOK_FULL_REFUND_DAYS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("STAYBOOK_PARTIAL_REFUND_DAYS") {
            cancellation.partial_refund_days =
                Some(Self::parse_number("STAYBOOK_PARTIAL_REFUND_DAYS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("STAYBOOK_PARTIAL_REFUND_PERCENT") {
            cancellation.partial_refund_percent =
                Some(Self::parse_number("STAYBOOK_PARTIAL_REFUND_PERCENT", &val)?);
            modified = true;
        }

        if modified {
            config.cancellation = Some(cancellation);
        }

        Ok(())
    }

    /// Parse a boolean: true/1/yes/on or false/0/no/off, case-insensitive.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("'{s}' is not a valid number"),
        })
    }

    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect()
    }
}
