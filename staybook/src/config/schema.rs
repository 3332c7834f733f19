//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; the
//! accessor methods on [`Config`] supply the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationPolicy;

/// Default rooms file name inside the data directory.
pub const DEFAULT_CATALOG_FILE: &str = "rooms.yaml";

/// Default number of reservations per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default busy timeout for the reservation store, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use staybook::config::{CancellationConfig, Config};
///
/// let config = Config {
///     cancellation: Some(CancellationConfig {
///         partial_refund_percent: Some(30),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// let policy = config.cancellation_policy();
/// assert_eq!(policy.partial_refund_percent, 30);
/// assert_eq!(policy.full_refund_days, 3);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the rooms file. Relative paths resolve against the data directory.
    pub catalog: Option<PathBuf>,

    /// Cancellation thresholds and partial refund rate.
    pub cancellation: Option<CancellationConfig>,

    /// Confirm a pending reservation as soon as its payment succeeds.
    pub auto_confirm_on_payment: Option<bool>,

    /// User ids that act as hotel staff. Accumulated across sources.
    pub admins: Option<Vec<String>>,

    /// Default page size for reservation listings.
    pub page_size: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for the database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for listings.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Returns the effective cancellation policy.
    #[must_use]
    pub fn cancellation_policy(&self) -> CancellationPolicy {
        self.cancellation
            .as_ref()
            .map_or_else(CancellationPolicy::default, CancellationPolicy::from)
    }

    /// Returns whether a successful payment confirms the reservation.
    #[must_use]
    pub fn auto_confirm_on_payment(&self) -> bool {
        self.auto_confirm_on_payment.unwrap_or(false)
    }

    /// Returns the configured admin ids.
    #[must_use]
    pub fn admins(&self) -> &[String] {
        self.admins.as_deref().unwrap_or(&[])
    }

    /// Returns the listing page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Returns the store busy timeout in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Resolves the rooms file path against `data_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use staybook::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(
    ///     config.catalog_path(Path::new("/srv/hotel")),
    ///     PathBuf::from("/srv/hotel/rooms.yaml")
    /// );
    /// ```
    #[must_use]
    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        match &self.catalog {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DEFAULT_CATALOG_FILE),
        }
    }
}

/// Cancellation policy overrides.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CancellationConfig {
    /// Minimum days before check-in for a full refund.
    pub full_refund_days: Option<i64>,

    /// Minimum days before check-in for a partial refund.
    pub partial_refund_days: Option<i64>,

    /// Percent refunded in the partial band.
    pub partial_refund_percent: Option<u8>,
}

impl From<&CancellationConfig> for CancellationPolicy {
    fn from(config: &CancellationConfig) -> Self {
        let defaults = Self::default();
        Self {
            full_refund_days: config.full_refund_days.unwrap_or(defaults.full_refund_days),
            partial_refund_days: config
                .partial_refund_days
                .unwrap_or(defaults.partial_refund_days),
            partial_refund_percent: config
                .partial_refund_percent
                .unwrap_or(defaults.partial_refund_percent),
        }
    }
}

/// Output format for listings.
///
/// # Examples
///
/// ```
/// use staybook::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("unknown output format '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let yaml = r"
catalog: rooms/main.yaml
cancellation:
  full_refund_days: 7
  partial_refund_days: 2
  partial_refund_percent: 25
auto_confirm_on_payment: true
admins: [frontdesk, manager]
page_size: 50
maximum_lock_wait_seconds: 10
output_format: json
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.page_size(), 50);
        assert!(config.auto_confirm_on_payment());
        assert_eq!(config.admins(), ["frontdesk", "manager"]);
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(
            config.cancellation_policy(),
            CancellationPolicy {
                full_refund_days: 7,
                partial_refund_days: 2,
                partial_refund_percent: 25,
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("refund_everything: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!config.auto_confirm_on_payment());
        assert!(config.admins().is_empty());
        assert_eq!(config.cancellation_policy(), CancellationPolicy::default());
        assert_eq!(config.lock_wait_seconds(), DEFAULT_LOCK_WAIT_SECONDS);
    }

    #[test]
    fn test_catalog_path_resolution() {
        let data_dir = Path::new("/data");
        let relative = Config {
            catalog: Some(PathBuf::from("custom.yaml")),
            ..Default::default()
        };
        assert_eq!(
            relative.catalog_path(data_dir),
            PathBuf::from("/data/custom.yaml")
        );

        let absolute = Config {
            catalog: Some(PathBuf::from("/etc/rooms.yaml")),
            ..Default::default()
        };
        assert_eq!(
            absolute.catalog_path(data_dir),
            PathBuf::from("/etc/rooms.yaml")
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
