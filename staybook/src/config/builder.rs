//! Layered configuration assembly.

use crate::cancellation::CancellationPolicy;
use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{
    CancellationConfig, Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS, DEFAULT_PAGE_SIZE,
};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from files, environment and programmatic overrides.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { page_size: Some(5), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.page_size, Some(5));
/// assert_eq!(config.cancellation_policy().partial_refund_percent, 50);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_env: bool,
    skip_files: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Create a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start project file discovery from. Defaults to the
    /// current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignore `STAYBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Programmatic overrides, applied above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge all sources, fill in defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            log::debug!("merging {} configuration file(s)", sources.len());
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        Self::apply_defaults(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    fn apply_defaults(config: &mut Config) {
        let defaults = CancellationPolicy::default();
        let cancellation = config.cancellation.get_or_insert_with(CancellationConfig::default);
        cancellation
            .full_refund_days
            .get_or_insert(defaults.full_refund_days);
        cancellation
            .partial_refund_days
            .get_or_insert(defaults.partial_refund_days);
        cancellation
            .partial_refund_percent
            .get_or_insert(defaults.partial_refund_percent);

        config.auto_confirm_on_payment.get_or_insert(false);
        config.page_size.get_or_insert(DEFAULT_PAGE_SIZE);
        config.disable_autoinit.get_or_insert(false);
        config
            .maximum_lock_wait_seconds
            .get_or_insert(DEFAULT_LOCK_WAIT_SECONDS);
        config.output_format.get_or_insert(OutputFormat::Table);
    }
}
