//! Layered configuration.
//!
//! Sources are merged with the following precedence (highest first):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`STAYBOOK_*`)
//! 3. Private project config (`staybook.local.yaml`)
//! 4. Project config (`staybook.yaml`)
//! 5. User config (`~/.staybook/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use staybook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/hotel"))
//!     .build()
//!     .unwrap();
//!
//! println!("partial refund: {}%", config.cancellation_policy().partial_refund_percent);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{
    ConfigLoader, ConfigSource, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
pub use merger::ConfigMerger;
pub use schema::{
    CancellationConfig, Config, OutputFormat, DEFAULT_CATALOG_FILE, DEFAULT_LOCK_WAIT_SECONDS,
    DEFAULT_PAGE_SIZE,
};
pub use validator::ConfigValidator;
