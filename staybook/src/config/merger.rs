//! Configuration merging and precedence handling.
//!
//! Scalars from a higher-precedence source replace lower ones. The
//! cancellation block merges field by field, and admins accumulate.

use crate::config::loader::ConfigSource;
use crate::config::schema::{CancellationConfig, Config};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigMerger};
///
/// let low = Config { page_size: Some(10), ..Default::default() };
/// let high = Config { page_size: Some(50), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.page_size, Some(50));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; `source` wins where it sets a value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.catalog.is_some() {
            target.catalog.clone_from(&source.catalog);
        }

        if source.auto_confirm_on_payment.is_some() {
            target.auto_confirm_on_payment = source.auto_confirm_on_payment;
        }

        if source.page_size.is_some() {
            target.page_size = source.page_size;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_cancellation) = source.cancellation {
            target.cancellation = Some(match &target.cancellation {
                Some(existing) => Self::merge_cancellation(existing, source_cancellation),
                None => source_cancellation.clone(),
            });
        }

        if let Some(ref source_admins) = source.admins {
            let admins = target.admins.get_or_insert_with(Vec::new);
            for admin in source_admins {
                if !admins.contains(admin) {
                    admins.push(admin.clone());
                }
            }
        }
    }

    fn merge_cancellation(
        target: &CancellationConfig,
        source: &CancellationConfig,
    ) -> CancellationConfig {
        CancellationConfig {
            full_refund_days: source.full_refund_days.or(target.full_refund_days),
            partial_refund_days: source.partial_refund_days.or(target.partial_refund_days),
            partial_refund_percent: source
                .partial_refund_percent
                .or(target.partial_refund_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use std::path::PathBuf;

    fn make_source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("test-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_simple_fields() {
        let mut target = Config::default();
        let source = Config {
            auto_confirm_on_payment: Some(true),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.auto_confirm_on_payment, Some(true));
        assert_eq!(target.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unset_fields_do_not_clear() {
        let mut target = Config {
            page_size: Some(25),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.page_size, Some(25));
    }

    #[test]
    fn test_cancellation_merges_per_field() {
        let mut target = Config {
            cancellation: Some(CancellationConfig {
                full_refund_days: Some(7),
                partial_refund_days: Some(2),
                partial_refund_percent: None,
            }),
            ..Default::default()
        };
        let source = Config {
            cancellation: Some(CancellationConfig {
                partial_refund_percent: Some(30),
                partial_refund_days: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        let merged = target.cancellation.unwrap();
        assert_eq!(merged.full_refund_days, Some(7));
        assert_eq!(merged.partial_refund_days, Some(1));
        assert_eq!(merged.partial_refund_percent, Some(30));
    }

    #[test]
    fn test_admins_accumulate_without_duplicates() {
        let sources = vec![
            make_source(
                1,
                Config {
                    admins: Some(vec!["frontdesk".to_string()]),
                    ..Default::default()
                },
            ),
            make_source(
                2,
                Config {
                    admins: Some(vec!["manager".to_string(), "frontdesk".to_string()]),
                    ..Default::default()
                },
            ),
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.admins(), ["frontdesk", "manager"]);
    }

    #[test]
    fn test_merge_respects_order() {
        let sources = vec![
            make_source(
                1,
                Config {
                    maximum_lock_wait_seconds: Some(3),
                    ..Default::default()
                },
            ),
            make_source(
                3,
                Config {
                    maximum_lock_wait_seconds: Some(9),
                    ..Default::default()
                },
            ),
        ];
        assert_eq!(
            ConfigMerger::merge(sources).maximum_lock_wait_seconds,
            Some(9)
        );
    }
}
