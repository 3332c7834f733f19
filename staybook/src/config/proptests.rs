//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{CancellationConfig, Config};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn cancellation_strategy() -> impl Strategy<Value = CancellationConfig> {
    (
        prop::option::of(0i64..30),
        prop::option::of(0i64..30),
        prop::option::of(0u8..=120),
    )
        .prop_map(|(full, partial, percent)| CancellationConfig {
            full_refund_days: full,
            partial_refund_days: partial,
            partial_refund_percent: percent,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(cancellation_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec("[a-z]{1,8}", 0..4)),
        prop::option::of(0u32..600),
        prop::option::of(0u64..20),
    )
        .prop_map(|(cancellation, auto_confirm, admins, page_size, wait)| Config {
            cancellation,
            auto_confirm_on_payment: auto_confirm,
            admins,
            page_size,
            maximum_lock_wait_seconds: wait,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.page_size, high.page_size.or(low.page_size));
        prop_assert_eq!(
            merged.auto_confirm_on_payment,
            high.auto_confirm_on_payment.or(low.auto_confirm_on_payment)
        );
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );

        let low_percent = low.cancellation.as_ref().and_then(|c| c.partial_refund_percent);
        let high_percent = high.cancellation.as_ref().and_then(|c| c.partial_refund_percent);
        let merged_percent = merged.cancellation.as_ref().and_then(|c| c.partial_refund_percent);
        prop_assert_eq!(merged_percent, high_percent.or(low_percent));
    }

    #[test]
    fn empty_config_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn merged_admins_keep_every_source(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        for admin in low.admins().iter().chain(high.admins()) {
            prop_assert!(merged.admins().contains(admin));
        }
    }

    #[test]
    fn validated_policy_orders_thresholds(cancellation in cancellation_strategy()) {
        let config = Config {
            cancellation: Some(cancellation),
            ..Default::default()
        };
        if ConfigValidator::validate(&config).is_ok() {
            let policy = config.cancellation_policy();
            prop_assert!(policy.partial_refund_days >= 1);
            prop_assert!(policy.full_refund_days > policy.partial_refund_days);
            prop_assert!(policy.partial_refund_percent <= 100);
        }
    }
}
