//! Property-based tests for the cancellation policy.

use super::{days_until_check_in, CancellationPolicy, RefundTier};
use crate::{Money, ReservationStatus};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn check_in() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

// Instants from 30 days before to 10 days after check-in, minute resolution
fn now_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (-30i64 * 24 * 60..10 * 24 * 60).prop_map(|minutes| {
        check_in().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minutes)
    })
}

fn active_status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Confirmed),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Tier matches the day-count table
    #[test]
    fn tier_matches_table(now in now_strategy(), status in active_status()) {
        let decision = CancellationPolicy::default().evaluate(check_in(), now, status);
        let days = decision.days_until_check_in;
        let expected = if days >= 3 {
            100
        } else if days >= 1 {
            50
        } else {
            0
        };
        prop_assert_eq!(decision.refund_rate, expected);
        prop_assert_eq!(decision.eligible, days >= 1);
    }

    // Waiting longer never increases the refund
    #[test]
    fn refund_never_grows_over_time(a in now_strategy(), b in now_strategy()) {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let policy = CancellationPolicy::default();
        let first = policy.evaluate(check_in(), earlier, ReservationStatus::Confirmed);
        let second = policy.evaluate(check_in(), later, ReservationStatus::Confirmed);
        prop_assert!(first.refund_rate >= second.refund_rate);
        prop_assert!(first.days_until_check_in >= second.days_until_check_in);
    }

    // The day count is the ceiling of the remaining time
    #[test]
    fn day_count_is_ceiling(now in now_strategy()) {
        let days = days_until_check_in(check_in(), now);
        let midnight = check_in().and_hms_opt(0, 0, 0).unwrap();
        prop_assert!(now + Duration::days(days) >= midnight);
        prop_assert!(now + Duration::days(days - 1) < midnight);
    }

    // Same-day and past check-ins are always blocked
    #[test]
    fn same_day_blocked(minutes in 0i64..24 * 60, status in active_status()) {
        let now = check_in().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minutes);
        let decision = CancellationPolicy::default().evaluate(check_in(), now, status);
        prop_assert!(!decision.eligible);
        prop_assert_eq!(decision.tier, RefundTier::Blocked);
    }

    // Refund never exceeds the total
    #[test]
    fn refund_bounded_by_total(now in now_strategy(), total in 0u64..10_000_000_000) {
        let decision = CancellationPolicy::default()
            .evaluate(check_in(), now, ReservationStatus::Confirmed);
        prop_assert!(decision.refund_amount(Money::new(total)) <= Money::new(total));
    }
}
