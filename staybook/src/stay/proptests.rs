//! Property-based tests for stay calculation.

use super::{adjust_check_out, compute_nights, DateRange};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

// Dates between 2000-01-01 and roughly 2080
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..30_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Valid ranges always have at least one night and match the day offset
    #[test]
    fn nights_match_offset(check_in in date_strategy(), nights in 1u32..400) {
        let check_out = check_in.checked_add_days(Days::new(u64::from(nights))).unwrap();
        prop_assert_eq!(compute_nights(check_in, check_out).unwrap(), nights);
    }

    // Anything not strictly after check-in is rejected
    #[test]
    fn non_positive_ranges_rejected(a in date_strategy(), b in date_strategy()) {
        let result = compute_nights(a, b);
        prop_assert_eq!(result.is_ok(), b > a);
        if let Ok(n) = result {
            prop_assert!(n >= 1);
        }
    }

    // Overlap is symmetric
    #[test]
    fn overlap_symmetric(
        a in date_strategy(), an in 1u32..30,
        b in date_strategy(), bn in 1u32..30,
    ) {
        let first = DateRange::for_nights(a, an).unwrap();
        let second = DateRange::for_nights(b, bn).unwrap();
        prop_assert_eq!(first.overlaps(&second), second.overlaps(&first));
    }

    // Adjusted check-out always yields a valid range
    #[test]
    fn adjusted_check_out_is_valid(check_in in date_strategy(), check_out in date_strategy()) {
        let adjusted = adjust_check_out(check_in, check_out);
        prop_assert!(DateRange::new(check_in, adjusted).is_ok());
        if check_out > check_in {
            prop_assert_eq!(adjusted, check_out);
        }
    }
}
