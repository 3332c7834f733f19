//! Property-based tests for quote composition.

use super::{compose_quote, OptionSelection, RoomOfferingSnapshot};
use crate::{DateRange, Money};
use chrono::NaiveDate;
use proptest::prelude::*;

fn room(nightly: u64, breakfast: u64, parking: u64) -> RoomOfferingSnapshot {
    RoomOfferingSnapshot::new("101", Money::new(nightly), 4)
        .with_option("breakfast", "Breakfast", Money::new(breakfast))
        .with_option("parking", "Parking", Money::new(parking))
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // total is always room_subtotal + options_subtotal
    #[test]
    fn total_is_sum_of_parts(
        nightly in 0u64..1_000_000,
        breakfast in 0u64..100_000,
        parking in 0u64..100_000,
        nights in 1u32..60,
        qb in 0i64..5,
        qp in 0i64..5,
    ) {
        let range = DateRange::for_nights(start(), nights).unwrap();
        let selection = OptionSelection::from_pairs([("breakfast", qb), ("parking", qp)]).unwrap();
        let quote = compose_quote(&room(nightly, breakfast, parking), &range, &selection).unwrap();

        prop_assert_eq!(quote.nights(), nights);
        prop_assert_eq!(quote.room_subtotal().minor_units(), nightly * u64::from(nights));
        let line_sum: u64 = quote.lines().iter().map(|l| l.amount.minor_units()).sum();
        prop_assert_eq!(quote.options_subtotal().minor_units(), line_sum);
        prop_assert_eq!(
            quote.total().minor_units(),
            quote.room_subtotal().minor_units() + quote.options_subtotal().minor_units()
        );
    }

    // Recomputing with the same inputs gives the same quote
    #[test]
    fn deterministic(nightly in 0u64..1_000_000, nights in 1u32..60, qb in 0i64..5) {
        let range = DateRange::for_nights(start(), nights).unwrap();
        let selection = OptionSelection::from_pairs([("breakfast", qb)]).unwrap();
        let snapshot = room(nightly, 1_500, 500);
        let first = compose_quote(&snapshot, &range, &selection).unwrap();
        let second = compose_quote(&snapshot, &range, &selection).unwrap();
        prop_assert_eq!(first, second);
    }

    // One more night adds exactly one night of room and options
    #[test]
    fn monotone_in_nights(
        nightly in 0u64..1_000_000,
        nights in 1u32..60,
        qb in 0i64..5,
        qp in 0i64..5,
    ) {
        let (breakfast, parking) = (1_500u64, 500u64);
        let snapshot = room(nightly, breakfast, parking);
        let selection = OptionSelection::from_pairs([("breakfast", qb), ("parking", qp)]).unwrap();
        let shorter = DateRange::for_nights(start(), nights).unwrap();
        let longer = DateRange::for_nights(start(), nights + 1).unwrap();
        let a = compose_quote(&snapshot, &shorter, &selection).unwrap();
        let b = compose_quote(&snapshot, &longer, &selection).unwrap();

        let per_night = nightly
            + breakfast * u64::try_from(qb).unwrap()
            + parking * u64::try_from(qp).unwrap();
        prop_assert_eq!(b.total().minor_units(), a.total().minor_units() + per_night);
        if per_night > 0 {
            prop_assert!(b.total() > a.total());
        }
    }

    // One more unit of an option adds its price for every night
    #[test]
    fn monotone_in_quantity(price in 0u64..100_000, nights in 1u32..60, q in 0i64..10) {
        let snapshot = room(10_000, price, 0);
        let range = DateRange::for_nights(start(), nights).unwrap();
        let fewer = OptionSelection::from_pairs([("breakfast", q)]).unwrap();
        let more = OptionSelection::from_pairs([("breakfast", q + 1)]).unwrap();
        let a = compose_quote(&snapshot, &range, &fewer).unwrap();
        let b = compose_quote(&snapshot, &range, &more).unwrap();

        prop_assert_eq!(
            b.total().minor_units(),
            a.total().minor_units() + price * u64::from(nights)
        );
        if price > 0 {
            prop_assert!(b.total() > a.total());
        } else {
            prop_assert_eq!(b.total(), a.total());
        }
    }

    // Negative quantities never get past parsing
    #[test]
    fn negative_quantities_rejected(q in i64::MIN..0) {
        prop_assert!(OptionSelection::from_pairs([("breakfast", q)]).is_err());
    }
}
