//! Stay calculation.
//!
//! A stay is a half-open range of calendar dates: the guest sleeps the
//! night of every date from check-in up to, but not including, check-out.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;

/// A well-formed check-in/check-out pair.
///
/// Construction guarantees `check_out > check_in`, so a `DateRange` always
/// covers at least one night.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::DateRange;
///
/// let check_in = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let check_out = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
/// let range = DateRange::new(check_in, check_out).unwrap();
/// assert_eq!(range.nights(), 3);
///
/// assert!(DateRange::new(check_out, check_in).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.check_in, raw.check_out)
    }
}

impl DateRange {
    /// Creates a date range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(Error::InvalidDateRange {
                check_in,
                check_out,
                reason: "check-out must be after check-in".to_string(),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Creates a range covering `nights` nights from `check_in`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] if `nights` is zero or the
    /// check-out date falls outside the supported calendar.
    pub fn for_nights(check_in: NaiveDate, nights: u32) -> Result<Self> {
        let check_out = check_in
            .checked_add_days(Days::new(u64::from(nights)))
            .unwrap_or(check_in);
        Self::new(check_in, check_out)
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights, always at least 1.
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        // chrono dates span fewer than u32::MAX days
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Returns true if both stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if `date` is one of the nights of this stay.
    #[must_use]
    pub fn contains_night(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Computes the number of nights between two dates.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] if `check_out <= check_in`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::stay::compute_nights;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// assert_eq!(compute_nights(d(1), d(2)).unwrap(), 1);
/// assert!(compute_nights(d(2), d(2)).is_err());
/// ```
pub fn compute_nights(check_in: NaiveDate, check_out: NaiveDate) -> Result<u32> {
    DateRange::new(check_in, check_out).map(|range| range.nights())
}

/// Checks that a new booking does not start in the past.
///
/// Stored reservations are never re-validated against today; this check
/// applies only when a quote or booking is first requested.
///
/// # Errors
///
/// Returns [`Error::InvalidDateRange`] if check-in is before `today`.
pub fn validate_new_booking(range: &DateRange, today: NaiveDate) -> Result<()> {
    if range.check_in() < today {
        return Err(Error::InvalidDateRange {
            check_in: range.check_in(),
            check_out: range.check_out(),
            reason: format!("check-in is before today ({today})"),
        });
    }
    Ok(())
}

/// Moves check-out to the day after check-in when it no longer follows it.
///
/// This is the adjustment a guest sees after changing the check-in date
/// past the previously chosen check-out.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::stay::adjust_check_out;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// assert_eq!(adjust_check_out(d(5), d(3)), d(6));
/// assert_eq!(adjust_check_out(d(5), d(8)), d(8));
/// ```
#[must_use]
pub fn adjust_check_out(check_in: NaiveDate, check_out: NaiveDate) -> NaiveDate {
    if check_out > check_in {
        return check_out;
    }
    check_in.checked_add_days(Days::new(1)).unwrap_or(check_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_three_night_stay() {
        assert_eq!(compute_nights(d(2025, 6, 1), d(2025, 6, 4)).unwrap(), 3);
    }

    #[test]
    fn test_same_day_is_invalid() {
        let err = compute_nights(d(2025, 6, 1), d(2025, 6, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange { .. }));
    }

    #[test]
    fn test_reversed_dates_are_invalid() {
        assert!(DateRange::new(d(2025, 6, 4), d(2025, 6, 1)).is_err());
    }

    #[test]
    fn test_month_and_leap_boundaries() {
        assert_eq!(compute_nights(d(2024, 2, 28), d(2024, 3, 1)).unwrap(), 2);
        assert_eq!(compute_nights(d(2025, 2, 28), d(2025, 3, 1)).unwrap(), 1);
        assert_eq!(compute_nights(d(2024, 12, 31), d(2025, 1, 2)).unwrap(), 2);
    }

    #[test]
    fn test_for_nights() {
        let range = DateRange::for_nights(d(2025, 6, 1), 2).unwrap();
        assert_eq!(range.check_out(), d(2025, 6, 3));
        assert!(DateRange::for_nights(d(2025, 6, 1), 0).is_err());
    }

    #[test]
    fn test_new_booking_in_past_rejected() {
        let range = DateRange::new(d(2025, 5, 30), d(2025, 6, 2)).unwrap();
        let err = validate_new_booking(&range, d(2025, 6, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange { .. }));
    }

    #[test]
    fn test_new_booking_today_accepted() {
        let range = DateRange::new(d(2025, 6, 1), d(2025, 6, 2)).unwrap();
        assert!(validate_new_booking(&range, d(2025, 6, 1)).is_ok());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = DateRange::new(d(2025, 6, 1), d(2025, 6, 4)).unwrap();
        let back_to_back = DateRange::new(d(2025, 6, 4), d(2025, 6, 6)).unwrap();
        let inside = DateRange::new(d(2025, 6, 2), d(2025, 6, 3)).unwrap();
        assert!(!a.overlaps(&back_to_back));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_contains_night() {
        let a = DateRange::new(d(2025, 6, 1), d(2025, 6, 3)).unwrap();
        assert!(a.contains_night(d(2025, 6, 1)));
        assert!(a.contains_night(d(2025, 6, 2)));
        assert!(!a.contains_night(d(2025, 6, 3)));
    }

    #[test]
    fn test_adjust_check_out_same_day() {
        assert_eq!(adjust_check_out(d(2025, 6, 5), d(2025, 6, 5)), d(2025, 6, 6));
    }

    #[test]
    fn test_display() {
        let a = DateRange::new(d(2025, 6, 1), d(2025, 6, 3)).unwrap();
        assert_eq!(a.to_string(), "2025-06-01..2025-06-03");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: DateRange =
            serde_json::from_str(r#"{"check_in":"2025-06-01","check_out":"2025-06-03"}"#).unwrap();
        assert_eq!(ok.nights(), 2);

        let bad: std::result::Result<DateRange, _> =
            serde_json::from_str(r#"{"check_in":"2025-06-03","check_out":"2025-06-01"}"#);
        assert!(bad.is_err());
    }
}
