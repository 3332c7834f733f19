//! Cancellation policy evaluation.
//!
//! Whether a guest may cancel, and how much comes back, depends only on the
//! number of days left until check-in and on the reservation status:
//!
//! | days until check-in      | refund        | eligible |
//! |--------------------------|---------------|----------|
//! | `>= full_refund_days`    | 100 %         | yes      |
//! | `>= partial_refund_days` | partial rate  | yes      |
//! | otherwise                | 0 %           | no       |
//!
//! Defaults are 3 days, 1 day and 50 %. Day 0 (same-day) is always blocked.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::ReservationStatus;

#[cfg(test)]
mod proptests;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Which refund band a cancellation falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundTier {
    /// Too close to check-in; cancellation is not self-service.
    Blocked,
    /// Partial refund.
    Partial,
    /// Full refund.
    Full,
}

impl fmt::Display for RefundTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blocked => "blocked",
            Self::Partial => "partial",
            Self::Full => "full",
        };
        f.write_str(name)
    }
}

/// Day thresholds and refund rate for guest cancellations.
///
/// # Examples
///
/// ```
/// use staybook::{CancellationPolicy, RefundTier};
///
/// let policy = CancellationPolicy::default();
/// assert_eq!(policy.tier_for(5), RefundTier::Full);
/// assert_eq!(policy.tier_for(1), RefundTier::Partial);
/// assert_eq!(policy.tier_for(0), RefundTier::Blocked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationPolicy {
    /// Minimum days before check-in for a full refund.
    pub full_refund_days: i64,
    /// Minimum days before check-in for a partial refund.
    pub partial_refund_days: i64,
    /// Percent refunded in the partial band.
    pub partial_refund_percent: u8,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            full_refund_days: 3,
            partial_refund_days: 1,
            partial_refund_percent: 50,
        }
    }
}

impl CancellationPolicy {
    /// Checks that the thresholds describe a sensible policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `partial_refund_days < 1`, if
    /// `full_refund_days <= partial_refund_days`, or if the partial rate
    /// exceeds 100.
    pub fn validate(&self) -> Result<()> {
        if self.partial_refund_days < 1 {
            return Err(Error::Validation {
                field: "cancellation.partial_refund_days".to_string(),
                message: "must be at least 1; same-day cancellation is never refunded".to_string(),
            });
        }
        if self.full_refund_days <= self.partial_refund_days {
            return Err(Error::Validation {
                field: "cancellation.full_refund_days".to_string(),
                message: format!(
                    "must be greater than partial_refund_days ({})",
                    self.partial_refund_days
                ),
            });
        }
        if self.partial_refund_percent > 100 {
            return Err(Error::Validation {
                field: "cancellation.partial_refund_percent".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the refund band for a number of days until check-in.
    #[must_use]
    pub const fn tier_for(&self, days_until_check_in: i64) -> RefundTier {
        if days_until_check_in >= self.full_refund_days {
            RefundTier::Full
        } else if days_until_check_in >= self.partial_refund_days {
            RefundTier::Partial
        } else {
            RefundTier::Blocked
        }
    }

    /// Returns the refund percentage for a band.
    #[must_use]
    pub const fn rate_for(&self, tier: RefundTier) -> u8 {
        match tier {
            RefundTier::Full => 100,
            RefundTier::Partial => self.partial_refund_percent,
            RefundTier::Blocked => 0,
        }
    }

    /// Evaluates a cancellation request under this policy.
    #[must_use]
    pub fn evaluate(
        &self,
        check_in: NaiveDate,
        now: NaiveDateTime,
        status: ReservationStatus,
    ) -> CancellationDecision {
        let days = days_until_check_in(check_in, now);
        let tier = self.tier_for(days);
        let eligible = status.is_active() && tier != RefundTier::Blocked;
        CancellationDecision {
            eligible,
            refund_rate: if eligible { self.rate_for(tier) } else { 0 },
            days_until_check_in: days,
            tier,
        }
    }
}

/// The outcome of evaluating a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDecision {
    /// Whether the guest may cancel.
    pub eligible: bool,
    /// Percent of the total refunded; 0 when not eligible.
    pub refund_rate: u8,
    /// Whole days until check-in, rounded up. Negative once check-in passed.
    pub days_until_check_in: i64,
    /// The band the day count falls in.
    pub tier: RefundTier,
}

impl CancellationDecision {
    /// Returns the refund owed on `total`, rounded down.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use staybook::{evaluate_cancellation, Money, ReservationStatus};
    ///
    /// let check_in = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
    /// let now = NaiveDate::from_ymd_opt(2025, 6, 2)
    ///     .unwrap()
    ///     .and_hms_opt(9, 0, 0)
    ///     .unwrap();
    /// let decision = evaluate_cancellation(check_in, now, ReservationStatus::Confirmed);
    /// assert_eq!(decision.days_until_check_in, 1);
    /// assert_eq!(decision.refund_amount(Money::new(360_000)), Money::new(180_000));
    /// ```
    #[must_use]
    pub fn refund_amount(&self, total: Money) -> Money {
        if self.eligible {
            total.percent(self.refund_rate)
        } else {
            Money::ZERO
        }
    }
}

/// Whole days from `now` until midnight at the start of `check_in`, rounded up.
///
/// Any remaining fraction of a day counts as a full day; a check-in earlier
/// today gives 0 and a past check-in gives a negative count.
#[must_use]
pub fn days_until_check_in(check_in: NaiveDate, now: NaiveDateTime) -> i64 {
    let millis = (check_in.and_time(NaiveTime::MIN) - now).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Evaluates a cancellation under the default policy.
#[must_use]
pub fn evaluate_cancellation(
    check_in: NaiveDate,
    now: NaiveDateTime,
    status: ReservationStatus,
) -> CancellationDecision {
    CancellationPolicy::default().evaluate(check_in, now, status)
}
