//! Integer money amounts.
//!
//! Prices are carried as whole minor currency units. Nothing in the engine
//! touches floating point, so recomputing a quote any number of times gives
//! the same figure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount of money in minor currency units.
///
/// # Examples
///
/// ```
/// use staybook::Money;
///
/// let nightly = Money::new(100_000);
/// let stay = nightly.checked_mul(3).unwrap();
/// assert_eq!(stay, Money::new(300_000));
/// assert_eq!(stay.to_string(), "300,000");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiplies by an integer factor, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: u64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Returns `rate` percent of the amount, rounded down.
    ///
    /// Rates above 100 are treated as 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::Money;
    ///
    /// assert_eq!(Money::new(360_000).percent(50), Money::new(180_000));
    /// assert_eq!(Money::new(99).percent(50), Money::new(49));
    /// ```
    #[must_use]
    pub fn percent(self, rate: u8) -> Self {
        let rate = u128::from(rate.min(100));
        let scaled = u128::from(self.0) * rate / 100;
        // scaled <= self.0, so it always fits back into u64
        Self(u64::try_from(scaled).unwrap_or(self.0))
    }

    /// Converts to the signed representation used by the store.
    pub(crate) fn to_sql(self) -> crate::Result<i64> {
        i64::try_from(self.0).map_err(|_| crate::Error::amount_overflow("amount"))
    }

    /// Converts from the signed representation used by the store.
    pub(crate) fn from_sql(value: i64) -> Option<Self> {
        u64::try_from(value).ok().map(Self)
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        f.write_str(&grouped)
    }
}
