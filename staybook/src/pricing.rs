//! Price composition.
//!
//! A [`Quote`] is computed from a room snapshot, a [`DateRange`] and an
//! [`OptionSelection`]:
//!
//! - `room_subtotal = nightly_price × nights`
//! - `options_subtotal = Σ option price × quantity × nights`
//! - `total = room_subtotal + options_subtotal`
//!
//! All amounts are integer [`Money`]; overflow is reported, never wrapped.
//! A quote is never modified after it is built; changing the stay or the
//! selection means composing a new one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::money::Money;
use crate::stay::DateRange;

#[cfg(test)]
mod proptests;

/// Identifier of a bookable room.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a room identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a room add-on such as breakfast.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Creates an option identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An add-on a room offers, priced per unit per night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionOffering {
    /// Option identifier, unique within its room.
    pub id: OptionId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Price per unit per night.
    pub price: Money,
}

fn default_bookable() -> bool {
    true
}

/// The read-only view of a room that pricing works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomOfferingSnapshot {
    /// Room identifier.
    pub id: RoomId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Base price per night.
    pub nightly_price: Money,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Add-ons offered with this room.
    #[serde(default)]
    pub options: Vec<OptionOffering>,
    /// Whether the room currently accepts bookings.
    #[serde(default = "default_bookable")]
    pub bookable: bool,
}

impl RoomOfferingSnapshot {
    /// Creates a bookable snapshot without options.
    #[must_use]
    pub fn new(id: impl Into<String>, nightly_price: Money, capacity: u32) -> Self {
        Self {
            id: RoomId::new(id),
            name: String::new(),
            nightly_price,
            capacity,
            options: Vec::new(),
            bookable: true,
        }
    }

    /// Adds an option offering.
    #[must_use]
    pub fn with_option(mut self, id: &str, name: &str, price: Money) -> Self {
        self.options.push(OptionOffering {
            id: OptionId::new(id),
            name: name.to_string(),
            price,
        });
        self
    }

    /// Looks up an option by id.
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&OptionOffering> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Checks the snapshot's own invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty id, zero capacity, or a
    /// repeated option id.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(Error::Validation {
                field: "rooms.id".to_string(),
                message: "room id cannot be empty".to_string(),
            });
        }
        if self.capacity == 0 {
            return Err(Error::Validation {
                field: format!("rooms.{}.capacity", self.id),
                message: "capacity must be at least 1".to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for option in &self.options {
            if !seen.insert(&option.id) {
                return Err(Error::Validation {
                    field: format!("rooms.{}.options", self.id),
                    message: format!("duplicate option id '{}'", option.id),
                });
            }
        }
        Ok(())
    }
}

/// Requested add-on quantities, keyed by option id.
///
/// Quantities are unsigned; negative input is rejected when parsed.
///
/// # Examples
///
/// ```
/// use staybook::OptionSelection;
///
/// let mut selection = OptionSelection::new();
/// selection.increment("breakfast".into());
/// selection.increment("breakfast".into());
/// selection.decrement("breakfast".into());
/// assert_eq!(selection.quantity(&"breakfast".into()), 1);
///
/// selection.decrement("breakfast".into());
/// selection.decrement("breakfast".into());
/// assert_eq!(selection.quantity(&"breakfast".into()), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSelection(BTreeMap<OptionId, u32>);

impl OptionSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from raw `(id, quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptionSelection`] for a negative quantity,
    /// a quantity too large to represent, or an id listed twice.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for (id, quantity) in pairs {
            let id = OptionId::new(id);
            let quantity = checked_quantity(&id, quantity)?;
            if selection.0.insert(id.clone(), quantity).is_some() {
                return Err(Error::InvalidOptionSelection {
                    option_id: id.to_string(),
                    reason: "option listed more than once".to_string(),
                });
            }
        }
        Ok(selection)
    }

    /// Parses a single `id=quantity` entry; a bare `id` means quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptionSelection`] when the id is empty or the
    /// quantity is not a non-negative integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::OptionSelection;
    ///
    /// let (id, qty) = OptionSelection::parse_entry("breakfast=2").unwrap();
    /// assert_eq!((id.as_str(), qty), ("breakfast", 2));
    /// assert!(OptionSelection::parse_entry("breakfast=-1").is_err());
    /// ```
    pub fn parse_entry(entry: &str) -> Result<(OptionId, u32)> {
        let (id, quantity) = match entry.split_once('=') {
            Some((id, qty)) => (id.trim(), Some(qty.trim())),
            None => (entry.trim(), None),
        };
        if id.is_empty() {
            return Err(Error::InvalidOptionSelection {
                option_id: entry.to_string(),
                reason: "option id cannot be empty".to_string(),
            });
        }
        let id = OptionId::new(id);
        let quantity = match quantity {
            None => 1,
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| Error::InvalidOptionSelection {
                    option_id: id.to_string(),
                    reason: format!("quantity '{raw}' is not an integer"),
                })?;
                checked_quantity(&id, value)?
            }
        };
        Ok((id, quantity))
    }

    /// Sets the quantity for an option, replacing any earlier value.
    pub fn set(&mut self, id: OptionId, quantity: u32) {
        self.0.insert(id, quantity);
    }

    /// Adds one unit of an option.
    pub fn increment(&mut self, id: OptionId) {
        let entry = self.0.entry(id).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    /// Removes one unit of an option, stopping at zero.
    pub fn decrement(&mut self, id: OptionId) {
        if let Some(quantity) = self.0.get_mut(&id) {
            *quantity = quantity.saturating_sub(1);
        }
    }

    /// Returns the selected quantity for an option, zero if absent.
    #[must_use]
    pub fn quantity(&self, id: &OptionId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Iterates over entries with a positive quantity.
    pub fn selected(&self) -> impl Iterator<Item = (&OptionId, u32)> {
        self.0.iter().filter(|(_, q)| **q > 0).map(|(id, q)| (id, *q))
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected().next().is_none()
    }
}

fn checked_quantity(id: &OptionId, quantity: i64) -> Result<u32> {
    if quantity < 0 {
        return Err(Error::InvalidOptionSelection {
            option_id: id.to_string(),
            reason: format!("quantity {quantity} is negative"),
        });
    }
    u32::try_from(quantity).map_err(|_| Error::InvalidOptionSelection {
        option_id: id.to_string(),
        reason: format!("quantity {quantity} is too large"),
    })
}

/// One priced add-on within a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    /// The option priced on this line.
    pub option_id: OptionId,
    /// Display name of the option.
    pub name: String,
    /// Price per unit per night at quote time.
    pub unit_price: Money,
    /// Selected quantity.
    pub quantity: u32,
    /// `unit_price × quantity × nights`.
    pub amount: Money,
}

/// A price estimate for one stay in one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    room_id: RoomId,
    range: DateRange,
    nights: u32,
    nightly_price: Money,
    room_subtotal: Money,
    options_subtotal: Money,
    total: Money,
    lines: Vec<QuoteLine>,
}

impl Quote {
    /// Returns the quoted room.
    #[must_use]
    pub const fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns the quoted stay.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Returns the number of nights.
    #[must_use]
    pub const fn nights(&self) -> u32 {
        self.nights
    }

    /// Returns the room's base price per night at quote time.
    #[must_use]
    pub const fn nightly_price(&self) -> Money {
        self.nightly_price
    }

    /// Returns `nightly_price × nights`.
    #[must_use]
    pub const fn room_subtotal(&self) -> Money {
        self.room_subtotal
    }

    /// Returns the sum of all option lines.
    #[must_use]
    pub const fn options_subtotal(&self) -> Money {
        self.options_subtotal
    }

    /// Returns the total price.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Returns one line per selected option.
    #[must_use]
    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }
}

/// Composes a quote for a stay.
///
/// Zero-quantity entries are ignored, even for ids the room does not offer.
///
/// # Errors
///
/// - [`Error::InvalidOptionSelection`] if a positive quantity names an
///   option the room does not offer
/// - [`Error::Validation`] if an amount overflows
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::{compose_quote, DateRange, Money, OptionSelection, RoomOfferingSnapshot};
///
/// let room = RoomOfferingSnapshot::new("101", Money::new(100_000), 2)
///     .with_option("breakfast", "Breakfast", Money::new(15_000));
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let range = DateRange::new(d(1), d(4)).unwrap();
/// let selection = OptionSelection::from_pairs([("breakfast", 2)]).unwrap();
///
/// let quote = compose_quote(&room, &range, &selection).unwrap();
/// assert_eq!(quote.room_subtotal(), Money::new(300_000));
/// assert_eq!(quote.options_subtotal(), Money::new(90_000));
/// assert_eq!(quote.total(), Money::new(390_000));
/// ```
pub fn compose_quote(
    snapshot: &RoomOfferingSnapshot,
    range: &DateRange,
    selection: &OptionSelection,
) -> Result<Quote> {
    let nights = range.nights();
    let room_subtotal = snapshot
        .nightly_price
        .checked_mul(u64::from(nights))
        .ok_or_else(|| Error::amount_overflow("room_subtotal"))?;

    let mut lines = Vec::new();
    let mut options_subtotal = Money::ZERO;
    for (id, quantity) in selection.selected() {
        let offering = snapshot
            .option(id)
            .ok_or_else(|| Error::InvalidOptionSelection {
                option_id: id.to_string(),
                reason: format!("not offered by room {}", snapshot.id),
            })?;
        let amount = offering
            .price
            .checked_mul(u64::from(quantity))
            .and_then(|m| m.checked_mul(u64::from(nights)))
            .ok_or_else(|| Error::amount_overflow("options_subtotal"))?;
        options_subtotal = options_subtotal
            .checked_add(amount)
            .ok_or_else(|| Error::amount_overflow("options_subtotal"))?;
        lines.push(QuoteLine {
            option_id: id.clone(),
            name: offering.name.clone(),
            unit_price: offering.price,
            quantity,
            amount,
        });
    }

    let total = room_subtotal
        .checked_add(options_subtotal)
        .ok_or_else(|| Error::amount_overflow("total"))?;

    Ok(Quote {
        room_id: snapshot.id.clone(),
        range: *range,
        nights,
        nightly_price: snapshot.nightly_price,
        room_subtotal,
        options_subtotal,
        total,
        lines,
    })
}

/// Checks a guest count against the room's capacity.
///
/// # Errors
///
/// Returns [`Error::Validation`] on field `guests` when the count is zero
/// or above capacity.
pub fn check_capacity(snapshot: &RoomOfferingSnapshot, guests: u32) -> Result<()> {
    if guests == 0 {
        return Err(Error::Validation {
            field: "guests".to_string(),
            message: "at least one guest is required".to_string(),
        });
    }
    if guests > snapshot.capacity {
        return Err(Error::Validation {
            field: "guests".to_string(),
            message: format!(
                "{guests} guests exceed the capacity of room {} ({})",
                snapshot.id, snapshot.capacity
            ),
        });
    }
    Ok(())
}
