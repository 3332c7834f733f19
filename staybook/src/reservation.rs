//! Reservation records.
//!
//! A reservation captures the quoted price at creation and never recomputes
//! it. Its status and payment status move only through the transitions in
//! [`crate::lifecycle`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::{OptionId, Quote, RoomId};
use crate::stay::DateRange;

/// Reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed by the hotel.
    Confirmed,
    /// Cancelled by the guest.
    Cancelled,
    /// Rejected by an administrator.
    Rejected,
    /// The stay took place.
    Completed,
    /// The guest never arrived.
    NoShow,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Rejected,
        Self::Completed,
        Self::NoShow,
    ];

    /// Returns the stored name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
            Self::NoShow => "NO_SHOW",
        }
    }

    /// Returns true while the reservation still holds the room.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Returns true once no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status '{s}'"),
            })
    }
}

/// Payment status, tracked alongside the reservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// No payment recorded yet.
    Pending,
    /// Payment succeeded.
    Completed,
    /// Payment attempt failed.
    Failed,
    /// No money was taken and the reservation was cancelled.
    Cancelled,
    /// Money was taken and returned.
    Refunded,
}

impl PaymentStatus {
    /// Every payment status.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Returns the stored name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError {
                field: "payment_status".into(),
                message: format!("unknown payment status '{s}'"),
            })
    }
}

/// Store-assigned reservation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a guest or staff member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    const SYSTEM: &'static str = "system";

    /// Creates a user id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty after trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::UserId;
    ///
    /// assert_eq!(UserId::new("  alice ").unwrap().as_str(), "alice");
    /// assert!(UserId::new("   ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "user".into(),
                message: "user id must be non-empty after trimming whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identity used for automated transitions.
    #[must_use]
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An add-on locked into a reservation at the price quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedOption {
    /// The option identifier.
    pub option_id: OptionId,
    /// Display name at booking time.
    pub name: String,
    /// Per-unit nightly price at booking time.
    pub unit_price: Money,
    /// Booked quantity.
    pub quantity: u32,
}

/// A reservation about to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReservation {
    /// The guest who owns the reservation.
    pub user_id: UserId,
    /// The booked room.
    pub room_id: RoomId,
    /// The booked stay.
    pub range: DateRange,
    /// Add-ons with their locked prices.
    pub options: Vec<ConfirmedOption>,
    /// The quoted total.
    pub total_price: Money,
    /// When the booking was made.
    pub created_at: NaiveDateTime,
}

impl NewReservation {
    /// Captures a quote as a new reservation for `user_id`.
    #[must_use]
    pub fn from_quote(user_id: UserId, quote: &Quote, created_at: NaiveDateTime) -> Self {
        let options = quote
            .lines()
            .iter()
            .map(|line| ConfirmedOption {
                option_id: line.option_id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();
        Self {
            user_id,
            room_id: quote.room_id().clone(),
            range: *quote.range(),
            options,
            total_price: quote.total(),
            created_at,
        }
    }
}

/// A stored reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::{DateRange, Money, Reservation, ReservationId, ReservationStatus, RoomId, UserId};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let created = d(1).and_hms_opt(12, 0, 0).unwrap();
/// let reservation = Reservation::builder(
///     ReservationId::new(1),
///     UserId::new("alice").unwrap(),
///     RoomId::new("101"),
///     DateRange::new(d(10), d(12)).unwrap(),
///     Money::new(200_000),
///     created,
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(reservation.status(), ReservationStatus::Pending);
/// assert_eq!(reservation.updated_at(), created);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    id: ReservationId,
    user_id: UserId,
    room_id: RoomId,
    range: DateRange,
    options: Vec<ConfirmedOption>,
    total_price: Money,
    status: ReservationStatus,
    payment_status: PaymentStatus,
    status_reason: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Reservation {
    /// Creates a reservation builder with Pending status and payment.
    #[must_use]
    pub fn builder(
        id: ReservationId,
        user_id: UserId,
        room_id: RoomId,
        range: DateRange,
        total_price: Money,
        created_at: NaiveDateTime,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            user_id,
            room_id,
            range,
            options: Vec::new(),
            total_price,
            status: ReservationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            status_reason: None,
            created_at,
            updated_at: None,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the owning guest.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns the booked stay.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Returns the booked add-ons.
    #[must_use]
    pub fn options(&self) -> &[ConfirmedOption] {
        &self.options
    }

    /// Returns the price captured at booking time.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the reservation status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the reason recorded with the last status change, if any.
    #[must_use]
    pub fn status_reason(&self) -> Option<&str> {
        self.status_reason.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the timestamp of the last change.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Returns true if `user` owns this reservation.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }
}

/// Builder for [`Reservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    user_id: UserId,
    room_id: RoomId,
    range: DateRange,
    options: Vec<ConfirmedOption>,
    total_price: Money,
    status: ReservationStatus,
    payment_status: PaymentStatus,
    status_reason: Option<String>,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

impl ReservationBuilder {
    /// Sets the booked add-ons.
    #[must_use]
    pub fn options(mut self, options: Vec<ConfirmedOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the reservation status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the payment status.
    #[must_use]
    pub const fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Sets the status reason, trimmed.
    #[must_use]
    pub fn status_reason(mut self, reason: Option<String>) -> Self {
        self.status_reason = reason.map(|r| r.trim().to_string());
        self
    }

    /// Sets the last-changed timestamp. Defaults to the creation time.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: NaiveDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A status reason is given but is empty after trimming
    /// - The status is Rejected without a reason
    /// - `updated_at` is before `created_at`
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if let Some(ref reason) = self.status_reason {
            if reason.is_empty() {
                return Err(ValidationError {
                    field: "status_reason".into(),
                    message: "reason must be non-empty after trimming whitespace".into(),
                });
            }
        }

        if self.status == ReservationStatus::Rejected && self.status_reason.is_none() {
            return Err(ValidationError {
                field: "status_reason".into(),
                message: "a rejected reservation must carry a reason".into(),
            });
        }

        let updated_at = self.updated_at.unwrap_or(self.created_at);
        if updated_at < self.created_at {
            return Err(ValidationError {
                field: "updated_at".into(),
                message: "last change cannot precede creation".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            user_id: self.user_id,
            room_id: self.room_id,
            range: self.range,
            options: self.options,
            total_price: self.total_price,
            status: self.status,
            payment_status: self.payment_status,
            status_reason: self.status_reason,
            created_at: self.created_at,
            updated_at,
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
