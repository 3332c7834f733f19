//! Interfaces to the systems the booking engine depends on.
//!
//! The engine never owns rooms, storage, payments or identities. It reaches
//! them through these traits, so the calculators stay pure and the
//! operations can be exercised against in-memory or mock implementations.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::lifecycle::ActorRole;
use crate::money::Money;
use crate::pricing::{RoomId, RoomOfferingSnapshot};
use crate::reservation::{
    NewReservation, PaymentStatus, Reservation, ReservationId, ReservationStatus, UserId,
};

/// Read-only access to room offerings.
#[cfg_attr(test, mockall::automock)]
pub trait RoomCatalog {
    /// Returns the current offering for a room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomUnavailable`] if the room does not exist, or
    /// [`Error::UpstreamFailure`] if the catalog cannot be read.
    fn room_offering(&self, id: &RoomId) -> Result<RoomOfferingSnapshot>;

    /// Returns every offering in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamFailure`] if the catalog cannot be read.
    fn rooms(&self) -> Result<Vec<RoomOfferingSnapshot>>;
}

/// A status write guarded by the status it expects to replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// The status the reservation must still be in.
    pub from: ReservationStatus,
    /// The new status.
    pub to: ReservationStatus,
    /// A payment status to write in the same update.
    pub payment_status: Option<PaymentStatus>,
    /// A reason recorded with the change.
    pub reason: Option<String>,
    /// When the change happens.
    pub changed_at: NaiveDateTime,
}

/// A payment status write guarded by the status it expects to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentChange {
    /// The payment status the reservation must still be in.
    pub from: PaymentStatus,
    /// The new payment status.
    pub to: PaymentStatus,
    /// When the change happens.
    pub changed_at: NaiveDateTime,
}

/// One page of a listing, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Largest accepted page size.
    pub const MAX_SIZE: u32 = 500;

    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `number` is 0 or `size` is outside
    /// `1..=MAX_SIZE`.
    pub fn new(number: u32, size: u32) -> Result<Self> {
        if number == 0 {
            return Err(Error::Validation {
                field: "page".to_string(),
                message: "pages are numbered from 1".to_string(),
            });
        }
        if size == 0 || size > Self::MAX_SIZE {
            return Err(Error::Validation {
                field: "page_size".to_string(),
                message: format!("must be between 1 and {}", Self::MAX_SIZE),
            });
        }
        Ok(Self { number, size })
    }

    /// Returns the page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of items before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.number as u64 - 1) * self.size as u64
    }
}

/// A page of results plus the total count across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number, from 1.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Number of matching items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Returns the number of pages needed for `total` items.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }
}

/// Persistent storage of reservations.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore {
    /// Stores a new Pending reservation and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomUnavailable`] if an active reservation for the
    /// same room overlaps the stay.
    fn create(&self, new: &NewReservation) -> Result<Reservation>;

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Applies a guarded status change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id and
    /// [`Error::ReservationConflict`] if the status no longer matches.
    fn update_status(&self, id: ReservationId, change: &StatusChange) -> Result<Reservation>;

    /// Applies a guarded payment status change, followed in the same
    /// transaction by an optional guarded status change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id and
    /// [`Error::ReservationConflict`] if either guard no longer matches, in
    /// which case neither change is written.
    fn update_payment_status(
        &self,
        id: ReservationId,
        change: &PaymentChange,
        then: Option<StatusChange>,
    ) -> Result<Reservation>;

    /// Cancels a reservation, requesting its refund from `payments` while
    /// the status guard is held.
    ///
    /// The refund is requested only after the guard has matched, and the
    /// status change becomes visible only once the refund is accepted. If the
    /// refund is refused nothing is written.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for an unknown id
    /// - [`Error::ReservationConflict`] if the status no longer matches; no
    ///   refund is requested
    /// - whatever `payments` returns when it refuses the refund
    fn cancel(
        &self,
        id: ReservationId,
        change: &StatusChange,
        refund: Option<RefundRequest>,
        payments: &dyn PaymentCollaborator,
    ) -> Result<Cancellation>;

    /// Lists a guest's reservations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_by_user(
        &self,
        user: &UserId,
        status: Option<ReservationStatus>,
        page: PageRequest,
    ) -> Result<Page<Reservation>>;

    /// Lists every reservation in a status, ordered by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>>;
}

/// A refund to be issued for a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundRequest {
    /// The cancelled reservation.
    pub reservation_id: ReservationId,
    /// The amount to return.
    pub amount: Money,
    /// When the refund was requested.
    pub requested_at: NaiveDateTime,
}

/// Acknowledgement of an accepted refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundTicket {
    /// Identifier assigned by the payment side.
    pub ticket_id: i64,
    /// The cancelled reservation.
    pub reservation_id: ReservationId,
    /// The amount accepted for refund.
    pub amount: Money,
    /// When the refund was requested.
    pub requested_at: NaiveDateTime,
}

/// A committed cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    /// The reservation as written.
    pub reservation: Reservation,
    /// The accepted refund, if one was owed.
    pub refund: Option<RefundTicket>,
}

/// The payment side of a cancellation.
#[cfg_attr(test, mockall::automock)]
pub trait PaymentCollaborator {
    /// Requests a refund.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamFailure`] if the refund is not accepted.
    fn request_refund(&self, request: &RefundRequest) -> Result<RefundTicket>;

    /// Lists refunds issued for a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the refund records cannot be read.
    fn refunds_for(&self, reservation_id: ReservationId) -> Result<Vec<RefundTicket>>;
}

/// Maps users to the role they act in.
#[cfg_attr(test, mockall::automock)]
pub trait RoleDirectory {
    /// Returns the role of a user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamFailure`] if the directory cannot be reached.
    fn role_of(&self, user: &UserId) -> Result<ActorRole>;
}

/// Roles taken from configuration: listed admins, the system user, and
/// guests for everyone else.
///
/// # Examples
///
/// ```
/// use staybook::{ActorRole, ConfiguredRoles, RoleDirectory, UserId};
///
/// let roles = ConfiguredRoles::new(["frontdesk"]);
/// let role = |name: &str| roles.role_of(&UserId::new(name).unwrap()).unwrap();
/// assert_eq!(role("frontdesk"), ActorRole::Admin);
/// assert_eq!(role("alice"), ActorRole::Guest);
/// assert_eq!(role("system"), ActorRole::System);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRoles {
    admins: BTreeSet<String>,
}

impl ConfiguredRoles {
    /// Creates a directory with the given admin ids.
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            admins: admins
                .into_iter()
                .map(|a| a.as_ref().trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }
}

impl RoleDirectory for ConfiguredRoles {
    fn role_of(&self, user: &UserId) -> Result<ActorRole> {
        if user == &UserId::system() {
            return Ok(ActorRole::System);
        }
        if self.admins.contains(user.as_str()) {
            return Ok(ActorRole::Admin);
        }
        Ok(ActorRole::Guest)
    }
}
