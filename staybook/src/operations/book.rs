//! Booking: turning a fresh quote into a Pending reservation.

use chrono::NaiveDateTime;

use crate::collaborators::RoomCatalog;
use crate::error::Result;
use crate::pricing::Quote;
use crate::reservation::{NewReservation, UserId};

use super::plan::{OperationPlan, PlanAction};
use super::quote::{prepare_quote, QuoteRequest};

/// Options for a booking.
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// The guest making the booking.
    pub user_id: UserId,

    /// What is being booked.
    pub request: QuoteRequest,

    /// When the booking is made.
    pub now: NaiveDateTime,
}

impl BookOptions {
    /// Creates booking options.
    #[must_use]
    pub const fn new(user_id: UserId, request: QuoteRequest, now: NaiveDateTime) -> Self {
        Self {
            user_id,
            request,
            now,
        }
    }
}

/// A booking plan generator.
///
/// The quote is always recomputed here; a total shown to the guest earlier
/// is never trusted. Overlap with other stays is checked by the store when
/// the reservation is written.
pub struct BookPlan<'a, C: ?Sized> {
    options: BookOptions,
    catalog: &'a C,
}

impl<'a, C: RoomCatalog + ?Sized> BookPlan<'a, C> {
    /// Creates a booking plan against a catalog.
    #[must_use]
    pub const fn new(options: BookOptions, catalog: &'a C) -> Self {
        Self { options, catalog }
    }

    /// Prices the stay and returns it with the plan that stores it.
    ///
    /// # Errors
    ///
    /// Returns anything [`prepare_quote`] reports.
    pub fn build_plan(&self) -> Result<(Quote, OperationPlan)> {
        let quote = prepare_quote(
            self.catalog,
            &self.options.request,
            self.options.now.date(),
        )?;

        let new = NewReservation::from_quote(self.options.user_id.clone(), &quote, self.options.now);
        let plan = OperationPlan::new(format!(
            "Book room {} for {}",
            quote.room_id(),
            self.options.user_id
        ))
        .add_action(PlanAction::CreateReservation(new));

        Ok((quote, plan))
    }
}
