//! Quoting a stay against the live catalog.
//!
//! A quote is recomputed from scratch on every request. Changing the dates
//! or the selection means calling [`prepare_quote`] again.

use chrono::NaiveDate;

use crate::collaborators::RoomCatalog;
use crate::error::{Error, Result};
use crate::pricing::{check_capacity, compose_quote, OptionSelection, Quote, RoomId};
use crate::stay::{validate_new_booking, DateRange};

/// What a guest asks a price for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// The room to stay in.
    pub room_id: RoomId,

    /// The stay.
    pub range: DateRange,

    /// Selected options and their quantities.
    pub selection: OptionSelection,

    /// Number of guests, checked against capacity when given.
    pub guests: Option<u32>,
}

impl QuoteRequest {
    /// Creates a request with no options and no guest count.
    #[must_use]
    pub fn new(room_id: RoomId, range: DateRange) -> Self {
        Self {
            room_id,
            range,
            selection: OptionSelection::new(),
            guests: None,
        }
    }

    /// Sets the option selection.
    #[must_use]
    pub fn with_selection(mut self, selection: OptionSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the guest count.
    #[must_use]
    pub const fn with_guests(mut self, guests: Option<u32>) -> Self {
        self.guests = guests;
        self
    }
}

/// Prices a request against the room's current offering.
///
/// Checks run before any pricing: the stay must not start before `today`,
/// the room must accept bookings and the guest count must fit.
///
/// # Errors
///
/// - [`Error::InvalidDateRange`] if check-in is before `today`
/// - [`Error::RoomUnavailable`] if the room is unknown or not bookable
/// - [`Error::Validation`] on `guests` if the party does not fit
/// - [`Error::InvalidOptionSelection`] if an option is not offered
/// - [`Error::UpstreamFailure`] if the catalog cannot be read
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::catalog::StaticCatalog;
/// use staybook::operations::{prepare_quote, QuoteRequest};
/// use staybook::{DateRange, Money, RoomId, RoomOfferingSnapshot};
///
/// let catalog = StaticCatalog::new()
///     .with_room(RoomOfferingSnapshot::new("101", Money::new(100_000), 2));
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
///
/// let request = QuoteRequest::new(RoomId::new("101"), DateRange::new(d(10), d(12)).unwrap());
/// let quote = prepare_quote(&catalog, &request, d(1)).unwrap();
/// assert_eq!(quote.total(), Money::new(200_000));
/// ```
pub fn prepare_quote<C: RoomCatalog + ?Sized>(
    catalog: &C,
    request: &QuoteRequest,
    today: NaiveDate,
) -> Result<Quote> {
    validate_new_booking(&request.range, today)?;

    let snapshot = catalog.room_offering(&request.room_id)?;
    if !snapshot.bookable {
        return Err(Error::RoomUnavailable {
            room_id: snapshot.id.to_string(),
            reason: "not accepting bookings".to_string(),
        });
    }
    if let Some(guests) = request.guests {
        check_capacity(&snapshot, guests)?;
    }

    let quote = compose_quote(&snapshot, &request.range, &request.selection)?;
    log::debug!(
        "quoted room {} for {}: {}",
        quote.room_id(),
        quote.range(),
        quote.total()
    );
    Ok(quote)
}
