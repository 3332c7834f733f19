//! Shared helpers for database unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::database::Database;
use crate::money::Money;
use crate::pricing::{OptionId, RoomId};
use crate::reservation::{ConfirmedOption, NewReservation, UserId};
use crate::stay::DateRange;

/// Creates an in-memory test database.
///
/// # Panics
///
/// Panics if the database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    Database::open_in_memory().unwrap()
}

/// A date in June 2025.
///
/// # Panics
///
/// Panics if `day` is not a day of June.
#[must_use]
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// A timestamp on the given June 2025 day and hour.
///
/// # Panics
///
/// Panics if the day or hour is out of range.
#[must_use]
pub fn ts(day: u32, hour: u32) -> NaiveDateTime {
    d(day).and_hms_opt(hour, 0, 0).unwrap()
}

/// A reservation without options, created on June 1st.
///
/// # Panics
///
/// Panics if the user id is blank or the range is empty.
#[must_use]
pub fn new_reservation(
    user: &str,
    room: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    total: u64,
) -> NewReservation {
    NewReservation {
        user_id: UserId::new(user).unwrap(),
        room_id: RoomId::new(room),
        range: DateRange::new(check_in, check_out).unwrap(),
        options: Vec::new(),
        total_price: Money::new(total),
        created_at: ts(1, 12),
    }
}

/// A reservation with one option whose total matches its nights.
///
/// # Panics
///
/// Panics if the user id is blank or the range is empty.
#[must_use]
pub fn new_reservation_with_option(
    user: &str,
    room: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    option: &str,
    unit_price: u64,
    quantity: u32,
) -> NewReservation {
    let mut new = new_reservation(user, room, check_in, check_out, 0);
    let nights = u64::from(new.range.nights());
    new.total_price = Money::new(100_000 * nights + unit_price * u64::from(quantity) * nights);
    new.options.push(ConfirmedOption {
        option_id: OptionId::new(option),
        name: option.to_string(),
        unit_price: Money::new(unit_price),
        quantity,
    });
    new
}
