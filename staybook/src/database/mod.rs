//! SQLite reservation store and refund ledger.
//!
//! [`Database`] implements [`ReservationStore`](crate::collaborators::ReservationStore)
//! and [`PaymentCollaborator`](crate::collaborators::PaymentCollaborator) so the
//! engine can run end to end on a single local file.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use staybook::collaborators::ReservationStore;
//! use staybook::database::Database;
//! use staybook::{DateRange, Money, NewReservation, ReservationStatus, RoomId, UserId};
//!
//! let db = Database::open_in_memory().unwrap();
//! let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
//!
//! let reservation = db
//!     .create(&NewReservation {
//!         user_id: UserId::new("alice").unwrap(),
//!         room_id: RoomId::new("101"),
//!         range: DateRange::new(d(10), d(12)).unwrap(),
//!         options: Vec::new(),
//!         total_price: Money::new(200_000),
//!         created_at: d(1).and_hms_opt(9, 0, 0).unwrap(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(reservation.status(), ReservationStatus::Pending);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod refunds;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE, DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
