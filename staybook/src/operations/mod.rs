//! Booking operations using the plan-execute pattern.
//!
//! Planning reads from the collaborators, checks every rule and returns an
//! [`OperationPlan`] without writing anything. A [`PlanExecutor`] then
//! applies the plan, or only reports it in dry-run mode.
//!
//! # Architecture
//!
//! 1. **Planning**: loads the reservation or room, runs the calculators and
//!    the lifecycle table, and lists the writes
//! 2. **Execution**: performs the writes in order and stops at the first
//!    failure
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use staybook::catalog::StaticCatalog;
//! use staybook::database::Database;
//! use staybook::operations::{BookOptions, BookPlan, PlanExecutor, QuoteRequest};
//! use staybook::{DateRange, Money, ReservationStatus, RoomId, RoomOfferingSnapshot, UserId};
//!
//! let catalog = StaticCatalog::new()
//!     .with_room(RoomOfferingSnapshot::new("101", Money::new(100_000), 2));
//! let db = Database::open_in_memory().unwrap();
//! let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
//!
//! let request = QuoteRequest::new(RoomId::new("101"), DateRange::new(d(10), d(12)).unwrap());
//! let options = BookOptions::new(
//!     UserId::new("alice").unwrap(),
//!     request,
//!     d(1).and_hms_opt(9, 0, 0).unwrap(),
//! );
//!
//! let (quote, plan) = BookPlan::new(options, &catalog).build_plan().unwrap();
//! let result = PlanExecutor::new(&db, &db).execute(&plan).unwrap();
//!
//! let reservation = result.reservation().unwrap();
//! assert_eq!(reservation.status(), ReservationStatus::Pending);
//! assert_eq!(reservation.total_price(), quote.total());
//! ```

pub mod book;
pub mod cancel;
pub mod executor;
pub mod init;
pub mod payment;
pub mod plan;
pub mod quote;
pub mod settle;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use book::{BookOptions, BookPlan};
pub use cancel::{CancelOptions, CancelPlan, CancellationPreview};
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use payment::{PaymentOptions, PaymentPlan};
pub use plan::{OperationPlan, PlanAction};
pub use quote::{prepare_quote, QuoteRequest};
pub use settle::SweepPlan;
pub use transition::{TransitionOptions, TransitionPlan};
