#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # staybook
//!
//! A booking engine for hotel room reservations.
//!
//! The engine quotes stays, locks the quoted total into a reservation,
//! evaluates guest cancellations against a refund policy, and moves
//! reservations through a closed lifecycle. Rooms, storage, payments and
//! identities are reached through the traits in [`collaborators`]; a SQLite
//! store and YAML room catalog are provided.
//!
//! ## Core Types
//!
//! - [`DateRange`]: a well-formed stay, with its night count
//! - [`Quote`] and [`compose_quote`]: integer price composition
//! - [`CancellationPolicy`] and [`evaluate_cancellation`]: refund tiers
//! - [`Reservation`], [`ReservationStatus`] and [`next_status`]: the lifecycle
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use staybook::{compose_quote, DateRange, Money, OptionSelection, RoomOfferingSnapshot};
//!
//! let room = RoomOfferingSnapshot::new("101", Money::new(120_000), 2)
//!     .with_option("breakfast", "Breakfast", Money::new(15_000));
//! let check_in = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let range = DateRange::for_nights(check_in, 2).unwrap();
//! let selection = OptionSelection::from_pairs([("breakfast", 2)]).unwrap();
//!
//! let quote = compose_quote(&room, &range, &selection).unwrap();
//! assert_eq!(quote.total(), Money::new(300_000));
//! ```

pub mod cancellation;
pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod database;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod money;
pub mod operations;
pub mod pricing;
pub mod reservation;
pub mod stay;

// Re-export key types at crate root for convenience
pub use cancellation::{
    evaluate_cancellation, CancellationDecision, CancellationPolicy, RefundTier,
};
pub use collaborators::{ConfiguredRoles, RoleDirectory};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use lifecycle::{next_status, Actor, ActorRole, EventKind, LifecycleEvent, PaymentOutcome};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use pricing::{
    compose_quote, OptionId, OptionSelection, Quote, QuoteLine, RoomId, RoomOfferingSnapshot,
};
pub use reservation::{
    NewReservation, PaymentStatus, Reservation, ReservationId, ReservationStatus, UserId,
};
pub use stay::DateRange;
