//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `rooms`: List the rooms catalog
//! - `quote`: Price a stay without booking it
//! - `book`: Book a stay as a Pending reservation
//! - `show`: Show one reservation
//! - `list`: List reservations
//! - `policy`: Preview the refund a cancellation would give
//! - `cancel`: Cancel a reservation and request its refund
//! - `confirm`, `reject`, `complete`, `no-show`: Lifecycle transitions
//! - `pay`: Record a payment outcome
//! - `sweep`: Complete stays that have checked out
//! - `validate`: Validate a configuration or rooms file
//! - `completions`: Generate shell completion scripts

pub mod book;
pub mod cancel;
pub mod completions;
pub mod init;
pub mod list;
pub mod pay;
pub mod policy;
pub mod quote;
pub mod rooms;
pub mod show;
pub mod sweep;
pub mod transition;
pub mod validate;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use pay::PayCommand;
pub use policy::PolicyCommand;
pub use quote::QuoteCommand;
pub use rooms::RoomsCommand;
pub use show::ShowCommand;
pub use sweep::SweepCommand;
pub use transition::{CompleteCommand, ConfirmCommand, NoShowCommand, RejectCommand};
pub use validate::ValidateCommand;
