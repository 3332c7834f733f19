//! Error types for the staybook library.
//!
//! Every failure the booking engine can report is a variant of [`Error`].
//! Validation failures are raised before any store or payment call is made,
//! so a rejected quote or cancellation never leaves partial state behind.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::lifecycle::{ActorRole, EventKind};
use crate::reservation::{PaymentStatus, ReservationId, ReservationStatus};

/// Result type alias for operations that may fail with a staybook error.
///
/// # Examples
///
/// ```
/// use staybook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the staybook library.
#[derive(Debug, Error)]
pub enum Error {
    /// Check-out is not after check-in, or a new booking starts in the past.
    #[error("invalid date range {check_in}..{check_out}: {reason}")]
    InvalidDateRange {
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
        /// Why the range was rejected.
        reason: String,
    },

    /// An option id is unknown to the room, or a quantity is negative.
    #[error("invalid option selection '{option_id}': {reason}")]
    InvalidOptionSelection {
        /// The offending option identifier.
        option_id: String,
        /// Why the selection was rejected.
        reason: String,
    },

    /// The room cannot be booked.
    #[error("room {room_id} unavailable: {reason}")]
    RoomUnavailable {
        /// The room identifier.
        room_id: String,
        /// Why the room cannot be booked.
        reason: String,
    },

    /// The reservation's current state does not permit the requested event.
    #[error("cannot {event} a reservation that is {from}: {reason}")]
    InvalidTransition {
        /// The state the reservation is in.
        from: ReservationStatus,
        /// The event that was requested.
        event: EventKind,
        /// Details about the refusal.
        reason: String,
    },

    /// The cancellation policy does not allow self-service cancellation.
    #[error(
        "reservation {reservation_id} cannot be cancelled: check-in is {days_until_check_in} day(s) away"
    )]
    CancellationNotEligible {
        /// The reservation that was to be cancelled.
        reservation_id: ReservationId,
        /// Whole days until check-in at evaluation time.
        days_until_check_in: i64,
    },

    /// An external collaborator failed.
    #[error("{collaborator} failed: {details}")]
    UpstreamFailure {
        /// Which collaborator failed (catalog, store, payment).
        collaborator: String,
        /// Details about the failure.
        details: String,
    },

    /// The payment axis does not accept the requested outcome.
    #[error("cannot record {outcome} for payment that is {from}")]
    InvalidPaymentTransition {
        /// The current payment status.
        from: PaymentStatus,
        /// The outcome that was requested.
        outcome: String,
    },

    /// The acting role is not allowed to trigger an event.
    #[error("{role} is not allowed to {action}")]
    Forbidden {
        /// The role of the actor.
        role: ActorRole,
        /// The attempted action.
        action: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A reservation changed between planning and execution.
    #[error("reservation conflict: {details}")]
    ReservationConflict {
        /// Details about the conflict.
        details: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Builds an upstream failure for the named collaborator.
    pub(crate) fn upstream(collaborator: &str, details: impl std::fmt::Display) -> Self {
        Self::UpstreamFailure {
            collaborator: collaborator.to_string(),
            details: details.to_string(),
        }
    }

    /// Builds the error reported when an amount leaves the representable range.
    pub(crate) fn amount_overflow(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: "amount exceeds the supported range".to_string(),
        }
    }

    /// Check if the caller may retry the failed operation.
    ///
    /// Only collaborator failures are retryable; policy and validation
    /// failures will fail the same way again.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::Error;
    ///
    /// let err = Error::UpstreamFailure {
    ///     collaborator: "payment".to_string(),
    ///     details: "timed out".to_string(),
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::NotFound { resource: "reservation 7".to_string() };
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamFailure { .. } | Self::Database(_) | Self::LockTimeout { .. }
        )
    }

    /// Check if the error is a booking policy violation the user can act on.
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. }
                | Self::InvalidOptionSelection { .. }
                | Self::RoomUnavailable { .. }
                | Self::InvalidTransition { .. }
                | Self::CancellationNotEligible { .. }
                | Self::InvalidPaymentTransition { .. }
                | Self::Forbidden { .. }
        )
    }
}
