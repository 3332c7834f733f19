//! Reservation lifecycle.
//!
//! The lifecycle is a closed table. Any (status, event) pair not listed is
//! an [`Error::InvalidTransition`]; a listed pair triggered by a role the
//! table does not name is [`Error::Forbidden`].
//!
//! | From      | Event        | To        | Roles         |
//! |-----------|--------------|-----------|---------------|
//! | Pending   | Confirm      | Confirmed | Admin, System |
//! | Pending   | Reject       | Rejected  | Admin         |
//! | Pending   | Cancel       | Cancelled | Guest         |
//! | Confirmed | Cancel       | Cancelled | Guest         |
//! | Confirmed | Complete     | Completed | System, Admin |
//! | Confirmed | `MarkNoShow` | `NoShow`  | System, Admin |

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reservation::{PaymentStatus, Reservation, ReservationStatus, UserId};
use crate::stay::DateRange;

#[cfg(test)]
mod proptests;

/// The role an actor plays when triggering an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// A guest acting on their own reservation.
    Guest,
    /// Hotel staff.
    Admin,
    /// An automated process.
    System,
}

impl ActorRole {
    /// Every role.
    pub const ALL: [Self; 3] = [Self::Guest, Self::Admin, Self::System];
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guest => "guest",
            Self::Admin => "admin",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

/// Who is triggering an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting user.
    pub id: UserId,
    /// The role the user acts in.
    pub role: ActorRole,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: UserId, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// The actor used by automated transitions.
    #[must_use]
    pub fn system() -> Self {
        Self::new(UserId::system(), ActorRole::System)
    }
}

/// The kind of a lifecycle event, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Hotel accepts the booking.
    Confirm,
    /// Hotel declines the booking.
    Reject,
    /// Guest withdraws the booking.
    Cancel,
    /// The stay took place.
    Complete,
    /// The guest did not arrive.
    MarkNoShow,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [Self; 5] = [
        Self::Confirm,
        Self::Reject,
        Self::Cancel,
        Self::Complete,
        Self::MarkNoShow,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Confirm => "confirm",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
            Self::MarkNoShow => "mark no-show",
        };
        f.write_str(name)
    }
}

/// A lifecycle event with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Confirm a pending reservation.
    Confirm,
    /// Reject a pending reservation.
    Reject {
        /// Why the reservation was rejected. Must not be blank.
        reason: String,
    },
    /// Cancel an active reservation.
    Cancel,
    /// Close a confirmed reservation after check-out.
    Complete,
    /// Close a confirmed reservation whose guest never arrived.
    MarkNoShow,
}

impl LifecycleEvent {
    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Confirm => EventKind::Confirm,
            Self::Reject { .. } => EventKind::Reject,
            Self::Cancel => EventKind::Cancel,
            Self::Complete => EventKind::Complete,
            Self::MarkNoShow => EventKind::MarkNoShow,
        }
    }

    /// Returns the reason to record with the new status, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Reject { reason } => Some(reason.trim()),
            _ => None,
        }
    }
}

struct Transition {
    from: ReservationStatus,
    event: EventKind,
    to: ReservationStatus,
    roles: &'static [ActorRole],
}

static TRANSITIONS: [Transition; 6] = [
    Transition {
        from: ReservationStatus::Pending,
        event: EventKind::Confirm,
        to: ReservationStatus::Confirmed,
        roles: &[ActorRole::Admin, ActorRole::System],
    },
    Transition {
        from: ReservationStatus::Pending,
        event: EventKind::Reject,
        to: ReservationStatus::Rejected,
        roles: &[ActorRole::Admin],
    },
    Transition {
        from: ReservationStatus::Pending,
        event: EventKind::Cancel,
        to: ReservationStatus::Cancelled,
        roles: &[ActorRole::Guest],
    },
    Transition {
        from: ReservationStatus::Confirmed,
        event: EventKind::Cancel,
        to: ReservationStatus::Cancelled,
        roles: &[ActorRole::Guest],
    },
    Transition {
        from: ReservationStatus::Confirmed,
        event: EventKind::Complete,
        to: ReservationStatus::Completed,
        roles: &[ActorRole::System, ActorRole::Admin],
    },
    Transition {
        from: ReservationStatus::Confirmed,
        event: EventKind::MarkNoShow,
        to: ReservationStatus::NoShow,
        roles: &[ActorRole::System, ActorRole::Admin],
    },
];

fn lookup(from: ReservationStatus, event: EventKind) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.event == event)
}

/// Resolves the status reached by `event` from `from` when triggered by `role`.
///
/// # Errors
///
/// - [`Error::InvalidTransition`] if the table has no such transition
/// - [`Error::Forbidden`] if the transition exists but not for `role`
/// - [`Error::Validation`] if a rejection has a blank reason
///
/// # Examples
///
/// ```
/// use staybook::{next_status, ActorRole, LifecycleEvent, ReservationStatus};
///
/// let to = next_status(ReservationStatus::Pending, &LifecycleEvent::Confirm, ActorRole::Admin);
/// assert_eq!(to.unwrap(), ReservationStatus::Confirmed);
///
/// let err = next_status(ReservationStatus::Cancelled, &LifecycleEvent::Cancel, ActorRole::Guest);
/// assert!(err.is_err());
/// ```
pub fn next_status(
    from: ReservationStatus,
    event: &LifecycleEvent,
    role: ActorRole,
) -> Result<ReservationStatus> {
    let kind = event.kind();
    let transition = lookup(from, kind).ok_or_else(|| Error::InvalidTransition {
        from,
        event: kind,
        reason: if from.is_terminal() {
            "reservation is already closed".to_string()
        } else {
            format!("{from} does not accept {kind}")
        },
    })?;

    if !transition.roles.contains(&role) {
        return Err(Error::Forbidden {
            role,
            action: format!("{kind} a {from} reservation"),
        });
    }

    if let LifecycleEvent::Reject { reason } = event {
        if reason.trim().is_empty() {
            return Err(Error::Validation {
                field: "reason".to_string(),
                message: "a rejection needs a reason".to_string(),
            });
        }
    }

    Ok(transition.to)
}

/// Applies an event to a reservation on behalf of `actor`.
///
/// On top of [`next_status`], a cancellation must come from the guest who
/// owns the reservation.
///
/// # Errors
///
/// Everything [`next_status`] reports, plus [`Error::Forbidden`] when a
/// guest cancels someone else's reservation.
pub fn authorize(
    reservation: &Reservation,
    event: &LifecycleEvent,
    actor: &Actor,
) -> Result<ReservationStatus> {
    let to = next_status(reservation.status(), event, actor.role)?;
    if event.kind() == EventKind::Cancel && !reservation.is_owned_by(&actor.id) {
        return Err(Error::Forbidden {
            role: actor.role,
            action: format!("cancel reservation {} owned by another guest", reservation.id()),
        });
    }
    Ok(to)
}

/// Checks the calendar preconditions of closing events.
///
/// Complete needs `today >= check_out`; `MarkNoShow` needs `today > check_in`.
/// Other events have no calendar precondition.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] when the precondition does not hold.
pub fn check_schedule(
    from: ReservationStatus,
    kind: EventKind,
    range: &DateRange,
    today: NaiveDate,
) -> Result<()> {
    let premature = |reason: String| Error::InvalidTransition {
        from,
        event: kind,
        reason,
    };
    match kind {
        EventKind::Complete if today < range.check_out() => Err(premature(format!(
            "check-out {} has not been reached",
            range.check_out()
        ))),
        EventKind::MarkNoShow if today <= range.check_in() => Err(premature(format!(
            "check-in day {} has not passed",
            range.check_in()
        ))),
        _ => Ok(()),
    }
}

/// Returns the events `role` may trigger from `from`.
#[must_use]
pub fn allowed_events(from: ReservationStatus, role: ActorRole) -> Vec<EventKind> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == from && t.roles.contains(&role))
        .map(|t| t.event)
        .collect()
}

/// Returns true if the table lets `role` trigger `event` from `from`.
#[must_use]
pub fn can_transition(from: ReservationStatus, event: EventKind, role: ActorRole) -> bool {
    lookup(from, event).is_some_and(|t| t.roles.contains(&role))
}

/// Payment status after a cancellation: taken money is refunded,
/// anything else is cancelled.
#[must_use]
pub const fn payment_after_cancellation(current: PaymentStatus) -> PaymentStatus {
    match current {
        PaymentStatus::Completed | PaymentStatus::Refunded => PaymentStatus::Refunded,
        _ => PaymentStatus::Cancelled,
    }
}

/// The result of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// The payment went through.
    Success,
    /// The payment was declined or errored.
    Failure,
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

impl FromStr for PaymentOutcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" | "succeeded" | "paid" => Ok(Self::Success),
            "failure" | "failed" | "declined" => Ok(Self::Failure),
            _ => Err(format!("unknown payment outcome '{s}'")),
        }
    }
}

/// Payment status after recording `outcome`.
///
/// A failed payment may be retried; a completed one is final.
///
/// # Errors
///
/// Returns [`Error::InvalidPaymentTransition`] for any other combination.
pub fn payment_after_outcome(
    current: PaymentStatus,
    outcome: PaymentOutcome,
) -> Result<PaymentStatus> {
    match (current, outcome) {
        (PaymentStatus::Pending | PaymentStatus::Failed, PaymentOutcome::Success) => {
            Ok(PaymentStatus::Completed)
        }
        (PaymentStatus::Pending, PaymentOutcome::Failure) => Ok(PaymentStatus::Failed),
        _ => Err(Error::InvalidPaymentTransition {
            from: current,
            outcome: format!("payment {outcome}"),
        }),
    }
}
