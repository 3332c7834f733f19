//! Staff and system transitions: confirm, reject, complete and no-show.
//!
//! Guest cancellation has its own planner in [`super::cancel`] because it
//! carries a refund.

use chrono::NaiveDateTime;

use crate::collaborators::{ReservationStore, StatusChange};
use crate::error::{Error, Result};
use crate::lifecycle::{authorize, check_schedule, Actor, EventKind, LifecycleEvent};
use crate::reservation::{PaymentStatus, ReservationId, ReservationStatus};

use super::plan::{OperationPlan, PlanAction};

/// Options for a lifecycle transition.
#[derive(Debug, Clone)]
pub struct TransitionOptions {
    /// The reservation to move.
    pub reservation_id: ReservationId,

    /// The event to apply.
    pub event: LifecycleEvent,

    /// Who triggers the event.
    pub actor: Actor,

    /// When the event happens.
    pub now: NaiveDateTime,
}

impl TransitionOptions {
    /// Creates transition options.
    #[must_use]
    pub const fn new(
        reservation_id: ReservationId,
        event: LifecycleEvent,
        actor: Actor,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            reservation_id,
            event,
            actor,
            now,
        }
    }
}

/// A transition plan generator.
pub struct TransitionPlan {
    options: TransitionOptions,
}

impl TransitionPlan {
    /// Creates a transition plan.
    #[must_use]
    pub const fn new(options: TransitionOptions) -> Self {
        Self { options }
    }

    /// Builds the plan for the transition.
    ///
    /// A rejected reservation whose payment never completed has its payment
    /// cancelled in the same write. A completed payment is left alone and
    /// reported as a warning.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] on `event` for a cancellation
    /// - [`Error::NotFound`] for an unknown reservation
    /// - [`Error::InvalidTransition`] if the table or the calendar forbids it
    /// - [`Error::Forbidden`] if the actor's role may not trigger it
    pub fn build_plan<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<OperationPlan> {
        let event = &self.options.event;
        if event.kind() == EventKind::Cancel {
            return Err(Error::Validation {
                field: "event".to_string(),
                message: "cancellations go through the cancellation policy".to_string(),
            });
        }

        let id = self.options.reservation_id;
        let reservation = store.get(id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;

        let to = authorize(&reservation, event, &self.options.actor)?;
        check_schedule(
            reservation.status(),
            event.kind(),
            reservation.range(),
            self.options.now.date(),
        )?;

        let mut plan = OperationPlan::new(format!(
            "{} reservation {id} as {}",
            event.kind(),
            self.options.actor.role
        ));

        let payment_status = match (to, reservation.payment_status()) {
            (ReservationStatus::Rejected, PaymentStatus::Pending | PaymentStatus::Failed) => {
                Some(PaymentStatus::Cancelled)
            }
            (ReservationStatus::Rejected, PaymentStatus::Completed) => {
                plan = plan.add_warning(format!(
                    "reservation {id} was paid; arrange the refund with the payment provider"
                ));
                None
            }
            _ => None,
        };

        Ok(plan.add_action(PlanAction::UpdateStatus {
            id,
            change: StatusChange {
                from: reservation.status(),
                to,
                payment_status,
                reason: event.reason().map(str::to_string),
                changed_at: self.options.now,
            },
        }))
    }
}
