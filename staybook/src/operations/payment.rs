//! Recording payment outcomes reported by the payment side.

use chrono::NaiveDateTime;

use crate::collaborators::{PaymentChange, ReservationStore, StatusChange};
use crate::error::{Error, Result};
use crate::lifecycle::{next_status, payment_after_outcome, Actor, LifecycleEvent, PaymentOutcome};
use crate::reservation::{PaymentStatus, ReservationId, ReservationStatus};

use super::plan::{OperationPlan, PlanAction};

/// Options for recording a payment outcome.
#[derive(Debug, Clone)]
pub struct PaymentOptions {
    /// The reservation paid for.
    pub reservation_id: ReservationId,

    /// What the payment side reported.
    pub outcome: PaymentOutcome,

    /// When the outcome was reported.
    pub now: NaiveDateTime,

    /// Confirm a Pending reservation once its payment succeeds.
    pub auto_confirm: bool,
}

impl PaymentOptions {
    /// Creates payment options without auto-confirmation.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, outcome: PaymentOutcome, now: NaiveDateTime) -> Self {
        Self {
            reservation_id,
            outcome,
            now,
            auto_confirm: false,
        }
    }

    /// Sets whether a successful payment confirms the reservation.
    #[must_use]
    pub const fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }
}

/// A payment plan generator.
pub struct PaymentPlan {
    options: PaymentOptions,
}

impl PaymentPlan {
    /// Creates a payment plan.
    #[must_use]
    pub const fn new(options: PaymentOptions) -> Self {
        Self { options }
    }

    /// Builds the plan recording the outcome.
    ///
    /// With auto-confirmation on, a successful payment for a Pending
    /// reservation also confirms it as the system actor, in the same write.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for an unknown reservation
    /// - [`Error::InvalidPaymentTransition`] if the reservation is closed or
    ///   the payment cannot take the outcome
    pub fn build_plan<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<OperationPlan> {
        let id = self.options.reservation_id;
        let reservation = store.get(id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;

        if !reservation.status().is_active() {
            return Err(Error::InvalidPaymentTransition {
                from: reservation.payment_status(),
                outcome: format!(
                    "payment {} on a {} reservation",
                    self.options.outcome,
                    reservation.status()
                ),
            });
        }

        let to = payment_after_outcome(reservation.payment_status(), self.options.outcome)?;

        let then = if to == PaymentStatus::Completed
            && self.options.auto_confirm
            && reservation.status() == ReservationStatus::Pending
        {
            let system = Actor::system();
            let confirmed = next_status(
                reservation.status(),
                &LifecycleEvent::Confirm,
                system.role,
            )?;
            Some(StatusChange {
                from: reservation.status(),
                to: confirmed,
                payment_status: None,
                reason: None,
                changed_at: self.options.now,
            })
        } else {
            None
        };

        Ok(OperationPlan::new(format!(
            "Record payment {} for reservation {id}",
            self.options.outcome
        ))
        .add_action(PlanAction::UpdatePaymentStatus {
            id,
            change: PaymentChange {
                from: reservation.payment_status(),
                to,
                changed_at: self.options.now,
            },
            then,
        }))
    }
}
