//! Guest cancellation.
//!
//! Eligibility is evaluated here every time, from the stored reservation and
//! the injected clock. A cancel plan is a single action: the refund is
//! requested first and the move to Cancelled commits only once it is accepted.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cancellation::{CancellationDecision, CancellationPolicy};
use crate::collaborators::{RefundRequest, ReservationStore, StatusChange};
use crate::error::{Error, Result};
use crate::lifecycle::{authorize, payment_after_cancellation, Actor, LifecycleEvent};
use crate::money::Money;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

use super::plan::{OperationPlan, PlanAction};

/// Options for a cancellation.
#[derive(Debug, Clone)]
pub struct CancelOptions {
    /// The reservation to cancel.
    pub reservation_id: ReservationId,

    /// Who asks for the cancellation.
    pub actor: Actor,

    /// When the cancellation is requested.
    pub now: NaiveDateTime,
}

impl CancelOptions {
    /// Creates cancellation options.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, actor: Actor, now: NaiveDateTime) -> Self {
        Self {
            reservation_id,
            actor,
            now,
        }
    }
}

/// What a cancellation would return, without cancelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationPreview {
    /// The reservation evaluated.
    pub reservation_id: ReservationId,
    /// Its current status.
    pub status: ReservationStatus,
    /// The locked total.
    pub total_price: Money,
    /// The policy outcome.
    pub decision: CancellationDecision,
    /// The refund owed if cancelled now.
    pub refund_amount: Money,
}

/// A cancellation plan generator.
pub struct CancelPlan<'a> {
    options: CancelOptions,
    policy: &'a CancellationPolicy,
}

impl<'a> CancelPlan<'a> {
    /// Creates a cancellation plan under a policy.
    #[must_use]
    pub const fn new(options: CancelOptions, policy: &'a CancellationPolicy) -> Self {
        Self { options, policy }
    }

    fn load<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<Reservation> {
        store
            .get(self.options.reservation_id)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("reservation {}", self.options.reservation_id),
            })
    }

    /// Evaluates the policy for the reservation without checking who asks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown reservation.
    pub fn preview<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<CancellationPreview> {
        let reservation = self.load(store)?;
        let decision = self.policy.evaluate(
            reservation.range().check_in(),
            self.options.now,
            reservation.status(),
        );
        Ok(CancellationPreview {
            reservation_id: reservation.id(),
            status: reservation.status(),
            total_price: reservation.total_price(),
            decision,
            refund_amount: decision.refund_amount(reservation.total_price()),
        })
    }

    /// Builds the cancellation plan.
    ///
    /// Does not write anything.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for an unknown reservation
    /// - [`Error::InvalidTransition`] if the reservation is already closed
    /// - [`Error::Forbidden`] unless the owning guest asks
    /// - [`Error::CancellationNotEligible`] inside the same-day window
    pub fn build_plan<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<OperationPlan> {
        let reservation = self.load(store)?;
        let to = authorize(&reservation, &LifecycleEvent::Cancel, &self.options.actor)?;

        let decision = self.policy.evaluate(
            reservation.range().check_in(),
            self.options.now,
            reservation.status(),
        );
        if !decision.eligible {
            return Err(Error::CancellationNotEligible {
                reservation_id: reservation.id(),
                days_until_check_in: decision.days_until_check_in,
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Cancel reservation {} ({} refund, {}%)",
            reservation.id(),
            decision.tier,
            decision.refund_rate
        ));

        let amount = decision.refund_amount(reservation.total_price());
        let refund = if amount.is_zero() {
            plan = plan.add_warning(format!(
                "nothing to refund on reservation {}",
                reservation.id()
            ));
            None
        } else {
            Some(RefundRequest {
                reservation_id: reservation.id(),
                amount,
                requested_at: self.options.now,
            })
        };

        Ok(plan.add_action(PlanAction::Cancel {
            id: reservation.id(),
            change: StatusChange {
                from: reservation.status(),
                to,
                payment_status: Some(payment_after_cancellation(reservation.payment_status())),
                reason: None,
                changed_at: self.options.now,
            },
            refund,
        }))
    }
}
