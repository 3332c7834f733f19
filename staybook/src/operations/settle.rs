//! Settlement sweep: closing confirmed stays whose check-out has passed.

use chrono::NaiveDateTime;

use crate::collaborators::{ReservationStore, StatusChange};
use crate::error::Result;
use crate::lifecycle::{check_schedule, next_status, Actor, EventKind, LifecycleEvent};
use crate::reservation::ReservationStatus;

use super::plan::{OperationPlan, PlanAction};

/// A sweep plan generator.
///
/// Every Confirmed reservation with `check_out <= today` is completed as the
/// system actor. Each completion is guarded on Confirmed, so a reservation
/// cancelled between planning and execution stops the sweep with a conflict
/// instead of being overwritten.
pub struct SweepPlan {
    now: NaiveDateTime,
}

impl SweepPlan {
    /// Creates a sweep as of `now`.
    #[must_use]
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Builds the sweep plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn build_plan<S: ReservationStore + ?Sized>(&self, store: &S) -> Result<OperationPlan> {
        let today = self.now.date();
        let system = Actor::system();
        let to = next_status(
            ReservationStatus::Confirmed,
            &LifecycleEvent::Complete,
            system.role,
        )?;

        let mut plan = OperationPlan::new(format!("Complete stays checked out by {today}"));
        for reservation in store.list_by_status(ReservationStatus::Confirmed)? {
            let due = check_schedule(
                reservation.status(),
                EventKind::Complete,
                reservation.range(),
                today,
            );
            if due.is_err() {
                continue;
            }
            plan = plan.add_action(PlanAction::UpdateStatus {
                id: reservation.id(),
                change: StatusChange {
                    from: reservation.status(),
                    to,
                    payment_status: None,
                    reason: None,
                    changed_at: self.now,
                },
            });
        }

        if plan.is_empty() {
            plan = plan.add_warning("no confirmed stays are due for completion");
        }
        Ok(plan)
    }
}
