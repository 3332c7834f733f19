//! Plan execution.
//!
//! Actions run in plan order and execution stops at the first failure.
//! Each action is one store transaction; a cancellation hands the payment
//! side to the store so its refund commits together with the status change.

use crate::collaborators::{PaymentCollaborator, RefundTicket, ReservationStore};
use crate::error::Result;
use crate::reservation::Reservation;

use super::plan::{OperationPlan, PlanAction};

/// What happened when a plan ran.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether every action succeeded.
    pub success: bool,

    /// Whether this was a dry run (no writes made).
    pub dry_run: bool,

    /// Descriptions of the actions taken, or that would be taken.
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Reservations as written, in action order. Empty on a dry run.
    pub reservations: Vec<Reservation>,

    /// Refunds accepted by the payment side. Empty on a dry run.
    pub refunds: Vec<RefundTicket>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservations: Vec::new(),
            refunds: Vec::new(),
        }
    }

    /// Returns the reservation as left by the last write, if any.
    #[must_use]
    pub fn reservation(&self) -> Option<&Reservation> {
        self.reservations.last()
    }
}

/// Runs plans against a reservation store and a payment collaborator.
///
/// # Examples
///
/// ```
/// use staybook::database::Database;
/// use staybook::operations::{OperationPlan, PlanExecutor};
///
/// let db = Database::open_in_memory().unwrap();
/// let plan = OperationPlan::new("Nothing to do").add_warning("empty plan");
///
/// let result = PlanExecutor::new(&db, &db).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub struct PlanExecutor<'a, S: ?Sized, P> {
    store: &'a S,
    payments: &'a P,
    dry_run: bool,
}

impl<'a, S, P> PlanExecutor<'a, S, P>
where
    S: ReservationStore + ?Sized,
    P: PaymentCollaborator,
{
    /// Creates an executor that applies writes.
    #[must_use]
    pub const fn new(store: &'a S, payments: &'a P) -> Self {
        Self {
            store,
            payments,
            dry_run: false,
        }
    }

    /// Switches to dry-run mode: the plan is reported but nothing is written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the plan.
    ///
    /// # Errors
    ///
    /// Returns the first action's error; later actions are not attempted.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            log::debug!("dry run: {} ({} actions)", plan.description, plan.len());
            return Ok(result);
        }

        for action in &plan.actions {
            log::debug!("executing: {}", action.description());
            match action {
                PlanAction::CreateReservation(new) => {
                    result.reservations.push(self.store.create(new)?);
                }
                PlanAction::UpdateStatus { id, change } => {
                    result.reservations.push(self.store.update_status(*id, change)?);
                }
                PlanAction::Cancel { id, change, refund } => {
                    let cancellation = self.store.cancel(*id, change, *refund, self.payments)?;
                    result.refunds.extend(cancellation.refund);
                    result.reservations.push(cancellation.reservation);
                }
                PlanAction::UpdatePaymentStatus { id, change, then } => {
                    result.reservations.push(
                        self.store
                            .update_payment_status(*id, change, then.clone())?,
                    );
                }
            }
        }

        Ok(result)
    }
}
