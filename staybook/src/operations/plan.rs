//! Plans: the writes an operation will make, computed without side effects.

use crate::collaborators::{PaymentChange, RefundRequest, StatusChange};
use crate::reservation::{NewReservation, ReservationId};

/// A single write performed when a plan is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Store a new Pending reservation.
    CreateReservation(NewReservation),

    /// Move a reservation to a new status.
    UpdateStatus {
        /// The reservation to change.
        id: ReservationId,
        /// The guarded change.
        change: StatusChange,
    },

    /// Cancel a reservation, refunding part of its total first.
    ///
    /// The refund and the status change commit together or not at all.
    Cancel {
        /// The reservation to cancel.
        id: ReservationId,
        /// The guarded change to Cancelled.
        change: StatusChange,
        /// The refund owed, if any.
        refund: Option<RefundRequest>,
    },

    /// Move a reservation's payment to a new status.
    UpdatePaymentStatus {
        /// The reservation to change.
        id: ReservationId,
        /// The guarded change.
        change: PaymentChange,
        /// A status change written in the same transaction.
        then: Option<StatusChange>,
    },
}

fn status_description(id: ReservationId, change: &StatusChange) -> String {
    let mut desc = format!("Move reservation {id} from {} to {}", change.from, change.to);
    if let Some(payment) = change.payment_status {
        desc.push_str(&format!(" (payment {payment})"));
    }
    desc
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(new) => format!(
                "Book room {} for {} ({}, total {})",
                new.room_id, new.user_id, new.range, new.total_price
            ),
            Self::UpdateStatus { id, change } => status_description(*id, change),
            Self::Cancel { id, change, refund } => match refund {
                Some(request) => format!(
                    "Request refund of {} for reservation {id}; {}",
                    request.amount,
                    status_description(*id, change)
                ),
                None => status_description(*id, change),
            },
            Self::UpdatePaymentStatus { id, change, then } => {
                let mut desc = format!(
                    "Move payment of reservation {id} from {} to {}",
                    change.from, change.to
                );
                if let Some(status) = then {
                    desc.push_str(&format!(", then {} to {}", status.from, status.to));
                }
                desc
            }
        }
    }
}

/// The writes an operation will make, in order, plus warnings for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The actions to perform, in order.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel reservation 7");
    /// assert_eq!(plan.description, "Cancel reservation 7");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends an action.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Sweep").add_warning("nothing to settle");
    /// assert_eq!(plan.warnings, vec!["nothing to settle".to_string()]);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Returns true if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
