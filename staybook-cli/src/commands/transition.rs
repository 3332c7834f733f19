//! Lifecycle transition commands: `confirm`, `reject`, `complete` and
//! `no-show`.
//!
//! Confirm and reject act as the `--user`, whose role must allow the event.
//! Complete and no-show are scheduled transitions and run as the system
//! actor.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_reservation_id, report_dry_run, report_warnings,
    resolve_actor, GlobalOptions,
};
use clap::Args;
use staybook::operations::{TransitionOptions, TransitionPlan};
use staybook::{Actor, LifecycleEvent, PlanExecutor};

/// Confirm a pending reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run(self.id, LifecycleEvent::Confirm, ActingAs::User, self.dry_run, global)
    }
}

/// Reject a pending reservation.
#[derive(Args)]
pub struct RejectCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Why the reservation is rejected
    #[arg(long, value_name = "TEXT")]
    pub reason: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl RejectCommand {
    /// Execute the reject command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let event = LifecycleEvent::Reject {
            reason: self.reason,
        };
        run(self.id, event, ActingAs::User, self.dry_run, global)
    }
}

/// Close a confirmed stay after check-out.
#[derive(Args)]
pub struct CompleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CompleteCommand {
    /// Execute the complete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run(self.id, LifecycleEvent::Complete, ActingAs::System, self.dry_run, global)
    }
}

/// Close a confirmed stay whose guest never arrived.
#[derive(Args)]
pub struct NoShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl NoShowCommand {
    /// Execute the no-show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        run(self.id, LifecycleEvent::MarkNoShow, ActingAs::System, self.dry_run, global)
    }
}

#[derive(Clone, Copy)]
enum ActingAs {
    User,
    System,
}

fn run(
    raw_id: i64,
    event: LifecycleEvent,
    acting_as: ActingAs,
    dry_run: bool,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let id = parse_reservation_id(raw_id)?;
    let config = load_configuration(global)?;
    let actor = match acting_as {
        ActingAs::User => resolve_actor(global, &config)?,
        ActingAs::System => Actor::system(),
    };
    let db = open_database(global, &config)?;

    let options = TransitionOptions::new(id, event, actor, global.now());
    let plan = TransitionPlan::new(options).build_plan(&db)?;

    if dry_run {
        report_dry_run(&plan, global);
        return Ok(());
    }

    let result = PlanExecutor::new(&db, &db).execute(&plan)?;
    if let Some(reservation) = result.reservation() {
        println!(
            "Reservation {} is now {} (payment {})",
            reservation.id(),
            reservation.status(),
            reservation.payment_status()
        );
    }
    report_warnings(&result.warnings, global);

    Ok(())
}
