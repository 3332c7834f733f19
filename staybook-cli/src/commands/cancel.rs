//! Cancel command implementation.
//!
//! This module implements the `cancel` command. Eligibility is evaluated
//! afresh against the configured policy; the refund is requested before the
//! status changes.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_reservation_id, report_dry_run, report_warnings,
    resolve_actor, GlobalOptions,
};
use clap::Args;
use staybook::operations::{CancelOptions, CancelPlan};
use staybook::{Money, PlanExecutor};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Resolve the reservation and who is asking
        let id = parse_reservation_id(self.id)?;
        let config = load_configuration(global)?;
        let actor = resolve_actor(global, &config)?;
        let policy = config.cancellation_policy();

        // 2. Open database
        let db = open_database(global, &config)?;

        // 3. Build plan
        let options = CancelOptions::new(id, actor, global.now());
        let plan = CancelPlan::new(options, &policy).build_plan(&db)?;

        // 4. Execute or dry-run
        if self.dry_run {
            report_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&db, &db).execute(&plan)?;
        let refunded = result.refunds.first().map_or(Money::ZERO, |r| r.amount);

        println!("Cancelled reservation {id} (refund {refunded})");
        report_warnings(&result.warnings, global);

        Ok(())
    }
}
