//! Pay command implementation.
//!
//! This module implements the `pay` command, which records what the payment
//! side reported for a reservation. It stands in for a payment callback, so
//! it takes no `--user`.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_reservation_id, report_dry_run, report_warnings,
    GlobalOptions,
};
use clap::Args;
use staybook::operations::{PaymentOptions, PaymentPlan};
use staybook::{PaymentOutcome, PlanExecutor};

/// Record a payment outcome for a reservation.
#[derive(Args)]
pub struct PayCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// What the payment side reported (success or failure)
    #[arg(long, value_name = "OUTCOME", default_value = "success")]
    pub outcome: PaymentOutcome,

    /// Confirm a pending reservation once paid (default: from configuration)
    #[arg(long)]
    pub auto_confirm: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl PayCommand {
    /// Execute the pay command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(self.id)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let options = PaymentOptions::new(id, self.outcome, global.now())
            .with_auto_confirm(self.auto_confirm || config.auto_confirm_on_payment());
        let plan = PaymentPlan::new(options).build_plan(&db)?;

        if self.dry_run {
            report_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&db, &db).execute(&plan)?;
        if let Some(reservation) = result.reservation() {
            println!(
                "Reservation {} payment is now {} (status {})",
                reservation.id(),
                reservation.payment_status(),
                reservation.status()
            );
        }
        report_warnings(&result.warnings, global);

        Ok(())
    }
}
