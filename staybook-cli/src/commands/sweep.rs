//! Sweep command implementation.
//!
//! Completes every confirmed stay whose check-out date has arrived.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, report_dry_run, report_warnings, GlobalOptions};
use clap::Args;
use staybook::operations::SweepPlan;
use staybook::PlanExecutor;

/// Complete confirmed stays that have checked out.
#[derive(Args)]
pub struct SweepCommand {
    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl SweepCommand {
    /// Execute the sweep command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let plan = SweepPlan::new(global.now()).build_plan(&db)?;

        if self.dry_run {
            report_dry_run(&plan, global);
            return Ok(());
        }

        let result = PlanExecutor::new(&db, &db).execute(&plan)?;
        println!("Completed {} reservation(s)", result.reservations.len());
        report_warnings(&result.warnings, global);

        Ok(())
    }
}
