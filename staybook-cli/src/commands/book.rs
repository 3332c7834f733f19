//! Book command implementation.
//!
//! This module implements the `book` command, which prices a stay and
//! stores it as a Pending reservation for the acting user at the quoted
//! total.

use crate::commands::quote::StayArgs;
use crate::error::CliError;
use crate::utils::{
    load_configuration, open_catalog, open_database, report_dry_run, report_warnings,
    resolve_actor, GlobalOptions,
};
use clap::Args;
use staybook::operations::{BookOptions, BookPlan};
use staybook::PlanExecutor;

/// Book a stay for the acting user.
#[derive(Args)]
pub struct BookCommand {
    #[command(flatten)]
    pub stay: StayArgs,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Build the request before touching any collaborator
        let request = self.stay.to_request()?;

        // 2. Load configuration and resolve the guest
        let config = load_configuration(global)?;
        let actor = resolve_actor(global, &config)?;
        let catalog = open_catalog(global, &config)?;

        // 3. Price the stay and build the plan
        let options = BookOptions::new(actor.id, request, global.now());
        let (quote, plan) = BookPlan::new(options, &catalog).build_plan()?;

        if self.dry_run {
            report_dry_run(&plan, global);
            if !global.quiet {
                eprintln!("Quoted total: {}", quote.total());
            }
            return Ok(());
        }

        // 4. Store the reservation
        let db = open_database(global, &config)?;
        let result = PlanExecutor::new(&db, &db).execute(&plan)?;
        let reservation = result.reservation().ok_or_else(|| {
            CliError::SemanticFailure("booking produced no reservation".to_string())
        })?;

        // 5. Output just the reservation id (shell-friendly) to stdout
        println!("{}", reservation.id());

        if !global.quiet {
            eprintln!(
                "Booked room {} for {} ({} night(s)), total {}, status {}",
                reservation.room_id(),
                reservation.range(),
                reservation.range().nights(),
                reservation.total_price(),
                reservation.status(),
            );
        }
        report_warnings(&result.warnings, global);

        Ok(())
    }
}
