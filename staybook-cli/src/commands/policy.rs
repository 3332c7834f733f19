//! Policy command implementation.
//!
//! This module implements the `policy` command, which previews what
//! cancelling a reservation now would refund, without cancelling it.

use crate::error::CliError;
use crate::output::write_json;
use crate::utils::{load_configuration, open_database, parse_reservation_id, GlobalOptions};
use clap::Args;
use staybook::operations::{CancelOptions, CancelPlan};
use staybook::Actor;

/// Preview the cancellation policy for a reservation.
#[derive(Args)]
pub struct PolicyCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl PolicyCommand {
    /// Execute the policy command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(self.id)?;
        let config = load_configuration(global)?;
        let policy = config.cancellation_policy();
        let db = open_database(global, &config)?;

        let options = CancelOptions::new(id, Actor::system(), global.now());
        let preview = CancelPlan::new(options, &policy).preview(&db)?;

        if self.json {
            return write_json(&preview);
        }

        let decision = &preview.decision;
        println!("Reservation {} ({})", preview.reservation_id, preview.status);
        println!("  Days until check-in: {}", decision.days_until_check_in);
        println!("  Refund tier:         {}", decision.tier);
        if decision.eligible {
            println!(
                "  Refund:              {} ({}% of {})",
                preview.refund_amount, decision.refund_rate, preview.total_price
            );
        } else {
            println!("  Not eligible for self-service cancellation");
        }

        Ok(())
    }
}
