//! Show command implementation.

use crate::error::CliError;
use crate::output::write_json;
use crate::utils::{
    format_timestamp, load_configuration, open_database, parse_reservation_id, resolve_actor,
    GlobalOptions,
};
use clap::Args;
use staybook::collaborators::PaymentCollaborator;
use staybook::{Actor, ActorRole, Error, Reservation};

/// Show one reservation with its options and refunds.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(self.id)?;
        let config = load_configuration(global)?;
        let actor = resolve_actor(global, &config)?;
        let db = open_database(global, &config)?;

        let reservation = db.require(id)?;
        ensure_visible(&actor, &reservation)?;
        let refunds = db.refunds_for(id)?;

        if self.json {
            let value = serde_json::json!({
                "reservation": reservation,
                "refunds": refunds,
            });
            return write_json(&value);
        }

        println!("Reservation {}", reservation.id());
        println!("  Guest:     {}", reservation.user_id());
        println!("  Room:      {}", reservation.room_id());
        println!(
            "  Stay:      {} ({} night(s))",
            reservation.range(),
            reservation.range().nights()
        );
        for option in reservation.options() {
            println!(
                "  Option:    {} x{} at {}",
                option.name, option.quantity, option.unit_price
            );
        }
        println!("  Total:     {}", reservation.total_price());
        println!("  Status:    {}", reservation.status());
        if let Some(reason) = reservation.status_reason() {
            println!("  Reason:    {reason}");
        }
        println!("  Payment:   {}", reservation.payment_status());
        println!("  Created:   {}", format_timestamp(reservation.created_at()));
        println!("  Updated:   {}", format_timestamp(reservation.updated_at()));
        for refund in &refunds {
            println!(
                "  Refund:    #{} {} requested {}",
                refund.ticket_id,
                refund.amount,
                format_timestamp(refund.requested_at)
            );
        }

        Ok(())
    }
}

/// Guests see only their own reservations.
fn ensure_visible(actor: &Actor, reservation: &Reservation) -> Result<(), CliError> {
    if actor.role == ActorRole::Guest && !reservation.is_owned_by(&actor.id) {
        return Err(Error::Forbidden {
            role: actor.role,
            action: "view another guest's reservation".to_string(),
        }
        .into());
    }
    Ok(())
}
