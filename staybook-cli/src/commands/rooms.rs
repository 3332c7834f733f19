//! Rooms command implementation.
//!
//! This module implements the `rooms` command, which lists the rooms
//! catalog with nightly prices and add-ons.

use crate::error::CliError;
use crate::output::{money, write_json, OutputFormat, Rows};
use crate::utils::{load_configuration, open_catalog, GlobalOptions};
use clap::Args;
use staybook::collaborators::RoomCatalog;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = [
    "id",
    "name",
    "nightly_price",
    "capacity",
    "options",
    "bookable",
];

/// List the rooms on offer.
#[derive(Args)]
pub struct RoomsCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Include rooms that are not accepting bookings
    #[arg(long)]
    pub all: bool,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = open_catalog(global, &config)?;
        let format = OutputFormat::resolve(self.format, &config);

        let mut rooms = catalog.rooms()?;
        if !self.all {
            rooms.retain(|room| room.bookable);
        }

        if format == OutputFormat::Json {
            return write_json(&rooms);
        }

        let rows = rooms
            .iter()
            .map(|room| {
                let options = room
                    .options
                    .iter()
                    .map(|o| format!("{}={}", o.id, money(o.price, format)))
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![
                    room.id.to_string(),
                    room.name.clone(),
                    money(room.nightly_price, format),
                    room.capacity.to_string(),
                    options,
                    room.bookable.to_string(),
                ]
            })
            .collect();

        Rows {
            headers: &COLUMN_HEADERS,
            rows,
        }
        .write(format)
    }
}
