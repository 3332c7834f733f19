//! List command implementation.
//!
//! This module implements the `list` command, which displays a guest's
//! reservations, newest first, in various formats (table, JSON, CSV, TSV).
//! Admins may list another guest, or every reservation in a status.

use crate::error::CliError;
use crate::output::{money, write_json, OutputFormat, Rows};
use crate::utils::{format_timestamp, load_configuration, open_database, resolve_actor, GlobalOptions};
use clap::Args;
use staybook::collaborators::{Page, PageRequest, ReservationStore};
use staybook::{ActorRole, Error, Reservation, ReservationStatus, UserId};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 10] = [
    "id",
    "user",
    "room",
    "check_in",
    "check_out",
    "nights",
    "total",
    "status",
    "payment",
    "created_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Guest whose reservations to list (default: the acting user)
    #[arg(long, value_name = "USER", conflicts_with = "all")]
    pub guest: Option<String>,

    /// Only reservations in this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// List every guest's reservations in --status, ordered by check-in
    #[arg(long, requires = "status")]
    pub all: bool,

    /// Page number, from 1
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub page: u32,

    /// Page size (default: from configuration)
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration and resolve who is asking
        let config = load_configuration(global)?;
        let actor = resolve_actor(global, &config)?;
        let format = OutputFormat::resolve(self.format, &config);

        // 2. Open database
        let db = open_database(global, &config)?;

        // 3. Query reservations
        if self.all {
            require_staff(actor.role, "list every guest's reservations")?;
            let status = self
                .status
                .ok_or_else(|| CliError::InvalidArguments("--all needs --status".to_string()))?;
            let reservations = db.list_by_status(status)?;
            return output(&reservations, format);
        }

        let guest = match self.guest {
            Some(ref name) => UserId::new(name.as_str())?,
            None => actor.id.clone(),
        };
        if guest != actor.id {
            require_staff(actor.role, "list another guest's reservations")?;
        }

        let request = PageRequest::new(self.page, self.page_size.unwrap_or(config.page_size()))?;
        let page = db.list_by_user(&guest, self.status, request)?;

        // 4. Format and output to stdout
        if format == OutputFormat::Json {
            return write_json(&page);
        }
        output(&page.items, format)?;
        report_page(&page, global);

        Ok(())
    }
}

fn require_staff(role: ActorRole, action: &str) -> Result<(), CliError> {
    if role == ActorRole::Guest {
        return Err(Error::Forbidden {
            role,
            action: action.to_string(),
        }
        .into());
    }
    Ok(())
}

fn output(reservations: &[Reservation], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return write_json(reservations);
    }
    let rows = reservations
        .iter()
        .map(|r| reservation_row(r, format))
        .collect();
    Rows {
        headers: &COLUMN_HEADERS,
        rows,
    }
    .write(format)
}

/// One listing row for a reservation.
fn reservation_row(res: &Reservation, format: OutputFormat) -> Vec<String> {
    vec![
        res.id().to_string(),
        res.user_id().to_string(),
        res.room_id().to_string(),
        res.range().check_in().to_string(),
        res.range().check_out().to_string(),
        res.range().nights().to_string(),
        money(res.total_price(), format),
        res.status().to_string(),
        res.payment_status().to_string(),
        format_timestamp(res.created_at()),
    ]
}

fn report_page(page: &Page<Reservation>, global: &GlobalOptions) {
    if global.quiet || page.total_pages() <= 1 {
        return;
    }
    eprintln!(
        "Page {} of {} ({} reservation(s))",
        page.number,
        page.total_pages(),
        page.total
    );
}
