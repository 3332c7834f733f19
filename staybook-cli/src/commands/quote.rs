//! Quote command implementation.
//!
//! This module implements the `quote` command, which prices a stay against
//! the rooms catalog without booking it. The stay arguments defined here are
//! shared with `book`.

use crate::error::CliError;
use crate::output::{money, write_json, OutputFormat, Rows};
use crate::utils::{load_configuration, open_catalog, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use staybook::operations::{prepare_quote, QuoteRequest};
use staybook::stay::adjust_check_out;
use staybook::{DateRange, OptionSelection, Quote, RoomId};

/// Column headers for quote breakdowns.
const COLUMN_HEADERS: [&str; 5] = ["item", "unit_price", "quantity", "nights", "amount"];

/// The stay being priced or booked.
#[derive(Args, Debug, Clone)]
pub struct StayArgs {
    /// Room identifier
    #[arg(value_name = "ROOM")]
    pub room: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Check-out date (YYYY-MM-DD); defaults to one night
    #[arg(long, value_name = "DATE", conflicts_with = "nights")]
    pub check_out: Option<NaiveDate>,

    /// Number of nights instead of a check-out date
    #[arg(long, value_name = "N")]
    pub nights: Option<u32>,

    /// Add-on as ID or ID=QUANTITY (repeatable)
    #[arg(long = "option", value_name = "ID[=QTY]")]
    pub options: Vec<String>,

    /// Number of guests to check against room capacity
    #[arg(long, value_name = "N")]
    pub guests: Option<u32>,
}

impl StayArgs {
    /// Build the quote request these arguments describe.
    pub fn to_request(&self) -> Result<QuoteRequest, CliError> {
        let range = match (self.check_out, self.nights) {
            (Some(check_out), _) => DateRange::new(self.check_in, check_out)?,
            (None, Some(nights)) => DateRange::for_nights(self.check_in, nights)?,
            (None, None) => {
                DateRange::new(self.check_in, adjust_check_out(self.check_in, self.check_in))?
            }
        };

        let mut pairs = Vec::with_capacity(self.options.len());
        for entry in &self.options {
            let (id, quantity) = OptionSelection::parse_entry(entry)?;
            pairs.push((id.as_str().to_string(), i64::from(quantity)));
        }
        let selection = OptionSelection::from_pairs(pairs)?;

        Ok(QuoteRequest::new(RoomId::new(self.room.trim()), range)
            .with_selection(selection)
            .with_guests(self.guests))
    }
}

/// Price a stay without booking it.
#[derive(Args)]
pub struct QuoteCommand {
    #[command(flatten)]
    pub stay: StayArgs,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.stay.to_request()?;
        let config = load_configuration(global)?;
        let catalog = open_catalog(global, &config)?;

        let quote = prepare_quote(&catalog, &request, global.today())?;

        match OutputFormat::resolve(self.format, &config) {
            OutputFormat::Json => write_json(&quote),
            format => breakdown(&quote, format).write(format),
        }
    }
}

/// Lay out a quote as one row per priced item plus a total.
pub fn breakdown(quote: &Quote, format: OutputFormat) -> Rows<'static> {
    let nights = quote.nights().to_string();
    let mut rows = vec![vec![
        format!("room {}", quote.room_id()),
        money(quote.nightly_price(), format),
        "1".to_string(),
        nights.clone(),
        money(quote.room_subtotal(), format),
    ]];

    for line in quote.lines() {
        let label = if line.name.is_empty() {
            line.option_id.to_string()
        } else {
            line.name.clone()
        };
        rows.push(vec![
            label,
            money(line.unit_price, format),
            line.quantity.to_string(),
            nights.clone(),
            money(line.amount, format),
        ]);
    }

    rows.push(vec![
        "total".to_string(),
        String::new(),
        String::new(),
        nights,
        money(quote.total(), format),
    ]);

    Rows {
        headers: &COLUMN_HEADERS,
        rows,
    }
}
