//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookCommand, CancelCommand, CompleteCommand, CompletionsCommand, ConfirmCommand, InitCommand,
    ListCommand, NoShowCommand, PayCommand, PolicyCommand, QuoteCommand, RejectCommand,
    RoomsCommand, ShowCommand, SweepCommand, ValidateCommand,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for quoting, booking and cancelling hotel stays.
#[derive(Parser)]
#[command(name = "staybook")]
#[command(version, about = "Quote, book and cancel hotel reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "STAYBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "STAYBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "STAYBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    /// User the command acts as
    #[arg(long, value_name = "USER", global = true, env = "STAYBOOK_USER")]
    pub user: Option<String>,

    /// Use this date as today (YYYY-MM-DD) instead of the clock
    #[arg(long, value_name = "DATE", global = true, env = "STAYBOOK_TODAY")]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize staybook data directory and database
    Init(InitCommand),

    /// List the rooms on offer
    Rooms(RoomsCommand),

    /// Price a stay without booking it
    Quote(QuoteCommand),

    /// Book a stay for the acting user
    Book(BookCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Preview what cancelling a reservation now would refund
    Policy(PolicyCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Reject a pending reservation
    Reject(RejectCommand),

    /// Record a payment outcome
    Pay(PayCommand),

    /// Close a confirmed stay after check-out
    Complete(CompleteCommand),

    /// Close a confirmed stay whose guest never arrived
    NoShow(NoShowCommand),

    /// Complete every confirmed stay that has checked out
    Sweep(SweepCommand),

    /// Validate a configuration or rooms file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
