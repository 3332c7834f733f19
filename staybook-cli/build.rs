//! Build script for staybook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("staybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Quote, book and cancel hotel reservations")
        .long_about(
            "Command-line tool for pricing hotel stays, booking rooms, and managing \
             reservations through cancellation, payment and check-out",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("STAYBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("STAYBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("STAYBOOK_DISABLE_AUTOINIT"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("User the command acts as")
                .value_name("USER")
                .global(true)
                .env("STAYBOOK_USER"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .help("Use this date as today (YYYY-MM-DD) instead of the clock")
                .value_name("DATE")
                .global(true)
                .env("STAYBOOK_TODAY"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize staybook data directory and database")
                .long_about("Create the database, and optionally a configuration and rooms file"),
            Command::new("rooms")
                .about("List the rooms on offer")
                .long_about("Display the rooms catalog with nightly prices and add-ons"),
            Command::new("quote")
                .about("Price a stay without booking it")
                .long_about("Compute the nightly, option and total price for a stay"),
            Command::new("book")
                .about("Book a stay for the acting user")
                .long_about("Price a stay and store it as a pending reservation at the quoted total"),
            Command::new("show")
                .about("Show one reservation")
                .long_about("Display a reservation with its options, status and refunds"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations, newest first, in various formats"),
            Command::new("policy")
                .about("Preview what cancelling a reservation now would refund")
                .long_about("Evaluate the cancellation policy without cancelling"),
            Command::new("cancel")
                .about("Cancel a reservation")
                .long_about("Cancel a reservation and request the refund the policy allows"),
            Command::new("confirm")
                .about("Confirm a pending reservation")
                .long_about("Move a pending reservation to confirmed"),
            Command::new("reject")
                .about("Reject a pending reservation")
                .long_about("Move a pending reservation to rejected, recording a reason"),
            Command::new("pay")
                .about("Record a payment outcome")
                .long_about("Record a payment success or failure for a reservation"),
            Command::new("complete")
                .about("Close a confirmed stay after check-out")
                .long_about("Move a confirmed reservation to completed once check-out has arrived"),
            Command::new("no-show")
                .about("Close a confirmed stay whose guest never arrived")
                .long_about("Move a confirmed reservation to no-show after the check-in date"),
            Command::new("sweep")
                .about("Complete every confirmed stay that has checked out")
                .long_about("Close all confirmed reservations whose check-out date has arrived"),
            Command::new("validate")
                .about("Validate a configuration or rooms file")
                .long_about("Check a staybook configuration or rooms file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("staybook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
