//! Common test utilities for integration tests.

use chrono::{NaiveDate, NaiveDateTime};

use staybook::catalog::StaticCatalog;
use staybook::database::{Database, DatabaseConfig};
use staybook::{Money, RoomOfferingSnapshot};

/// A date in June 2025.
#[allow(dead_code)]
pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// A timestamp on a June 2025 day.
#[allow(dead_code)]
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    june(day).and_hms_opt(hour, minute, 0).unwrap()
}

/// Creates a file-backed test database that lives for the rest of the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staybook.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory for the database's lifetime
    std::mem::forget(dir);

    db
}

/// Room 101 at 100,000 a night with breakfast at 10,000, and room 201.
#[allow(dead_code)]
pub fn hotel_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_room(
            RoomOfferingSnapshot::new("101", Money::new(100_000), 2).with_option(
                "breakfast",
                "Breakfast",
                Money::new(10_000),
            ),
        )
        .with_room(RoomOfferingSnapshot::new("201", Money::new(180_000), 4))
}
