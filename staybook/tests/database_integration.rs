//! Integration tests for the database layer.
//!
//! These tests exercise the full database stack including auto-initialization,
//! schema versioning, persistence across connections and concurrent booking.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tempfile::tempdir;

use common::{at, june};
use staybook::collaborators::{PageRequest, ReservationStore};
use staybook::database::{Database, DatabaseConfig, CURRENT_SCHEMA_VERSION};
use staybook::{DateRange, Error, Money, NewReservation, ReservationStatus, RoomId, UserId};

fn new_reservation(user: &str, room: &str, check_in: u32, check_out: u32) -> NewReservation {
    NewReservation {
        user_id: UserId::new(user).unwrap(),
        room_id: RoomId::new(room),
        range: DateRange::new(june(check_in), june(check_out)).unwrap(),
        options: Vec::new(),
        total_price: Money::new(100_000),
        created_at: at(1, 9, 0),
    }
}

#[test]
fn test_database_auto_creation() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("subdir").join("staybook.db");
    assert!(!db_path.parent().unwrap().exists());

    let _db = Database::open(DatabaseConfig::new(&db_path)).unwrap();

    assert!(db_path.exists());
}

#[test]
fn test_missing_database_without_auto_create() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("absent").join("staybook.db");

    let result = Database::open(DatabaseConfig::new(&db_path).without_auto_create());
    assert!(matches!(result, Err(Error::DataDirectoryNotFound { .. })));
    assert!(!db_path.exists());
}

#[test]
fn test_schema_version_compatibility() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("version_test.db");

    Database::open(DatabaseConfig::new(&db_path)).unwrap();
    Database::open(DatabaseConfig::new(&db_path)).unwrap();

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
    }

    match Database::open(DatabaseConfig::new(&db_path)) {
        Err(Error::UnsupportedSchemaVersion { expected, found }) => {
            assert_eq!(expected, CURRENT_SCHEMA_VERSION);
            assert_eq!(found, 999);
        }
        other => panic!("expected a schema version error, got {other:?}"),
    }
}

#[test]
fn test_reservations_survive_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("staybook.db");

    let id = {
        let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
        db.create(&new_reservation("alice", "101", 10, 12)).unwrap().id()
    };

    let db = Database::open(DatabaseConfig::new(&db_path)).unwrap();
    let stored = db.get(id).unwrap().unwrap();
    assert_eq!(stored.status(), ReservationStatus::Pending);
    assert_eq!(stored.range().nights(), 2);
    assert_eq!(stored.total_price(), Money::new(100_000));
}

#[test]
fn test_listing_pages_newest_first() {
    let db = common::create_test_database();
    let alice = UserId::new("alice").unwrap();
    for room in 0..5 {
        let mut new = new_reservation("alice", &format!("10{room}"), 10, 12);
        new.created_at = at(1, 9 + room, 0);
        db.create(&new).unwrap();
    }
    db.create(&new_reservation("bob", "201", 10, 12)).unwrap();

    let first = db
        .list_by_user(&alice, None, PageRequest::new(1, 2).unwrap())
        .unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages(), 3);
    assert_eq!(first.items[0].room_id().as_str(), "104");

    let last = db
        .list_by_user(&alice, None, PageRequest::new(3, 2).unwrap())
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].room_id().as_str(), "100");

    let cancelled = db
        .list_by_user(
            &alice,
            Some(ReservationStatus::Cancelled),
            PageRequest::new(1, 20).unwrap(),
        )
        .unwrap();
    assert_eq!(cancelled.total, 0);
}

#[test]
fn test_concurrent_bookings_single_winner() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("concurrent.db");
    Database::open(DatabaseConfig::new(&db_path)).unwrap();

    let threads = 6;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|index| {
            let path = db_path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let config = DatabaseConfig::new(&path).with_busy_timeout(Duration::from_secs(10));
                let db = Database::open(config).unwrap();
                barrier.wait();
                db.create(&new_reservation(&format!("guest{index}"), "101", 10, 12))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(result, Err(Error::RoomUnavailable { .. })));
    }
}
