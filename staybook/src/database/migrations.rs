//! Schema initialization and version checks.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_REFUNDS_TABLE, CREATE_RESERVATIONS_TABLE,
    CREATE_RESERVATION_OPTIONS_TABLE, CREATE_ROOM_DATES_INDEX, CREATE_STATUS_INDEX,
    CREATE_USER_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

const METADATA_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'";

/// Creates every table and index and records the schema version.
///
/// # Errors
///
/// Returns an error if any statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use staybook::database::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        &[
            CREATE_METADATA_TABLE,
            CREATE_RESERVATIONS_TABLE,
            CREATE_RESERVATION_OPTIONS_TABLE,
            CREATE_REFUNDS_TABLE,
            CREATE_ROOM_DATES_INDEX,
            CREATE_USER_INDEX,
            CREATE_STATUS_INDEX,
        ]
        .join(";\n"),
    )?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    log::debug!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Reads the schema version, or 0 for an uninitialized database.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the stored version
/// is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let tables: i64 = conn.query_row(METADATA_TABLE_EXISTS, [], |row| row.get(0))?;
    if tables == 0 {
        return Ok(0);
    }

    let stored: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;
    match stored {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::Validation {
            field: "schema_version".into(),
            message: format!("stored schema version '{value}' is not a number"),
        }),
    }
}

/// Initializes a fresh database, or checks that an existing one matches
/// this build.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the stored version is
/// older or newer than [`CURRENT_SCHEMA_VERSION`](super::schema::CURRENT_SCHEMA_VERSION).
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => initialize_schema(conn),
        version if version == CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_connection() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_uninitialized_version_is_zero() {
        let conn = create_test_connection();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_initialize_creates_tables() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        for table in ["reservations", "reservation_options", "refunds"] {
            let count: i64 = conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .unwrap();
            assert_eq!(count, 0, "{table} should start empty");
        }
    }

    #[test]
    fn test_all_indices_created() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();

        let index_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_reservations_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 3);
    }

    #[test]
    fn test_compatibility_initializes_fresh_database() {
        let conn = create_test_connection();
        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        let err = check_schema_compatibility(&conn).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedSchemaVersion { found: 999, .. }
        ));
    }

    #[test]
    fn test_garbage_version_rejected() {
        let conn = create_test_connection();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = 'one' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        assert!(matches!(
            get_schema_version(&conn),
            Err(Error::Validation { .. })
        ));
    }
}
