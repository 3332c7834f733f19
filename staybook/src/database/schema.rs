//! Table definitions and shared SQL.

/// Schema version written to the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value metadata, holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// One row per reservation. Dates are ISO `YYYY-MM-DD` text so that range
/// comparisons work on the raw column; timestamps are Unix seconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        room_id TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        total_price INTEGER NOT NULL CHECK (total_price >= 0),
        status TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        status_reason TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (check_out > check_in)
    )";

/// Options locked into a reservation at their booked price.
pub const CREATE_RESERVATION_OPTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservation_options (
        reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
        option_id TEXT NOT NULL,
        name TEXT NOT NULL,
        unit_price INTEGER NOT NULL CHECK (unit_price >= 0),
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        PRIMARY KEY (reservation_id, option_id)
    )";

/// Refund ledger used by the local payment collaborator.
pub const CREATE_REFUNDS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS refunds (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL REFERENCES reservations(id),
        amount INTEGER NOT NULL CHECK (amount >= 0),
        requested_at INTEGER NOT NULL
    )";

/// Speeds up the overlap check on create.
pub const CREATE_ROOM_DATES_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_room_dates \
     ON reservations(room_id, check_in, check_out)";

/// Speeds up per-guest listings.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id, created_at)";

/// Speeds up per-status listings and the settlement sweep.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status, check_in)";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query, in `row_to_reservation` order.
pub const RESERVATION_COLUMNS: &str = "id, user_id, room_id, check_in, check_out, total_price, \
     status, payment_status, status_reason, created_at, updated_at";
