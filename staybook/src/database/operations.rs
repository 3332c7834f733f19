//! Reservation reads and writes.
//!
//! Every write runs inside a `BEGIN IMMEDIATE` transaction so that the
//! overlap check on create and the status guard on update see a stable
//! snapshot.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior};

use crate::collaborators::{
    Cancellation, Page, PageRequest, PaymentChange, PaymentCollaborator, RefundRequest,
    ReservationStore, StatusChange,
};
use crate::error::{Error, Result};
use crate::money::Money;
use crate::pricing::{OptionId, RoomId};
use crate::reservation::{
    ConfirmedOption, NewReservation, PaymentStatus, Reservation, ReservationId,
    ReservationStatus, UserId,
};
use crate::stay::DateRange;

use super::connection::Database;
use super::schema::RESERVATION_COLUMNS;

const DATE_FORMAT: &str = "%Y-%m-%d";

const COUNT_OVERLAPPING: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_id = ?1
      AND status IN ('PENDING', 'CONFIRMED')
      AND check_in < ?3
      AND check_out > ?2
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (user_id, room_id, check_in, check_out, total_price, status, payment_status,
     status_reason, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8, ?8)
";

const INSERT_OPTION: &str = r"
    INSERT INTO reservation_options (reservation_id, option_id, name, unit_price, quantity)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const SELECT_OPTIONS: &str = r"
    SELECT option_id, name, unit_price, quantity
    FROM reservation_options
    WHERE reservation_id = ?1
    ORDER BY option_id
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?1,
        payment_status = COALESCE(?2, payment_status),
        status_reason = COALESCE(?3, status_reason),
        updated_at = MAX(?4, created_at)
    WHERE id = ?5 AND status = ?6
";

const UPDATE_PAYMENT_STATUS: &str = r"
    UPDATE reservations
    SET payment_status = ?1,
        updated_at = MAX(?2, created_at)
    WHERE id = ?3 AND payment_status = ?4
";

const EXISTS: &str = "SELECT COUNT(*) FROM reservations WHERE id = ?1";

const COUNT_BY_USER: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2)
";

/// Formats a calendar date the way it is stored.
pub(super) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Converts a timestamp to Unix seconds for storage.
pub(super) fn timestamp_to_sql(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

/// Converts stored Unix seconds back to a timestamp.
pub(super) fn timestamp_from_sql(column: &str, secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| corrupt(column, format!("timestamp {secs} is out of range")))
}

fn corrupt(column: &str, message: impl Into<String>) -> Error {
    Error::Validation {
        field: format!("reservations.{column}"),
        message: message.into(),
    }
}

fn parse_date(column: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| corrupt(column, format!("'{value}' is not a date: {e}")))
}

/// A reservation row before its values are checked.
struct ReservationRow {
    id: i64,
    user_id: String,
    room_id: String,
    check_in: String,
    check_out: String,
    total_price: i64,
    status: String,
    payment_status: String,
    status_reason: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ReservationRow {
    /// Reads the columns listed in [`RESERVATION_COLUMNS`], in order.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            room_id: row.get(2)?,
            check_in: row.get(3)?,
            check_out: row.get(4)?,
            total_price: row.get(5)?,
            status: row.get(6)?,
            payment_status: row.get(7)?,
            status_reason: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_reservation(self, options: Vec<ConfirmedOption>) -> Result<Reservation> {
        let range = DateRange::new(
            parse_date("check_in", &self.check_in)?,
            parse_date("check_out", &self.check_out)?,
        )?;
        let total_price = Money::from_sql(self.total_price)
            .ok_or_else(|| corrupt("total_price", "negative amount"))?;
        let status: ReservationStatus = self.status.parse()?;
        let payment_status: PaymentStatus = self.payment_status.parse()?;

        let reservation = Reservation::builder(
            ReservationId::new(self.id),
            UserId::new(self.user_id)?,
            RoomId::new(self.room_id),
            range,
            total_price,
            timestamp_from_sql("created_at", self.created_at)?,
        )
        .options(options)
        .status(status)
        .payment_status(payment_status)
        .status_reason(self.status_reason)
        .updated_at(timestamp_from_sql("updated_at", self.updated_at)?)
        .build()?;
        Ok(reservation)
    }
}

fn load_options(conn: &Connection, id: i64) -> Result<Vec<ConfirmedOption>> {
    let mut stmt = conn.prepare_cached(SELECT_OPTIONS)?;
    let rows = stmt.query_map([id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut options = Vec::new();
    for row in rows {
        let (option_id, name, unit_price, quantity) = row?;
        options.push(ConfirmedOption {
            option_id: OptionId::new(option_id),
            name,
            unit_price: Money::from_sql(unit_price)
                .ok_or_else(|| corrupt("unit_price", "negative amount"))?,
            quantity: u32::try_from(quantity)
                .map_err(|_| corrupt("quantity", format!("{quantity} is out of range")))?,
        });
    }
    Ok(options)
}

fn query_reservations(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, ReservationRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|row| {
            let options = load_options(conn, row.id)?;
            row.into_reservation(options)
        })
        .collect()
}

fn fetch(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
    let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
    let row = conn
        .query_row(&sql, [id.value()], ReservationRow::from_row)
        .optional()?;
    match row {
        Some(row) => {
            let options = load_options(conn, row.id)?;
            row.into_reservation(options).map(Some)
        }
        None => Ok(None),
    }
}

/// Explains why a guarded update touched no row.
fn guard_failure(conn: &Connection, id: ReservationId, details: String) -> Error {
    match conn.query_row(EXISTS, [id.value()], |row| row.get::<_, i64>(0)) {
        Ok(0) => not_found(id),
        Ok(_) => Error::ReservationConflict { details },
        Err(e) => e.into(),
    }
}

fn not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}

/// Writes a guarded status change inside an open transaction.
fn apply_status(tx: &Transaction<'_>, id: ReservationId, change: &StatusChange) -> Result<()> {
    let changed = tx.execute(
        UPDATE_STATUS,
        params![
            change.to.as_str(),
            change.payment_status.map(PaymentStatus::as_str),
            change.reason.as_deref(),
            timestamp_to_sql(change.changed_at),
            id.value(),
            change.from.as_str(),
        ],
    )?;
    if changed == 0 {
        return Err(guard_failure(
            tx,
            id,
            format!("reservation {id} is no longer {}", change.from),
        ));
    }
    Ok(())
}

impl Database {
    /// Starts a write transaction, mapping lock contention to
    /// [`Error::LockTimeout`].
    pub(super) fn begin_immediate(&self) -> Result<Transaction<'_>> {
        Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate).map_err(|e| {
            match e {
                rusqlite::Error::SqliteFailure(ref failure, _)
                    if failure.code == ErrorCode::DatabaseBusy =>
                {
                    Error::LockTimeout {
                        seconds: self.config().busy_timeout.as_secs(),
                    }
                }
                other => other.into(),
            }
        })
    }

    /// Fetches a reservation, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn require(&self, id: ReservationId) -> Result<Reservation> {
        fetch(&self.conn, id)?.ok_or_else(|| not_found(id))
    }
}

impl ReservationStore for Database {
    fn create(&self, new: &NewReservation) -> Result<Reservation> {
        let tx = self.begin_immediate()?;

        let check_in = date_to_sql(new.range.check_in());
        let check_out = date_to_sql(new.range.check_out());
        let overlapping: i64 = tx.query_row(
            COUNT_OVERLAPPING,
            params![new.room_id.as_str(), check_in, check_out],
            |row| row.get(0),
        )?;
        if overlapping > 0 {
            return Err(Error::RoomUnavailable {
                room_id: new.room_id.to_string(),
                reason: format!("{overlapping} active reservation(s) overlap {}", new.range),
            });
        }

        tx.execute(
            INSERT_RESERVATION,
            params![
                new.user_id.as_str(),
                new.room_id.as_str(),
                check_in,
                check_out,
                new.total_price.to_sql()?,
                ReservationStatus::Pending.as_str(),
                PaymentStatus::Pending.as_str(),
                timestamp_to_sql(new.created_at),
            ],
        )?;
        let id = tx.last_insert_rowid();

        for option in new.options.iter().filter(|o| o.quantity > 0) {
            tx.execute(
                INSERT_OPTION,
                params![
                    id,
                    option.option_id.as_str(),
                    option.name,
                    option.unit_price.to_sql()?,
                    i64::from(option.quantity),
                ],
            )?;
        }

        let stored = fetch(&tx, ReservationId::new(id))?;
        tx.commit()?;
        log::debug!("created reservation {id} for room {}", new.room_id);

        stored.ok_or_else(|| not_found(ReservationId::new(id)))
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        fetch(&self.conn, id)
    }

    fn update_status(&self, id: ReservationId, change: &StatusChange) -> Result<Reservation> {
        let tx = self.begin_immediate()?;
        apply_status(&tx, id, change)?;

        let updated = fetch(&tx, id)?.ok_or_else(|| not_found(id))?;
        tx.commit()?;
        log::debug!("reservation {id}: {} -> {}", change.from, change.to);
        Ok(updated)
    }

    fn update_payment_status(
        &self,
        id: ReservationId,
        change: &PaymentChange,
        then: Option<StatusChange>,
    ) -> Result<Reservation> {
        let tx = self.begin_immediate()?;

        let changed = tx.execute(
            UPDATE_PAYMENT_STATUS,
            params![
                change.to.as_str(),
                timestamp_to_sql(change.changed_at),
                id.value(),
                change.from.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(guard_failure(
                &tx,
                id,
                format!("payment for reservation {id} is no longer {}", change.from),
            ));
        }
        if let Some(status) = &then {
            apply_status(&tx, id, status)?;
        }

        let updated = fetch(&tx, id)?.ok_or_else(|| not_found(id))?;
        tx.commit()?;
        log::debug!("reservation {id}: payment {} -> {}", change.from, change.to);
        if let Some(status) = then {
            log::debug!("reservation {id}: {} -> {}", status.from, status.to);
        }
        Ok(updated)
    }

    fn cancel(
        &self,
        id: ReservationId,
        change: &StatusChange,
        refund: Option<RefundRequest>,
        payments: &dyn PaymentCollaborator,
    ) -> Result<Cancellation> {
        let tx = self.begin_immediate()?;
        apply_status(&tx, id, change)?;

        // Dropping the transaction on a refused refund rolls the status back.
        let refund = refund
            .map(|request| payments.request_refund(&request))
            .transpose()?;

        let reservation = fetch(&tx, id)?.ok_or_else(|| not_found(id))?;
        tx.commit()?;
        log::debug!(
            "reservation {id}: {} -> {} (refund {})",
            change.from,
            change.to,
            refund.as_ref().map_or(Money::ZERO, |t| t.amount)
        );
        Ok(Cancellation {
            reservation,
            refund,
        })
    }

    fn list_by_user(
        &self,
        user: &UserId,
        status: Option<ReservationStatus>,
        page: PageRequest,
    ) -> Result<Page<Reservation>> {
        let status = status.map(ReservationStatus::as_str);
        let total: i64 =
            self.conn
                .query_row(COUNT_BY_USER, params![user.as_str(), status], |row| row.get(0))?;

        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?3 OFFSET ?4"
        );
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let items = query_reservations(
            &self.conn,
            &sql,
            params![user.as_str(), status, i64::from(page.size()), offset],
        )?;

        Ok(Page {
            items,
            number: page.number(),
            size: page.size(),
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    fn list_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE status = ?1 ORDER BY check_in, id"
        );
        query_reservations(&self.conn, &sql, [status.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MockPaymentCollaborator;
    use crate::database::test_util::{
        create_test_database, d, new_reservation, new_reservation_with_option, ts,
    };

    #[test]
    fn test_create_and_get() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        assert_eq!(created.status(), ReservationStatus::Pending);
        assert_eq!(created.payment_status(), PaymentStatus::Pending);

        let fetched = db.get(created.id()).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.range().nights(), 2);
        assert_eq!(fetched.total_price(), Money::new(200_000));
    }

    #[test]
    fn test_get_unknown_is_none() {
        let db = create_test_database();
        assert!(db.get(ReservationId::new(42)).unwrap().is_none());
        assert!(matches!(
            db.require(ReservationId::new(42)),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_options_locked_at_booking_price() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation_with_option(
                "alice", "101", d(10), d(12), "breakfast", 15_000, 2,
            ))
            .unwrap();

        let fetched = db.require(created.id()).unwrap();
        assert_eq!(fetched.options().len(), 1);
        let option = &fetched.options()[0];
        assert_eq!(option.option_id.as_str(), "breakfast");
        assert_eq!(option.unit_price, Money::new(15_000));
        assert_eq!(option.quantity, 2);
    }

    #[test]
    fn test_overlap_rejected() {
        let db = create_test_database();
        db.create(&new_reservation("alice", "101", d(10), d(13), 300_000))
            .unwrap();

        let err = db
            .create(&new_reservation("bob", "101", d(12), d(14), 200_000))
            .unwrap_err();
        assert!(matches!(err, Error::RoomUnavailable { .. }));
    }

    #[test]
    fn test_back_to_back_and_other_rooms_allowed() {
        let db = create_test_database();
        db.create(&new_reservation("alice", "101", d(10), d(13), 300_000))
            .unwrap();

        db.create(&new_reservation("bob", "101", d(13), d(14), 100_000))
            .unwrap();
        db.create(&new_reservation("carol", "102", d(10), d(13), 300_000))
            .unwrap();
    }

    #[test]
    fn test_cancelled_reservation_frees_room() {
        let db = create_test_database();
        let first = db
            .create(&new_reservation("alice", "101", d(10), d(13), 300_000))
            .unwrap();
        db.update_status(
            first.id(),
            &StatusChange {
                from: ReservationStatus::Pending,
                to: ReservationStatus::Cancelled,
                payment_status: Some(PaymentStatus::Cancelled),
                reason: None,
                changed_at: ts(2, 9),
            },
        )
        .unwrap();

        db.create(&new_reservation("bob", "101", d(11), d(12), 100_000))
            .unwrap();
    }

    #[test]
    fn test_update_status_guarded() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        let confirm = StatusChange {
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
            payment_status: None,
            reason: None,
            changed_at: ts(2, 9),
        };
        let confirmed = db.update_status(created.id(), &confirm).unwrap();
        assert_eq!(confirmed.status(), ReservationStatus::Confirmed);
        assert_eq!(confirmed.updated_at(), ts(2, 9));

        let err = db.update_status(created.id(), &confirm).unwrap_err();
        assert!(matches!(err, Error::ReservationConflict { .. }));

        let err = db
            .update_status(ReservationId::new(99), &confirm)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_reject_records_reason() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        let rejected = db
            .update_status(
                created.id(),
                &StatusChange {
                    from: ReservationStatus::Pending,
                    to: ReservationStatus::Rejected,
                    payment_status: None,
                    reason: Some("room under maintenance".to_string()),
                    changed_at: ts(2, 9),
                },
            )
            .unwrap();
        assert_eq!(rejected.status_reason(), Some("room under maintenance"));
    }

    #[test]
    fn test_update_payment_status_guarded() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        let paid = PaymentChange {
            from: PaymentStatus::Pending,
            to: PaymentStatus::Completed,
            changed_at: ts(2, 9),
        };
        let updated = db.update_payment_status(created.id(), &paid, None).unwrap();
        assert_eq!(updated.payment_status(), PaymentStatus::Completed);
        assert_eq!(updated.status(), ReservationStatus::Pending);

        assert!(matches!(
            db.update_payment_status(created.id(), &paid, None),
            Err(Error::ReservationConflict { .. })
        ));
    }

    #[test]
    fn test_payment_and_confirm_commit_together() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();
        let paid = PaymentChange {
            from: PaymentStatus::Pending,
            to: PaymentStatus::Completed,
            changed_at: ts(2, 9),
        };
        let confirm = StatusChange {
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
            payment_status: None,
            reason: None,
            changed_at: ts(2, 9),
        };

        let updated = db
            .update_payment_status(created.id(), &paid, Some(confirm.clone()))
            .unwrap();
        assert_eq!(updated.payment_status(), PaymentStatus::Completed);
        assert_eq!(updated.status(), ReservationStatus::Confirmed);

        // Confirm guard fails: the payment write is rolled back too.
        let other = db
            .create(&new_reservation("bob", "102", d(10), d(12), 200_000))
            .unwrap();
        db.update_status(other.id(), &confirm).unwrap();
        let err = db
            .update_payment_status(other.id(), &paid, Some(confirm))
            .unwrap_err();
        assert!(matches!(err, Error::ReservationConflict { .. }));
        assert_eq!(
            db.require(other.id()).unwrap().payment_status(),
            PaymentStatus::Pending
        );
    }

    fn cancel_change() -> StatusChange {
        StatusChange {
            from: ReservationStatus::Pending,
            to: ReservationStatus::Cancelled,
            payment_status: Some(PaymentStatus::Cancelled),
            reason: None,
            changed_at: ts(5, 9),
        }
    }

    fn refund_of(id: ReservationId, amount: u64) -> RefundRequest {
        RefundRequest {
            reservation_id: id,
            amount: Money::new(amount),
            requested_at: ts(5, 9),
        }
    }

    #[test]
    fn test_cancel_records_refund_with_status() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        let cancellation = db
            .cancel(
                created.id(),
                &cancel_change(),
                Some(refund_of(created.id(), 200_000)),
                &db,
            )
            .unwrap();
        assert_eq!(cancellation.reservation.status(), ReservationStatus::Cancelled);
        let ticket = cancellation.refund.unwrap();
        assert_eq!(db.refunds_for(created.id()).unwrap(), vec![ticket]);
    }

    #[test]
    fn test_cancel_guard_checked_before_refund() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();
        db.cancel(
            created.id(),
            &cancel_change(),
            Some(refund_of(created.id(), 200_000)),
            &db,
        )
        .unwrap();

        let mut payments = MockPaymentCollaborator::new();
        payments.expect_request_refund().times(0);
        let err = db
            .cancel(
                created.id(),
                &cancel_change(),
                Some(refund_of(created.id(), 200_000)),
                &payments,
            )
            .unwrap_err();
        assert!(matches!(err, Error::ReservationConflict { .. }));
        assert_eq!(db.refunds_for(created.id()).unwrap().len(), 1);

        let err = db
            .cancel(ReservationId::new(99), &cancel_change(), None, &payments)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_cancel_rolled_back_when_refund_refused() {
        let db = create_test_database();
        let created = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();

        let mut payments = MockPaymentCollaborator::new();
        payments
            .expect_request_refund()
            .times(1)
            .returning(|_| Err(Error::upstream("payment", "declined")));
        let err = db
            .cancel(
                created.id(),
                &cancel_change(),
                Some(refund_of(created.id(), 200_000)),
                &payments,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamFailure { .. }));

        let stored = db.require(created.id()).unwrap();
        assert_eq!(stored.status(), ReservationStatus::Pending);
        assert_eq!(stored.payment_status(), PaymentStatus::Pending);

        // The connection is usable again once the rollback has happened.
        db.update_status(
            created.id(),
            &StatusChange {
                from: ReservationStatus::Pending,
                to: ReservationStatus::Confirmed,
                payment_status: None,
                reason: None,
                changed_at: ts(5, 10),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_list_by_user_pages_newest_first() {
        let db = create_test_database();
        for (i, day) in [10u32, 14, 18].into_iter().enumerate() {
            let mut new = new_reservation("alice", "101", d(day), d(day + 2), 200_000);
            new.created_at = ts(1, 8 + u32::try_from(i).unwrap());
            db.create(&new).unwrap();
        }
        db.create(&new_reservation("bob", "102", d(10), d(12), 200_000))
            .unwrap();

        let alice = UserId::new("alice").unwrap();
        let first = db
            .list_by_user(&alice, None, PageRequest::new(1, 2).unwrap())
            .unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(first.total_pages(), 2);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].range().check_in(), d(18));

        let second = db
            .list_by_user(&alice, None, PageRequest::new(2, 2).unwrap())
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].range().check_in(), d(10));
    }

    #[test]
    fn test_list_by_user_status_filter() {
        let db = create_test_database();
        let first = db
            .create(&new_reservation("alice", "101", d(10), d(12), 200_000))
            .unwrap();
        db.create(&new_reservation("alice", "101", d(20), d(22), 200_000))
            .unwrap();
        db.update_status(
            first.id(),
            &StatusChange {
                from: ReservationStatus::Pending,
                to: ReservationStatus::Confirmed,
                payment_status: None,
                reason: None,
                changed_at: ts(2, 9),
            },
        )
        .unwrap();

        let alice = UserId::new("alice").unwrap();
        let confirmed = db
            .list_by_user(
                &alice,
                Some(ReservationStatus::Confirmed),
                PageRequest::new(1, 20).unwrap(),
            )
            .unwrap();
        assert_eq!(confirmed.total, 1);
        assert_eq!(confirmed.items[0].id(), first.id());
    }

    #[test]
    fn test_list_by_status_ordered_by_check_in() {
        let db = create_test_database();
        db.create(&new_reservation("alice", "101", d(20), d(22), 200_000))
            .unwrap();
        db.create(&new_reservation("bob", "102", d(10), d(12), 200_000))
            .unwrap();

        let pending = db.list_by_status(ReservationStatus::Pending).unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].range().check_in(), d(10));
        assert!(db
            .list_by_status(ReservationStatus::Confirmed)
            .unwrap()
            .is_empty());
    }
}
