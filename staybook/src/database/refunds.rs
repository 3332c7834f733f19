//! Local refund ledger.
//!
//! Stands in for the payment side: an accepted refund is a row in the
//! `refunds` table.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::collaborators::{PaymentCollaborator, RefundRequest, RefundTicket};
use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::ReservationId;

use super::connection::Database;
use super::operations::{timestamp_from_sql, timestamp_to_sql};

const INSERT_REFUND: &str =
    "INSERT INTO refunds (reservation_id, amount, requested_at) VALUES (?1, ?2, ?3)";

const SELECT_REFUNDS: &str = r"
    SELECT id, amount, requested_at FROM refunds
    WHERE reservation_id = ?1
    ORDER BY id
";

const RESERVATION_EXISTS: &str = "SELECT COUNT(*) FROM reservations WHERE id = ?1";

/// Inserts a refund row on `conn`, which may be inside a transaction.
fn record_refund(conn: &Connection, request: &RefundRequest) -> Result<RefundTicket> {
    let exists: i64 = conn.query_row(
        RESERVATION_EXISTS,
        [request.reservation_id.value()],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(Error::NotFound {
            resource: format!("reservation {}", request.reservation_id),
        });
    }

    conn.execute(
        INSERT_REFUND,
        params![
            request.reservation_id.value(),
            request.amount.to_sql()?,
            timestamp_to_sql(request.requested_at),
        ],
    )?;

    Ok(RefundTicket {
        ticket_id: conn.last_insert_rowid(),
        reservation_id: request.reservation_id,
        amount: request.amount,
        requested_at: request.requested_at,
    })
}

impl PaymentCollaborator for Database {
    /// Records the refund.
    ///
    /// Called during [`ReservationStore::cancel`](crate::collaborators::ReservationStore::cancel)
    /// on the same database, the row joins the open cancellation transaction
    /// and is rolled back with it.
    fn request_refund(&self, request: &RefundRequest) -> Result<RefundTicket> {
        let ticket = if self.conn.is_autocommit() {
            let tx = self.begin_immediate()?;
            let ticket = record_refund(&tx, request)?;
            tx.commit()?;
            ticket
        } else {
            record_refund(&self.conn, request)?
        };

        log::debug!(
            "refund {} of {} recorded for reservation {}",
            ticket.ticket_id,
            request.amount,
            request.reservation_id
        );
        Ok(ticket)
    }

    fn refunds_for(&self, reservation_id: ReservationId) -> Result<Vec<RefundTicket>> {
        let mut stmt = self.conn.prepare(SELECT_REFUNDS)?;
        let rows = stmt
            .query_map([reservation_id.value()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(ticket_id, amount, requested_at)| {
                let amount = Money::from_sql(amount).ok_or_else(|| Error::Validation {
                    field: "refunds.amount".into(),
                    message: "negative amount".into(),
                })?;
                let requested_at: NaiveDateTime =
                    timestamp_from_sql("requested_at", requested_at)?;
                Ok(RefundTicket {
                    ticket_id,
                    reservation_id,
                    amount,
                    requested_at,
                })
            })
            .collect()
    }
}
