//! Booking Repository
//!
//! 预订的读写都经过这里；状态转换的持久化是单条事务
//! (状态 + 账务字段 + 营收记录一起落盘，观察者看不到中间态)。

use chrono::NaiveDate;

use super::{BaseRepository, RepoError, RepoResult};
use crate::bookings::transition::TransitionOutcome;
use crate::db::models::{Booking, BookingCreate, BookingWithDetails, Sale};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "booking";

/// Projection used by the list/detail endpoints
const DETAIL_FIELDS: &str = "*, \
    room.room_number AS room_number, \
    <string>room.room_type AS room_type, \
    guest.name AS guest_name, \
    guest.email AS guest_email, \
    guest.phone AS guest_phone";

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all bookings with joined room/guest display fields
    pub async fn find_all_with_details(&self) -> RepoResult<Vec<BookingWithDetails>> {
        let bookings: Vec<BookingWithDetails> = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_FIELDS} FROM booking ORDER BY created_at DESC"
            ))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Find booking by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let booking: Option<Booking> = self.base.db().select(thing).await?;
        Ok(booking)
    }

    /// Find booking by id with joined room/guest display fields
    pub async fn find_by_id_with_details(
        &self,
        id: &str,
    ) -> RepoResult<Option<BookingWithDetails>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {DETAIL_FIELDS} FROM booking WHERE id = $id"
            ))
            .bind(("id", thing))
            .await?;
        let bookings: Vec<BookingWithDetails> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    /// Create a booking in `confirmed` status
    ///
    /// `total_amount` is computed by the caller (nights × room rate) —
    /// the room rate at booking time is frozen into the record.
    pub async fn create(&self, data: BookingCreate, total_amount: f64) -> RepoResult<Booking> {
        let booking = Booking {
            id: None,
            room: data.room,
            guest: data.guest,
            check_in: data.check_in,
            check_out: data.check_out,
            guests_count: data.guests_count,
            special_requests: data.special_requests,
            total_amount,
            advance_payment: data.advance_payment,
            status: crate::bookings::BookingStatus::Confirmed,
            notes: None,
            balance_due: None,
            created_at: shared::now_millis(),
        };

        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Active (`confirmed`/`checked_in`) bookings of a room that overlap
    /// the half-open window `[from, until)`
    pub async fn conflicts_for_room(
        &self,
        room: &RecordId,
        from: NaiveDate,
        until: NaiveDate,
    ) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE room = $room \
                 AND status IN ['confirmed', 'checked_in'] \
                 AND check_in < $window_end AND check_out > $window_start",
            )
            .bind(("room", room.clone()))
            .bind(("window_start", from))
            .bind(("window_end", until))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Room ids with an active booking overlapping `[from, until)`
    pub async fn occupied_room_ids(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> RepoResult<Vec<RecordId>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query(
                "SELECT VALUE room FROM booking \
                 WHERE status IN ['confirmed', 'checked_in'] \
                 AND check_in < $window_end AND check_out > $window_start",
            )
            .bind(("window_start", from))
            .bind(("window_end", until))
            .await?
            .take(0)?;
        Ok(ids)
    }

    /// Active bookings whose stay covers the given date
    /// (check_in <= date < check_out)
    pub async fn active_on(&self, date: NaiveDate) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE status IN ['confirmed', 'checked_in'] \
                 AND check_in <= $date AND check_out > $date",
            )
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Total number of bookings ever taken (history is never deleted)
    pub async fn count_all(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("RETURN count((SELECT VALUE id FROM booking))")
            .await?;
        let count: Option<i64> = result.take(0)?;
        Ok(count.unwrap_or(0))
    }

    /// Number of `checked_in` bookings covering the given date
    pub async fn count_occupied_on(&self, date: NaiveDate) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "RETURN count((SELECT VALUE id FROM booking \
                 WHERE status = 'checked_in' \
                 AND check_in <= $date AND check_out > $date))",
            )
            .bind(("date", date))
            .await?;
        let count: Option<i64> = result.take(0)?;
        Ok(count.unwrap_or(0))
    }

    /// Persist a validated transition atomically.
    ///
    /// Status and monetary fields change in one statement; the sale record
    /// of a check-out is created in the same transaction, so no observer
    /// sees a checked-out booking without its sale (or vice versa).
    pub async fn apply_transition(
        &self,
        id: &str,
        outcome: &TransitionOutcome,
        sale_date: NaiveDate,
    ) -> RepoResult<(Booking, Option<Sale>)> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut stmt = String::from(
            "BEGIN TRANSACTION; \
             UPDATE $booking SET status = $status, advance_payment = $advance",
        );
        if outcome.notes.is_some() {
            stmt.push_str(", notes = $notes");
        }
        if outcome.bill.is_some() {
            stmt.push_str(", balance_due = $balance_due");
        }
        stmt.push(';');
        if outcome.bill.is_some() {
            stmt.push_str(
                " CREATE sale CONTENT { \
                   booking: $booking, \
                   amount: $amount, \
                   payment_method: $payment_method, \
                   date: $sale_date, \
                   created_at: $now };",
            );
        }
        stmt.push_str(" COMMIT TRANSACTION;");

        let mut query = self
            .base
            .db()
            .query(stmt)
            .bind(("booking", thing.clone()))
            .bind(("status", outcome.status))
            .bind(("advance", outcome.advance_payment));

        if let Some(notes) = &outcome.notes {
            query = query.bind(("notes", notes.clone()));
        }
        if let Some(bill) = &outcome.bill {
            query = query
                .bind(("balance_due", bill.balance_due))
                .bind(("amount", bill.total_owed))
                .bind(("payment_method", bill.payment_method))
                .bind(("sale_date", sale_date))
                .bind(("now", shared::now_millis()));
        }

        query.await?;

        let booking = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))?;

        let sale = if outcome.bill.is_some() {
            let mut result = self
                .base
                .db()
                .query(
                    "SELECT * FROM sale WHERE booking = $booking \
                     ORDER BY created_at DESC LIMIT 1",
                )
                .bind(("booking", thing))
                .await?;
            let sales: Vec<Sale> = result.take(0)?;
            sales.into_iter().next()
        } else {
            None
        };

        Ok((booking, sale))
    }
}
