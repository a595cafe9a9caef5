//! Booking ledger interface
//!
//! The ledger owns all persisted booking state: per-user booking records
//! and per-charger occupied intervals. It is exposed only through atomic
//! operations; callers never read-modify-write ledger rows directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::BookingRecord;
use crate::domain::availability::TimeRange;
use crate::domain::payment::Payment;
use crate::support::errors::DomainResult;

#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Reserve a time range on a charger for a user.
    ///
    /// The availability check and the insertion of the unpaid record are
    /// indivisible with respect to other reservations on the same charger;
    /// implementations must serialize check-then-insert per charger.
    /// Returns `Unavailable` on conflict. Occupied intervals are not
    /// touched here; they are populated only by `commit_payment`.
    async fn reserve(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> DomainResult<BookingRecord>;

    /// Atomically commit a paid booking.
    ///
    /// In a single storage transaction: flips the matching unpaid record
    /// for the exact `(charger, start, end)` triple to paid, appends the
    /// range to the charger's occupied intervals, and creates the Payment
    /// receipt. Fails with `CommitFailed` when no matching unpaid record
    /// exists or the transaction aborts; on failure nothing is applied.
    async fn commit_payment(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
        total_hours: i64,
        total_price: Decimal,
    ) -> DomainResult<Payment>;

    /// A user's booking records, ascending by start time
    async fn bookings_for_user(&self, user_id: &str) -> DomainResult<Vec<BookingRecord>>;

    /// A charger's occupied intervals, ascending by start time
    async fn occupied_for_charger(&self, charger_id: &str) -> DomainResult<Vec<TimeRange>>;

    /// A user's payment receipts, ascending by start time
    async fn payments_for_user(&self, user_id: &str) -> DomainResult<Vec<Payment>>;

    /// Find the receipt for an exact `(user, charger, start, end)` tuple
    async fn find_payment(
        &self,
        user_id: &str,
        charger_id: &str,
        range: &TimeRange,
    ) -> DomainResult<Option<Payment>>;
}
