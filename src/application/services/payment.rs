//! Booking-payment orchestrator
//!
//! Drives a payment through `Priced → Charging → Committing → Done`.
//! Pricing and charging are validated before any persisted state changes,
//! so a declined card never corrupts the ledger. The ledger commit is a
//! single atomic transaction; if it fails after the gateway captured the
//! charge, the unreconciled charge is logged and surfaced as an error.
//! There is no automatic refund.

use std::sync::Arc;

use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::error;

use crate::application::ports::{CardDetails, ChargeError, PaymentGateway};
use crate::domain::availability::{booking_hours, TimeRange};
use crate::domain::{
    BookingLedger, ChargerRepository, DomainError, DomainResult, Payment,
};

/// Service orchestrating pricing, charging and the ledger commit
pub struct PaymentService {
    chargers: Arc<dyn ChargerRepository>,
    ledger: Arc<dyn BookingLedger>,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(
        chargers: Arc<dyn ChargerRepository>,
        ledger: Arc<dyn BookingLedger>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            chargers,
            ledger,
            gateway,
        }
    }

    /// Amount owed for a range on a charger: hourly price × whole hours.
    /// Ordering of the range is not validated here.
    pub async fn booking_amount(
        &self,
        charger_id: &str,
        range: &TimeRange,
    ) -> DomainResult<Decimal> {
        let charger = self
            .chargers
            .find_by_id(charger_id)
            .await?
            .ok_or_else(|| DomainError::PriceUnavailable(charger_id.to_string()))?;
        Ok(charger.price_per_hour * Decimal::from(booking_hours(range)))
    }

    /// Pay for a previously reserved booking.
    ///
    /// All-or-nothing: on success exactly one unpaid record flips to paid,
    /// one occupied interval is appended, and one receipt is created.
    pub async fn pay(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
        card: &CardDetails,
        currency: &str,
    ) -> DomainResult<Payment> {
        // Priced
        let total_price = self.booking_amount(charger_id, &range).await?;
        let total_hours = booking_hours(&range);
        let amount_minor = to_minor_units(total_price)?;
        debug!(
            "Priced booking on charger {} for user {}: {} {} ({} h)",
            charger_id, user_id, total_price, currency, total_hours
        );

        // Charging: at most once, before any ledger mutation
        let receipt = self
            .gateway
            .charge(amount_minor, currency, card)
            .await
            .map_err(|e| match e {
                ChargeError::Declined(reason) => DomainError::PaymentDeclined(reason),
                ChargeError::Gateway(reason) => DomainError::Gateway(reason),
            })?;
        debug!(
            "Gateway captured charge {} for user {} on charger {}",
            receipt.charge_id, user_id, charger_id
        );

        // Committing: single atomic ledger transaction
        let payment = match self
            .ledger
            .commit_payment(user_id, charger_id, range, total_hours, total_price)
            .await
        {
            Ok(payment) => payment,
            Err(e) => {
                // Money has already moved; this charge now has no matching
                // ledger state and must be reconciled manually.
                error!(
                    user_id,
                    charger_id,
                    gateway_charge_id = %receipt.charge_id,
                    amount_minor,
                    currency,
                    start = %range.start,
                    end = %range.end,
                    "unreconciled charge: ledger commit failed after gateway capture: {}",
                    e
                );
                return Err(match e {
                    DomainError::CommitFailed(_) => e,
                    other => DomainError::CommitFailed(other.to_string()),
                });
            }
        };

        info!(
            "Payment {} committed for user {} on charger {} ({} {})",
            payment.id, user_id, charger_id, payment.total_price, currency
        );
        Ok(payment)
    }

    /// A user's payment receipts
    pub async fn payment_history(&self, user_id: &str) -> DomainResult<Vec<Payment>> {
        self.ledger.payments_for_user(user_id).await
    }
}

/// Convert a decimal amount to minor currency units (cents)
fn to_minor_units(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::from(100))
        .trunc()
        .to_i64()
        .ok_or_else(|| DomainError::Gateway(format!("amount out of range: {}", amount)))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{
        hours_from_now, FakeGateway, InMemoryStore,
    };
    use crate::application::services::BookingService;
    use crate::domain::{BookingStatus, UserRole};

    fn services(
        store: &Arc<InMemoryStore>,
        gateway: &Arc<FakeGateway>,
    ) -> (BookingService, PaymentService) {
        (
            BookingService::new(store.clone(), store.clone(), store.clone()),
            PaymentService::new(store.clone(), store.clone(), gateway.clone()),
        )
    }

    fn card() -> CardDetails {
        CardDetails {
            card_number: "4242424242424242".into(),
            cvc: "123".into(),
            exp_month: 12,
            exp_year: 2030,
        }
    }

    #[tokio::test]
    async fn booking_amount_is_hourly_price_times_whole_hours() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (_, payments) = services(&store, &gateway);

        // fixture charger costs 5 per hour
        let amount = payments
            .booking_amount("charger-1", &hours_from_now(2, 4))
            .await
            .unwrap();
        assert_eq!(amount, Decimal::from(10));
    }

    #[tokio::test]
    async fn booking_amount_fails_for_unknown_charger() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (_, payments) = services(&store, &gateway);

        let err = payments
            .booking_amount("missing", &hours_from_now(2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PriceUnavailable(_)));
    }

    #[tokio::test]
    async fn price_unavailable_aborts_before_gateway_call() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (_, payments) = services(&store, &gateway);

        let err = payments
            .pay("user-1", "missing", hours_from_now(2, 4), &card(), "eur")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PriceUnavailable(_)));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn declined_card_leaves_ledger_untouched() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::declining("insufficient funds");
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();

        let err = payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PaymentDeclined(_)));
        assert_eq!(gateway.calls(), 1);

        let records = store.bookings_for_user("user-1").await.unwrap();
        assert_eq!(records[0].status, BookingStatus::Unpaid);
        assert!(store.occupied_for_charger("charger-1").await.unwrap().is_empty());
        assert!(store.payments_for_user("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_payment_flips_status_and_occupies_interval() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();

        let payment = payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap();
        assert_eq!(payment.total_booking_hours, 2);
        assert_eq!(payment.total_price, Decimal::from(10));

        let records = store.bookings_for_user("user-1").await.unwrap();
        assert_eq!(records[0].status, BookingStatus::Paid);

        let occupied = store.occupied_for_charger("charger-1").await.unwrap();
        assert_eq!(occupied, vec![range]);

        // exactly one receipt, matching the booking tuple
        let receipts = store.payments_for_user("user-1").await.unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].range, range);
    }

    #[tokio::test]
    async fn paid_booking_has_exactly_one_matching_receipt() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();
        let payment = payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap();

        let receipt = store
            .find_payment("user-1", "charger-1", &range)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.id, payment.id);

        // no receipt for a tuple that was never paid
        assert!(store
            .find_payment("user-1", "charger-1", &hours_from_now(6, 8))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn payment_without_reservation_fails_and_creates_no_receipt() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (_, payments) = services(&store, &gateway);

        let err = payments
            .pay("user-1", "charger-1", hours_from_now(2, 4), &card(), "eur")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CommitFailed(_)));
        assert!(store.payments_for_user("user-1").await.unwrap().is_empty());
        assert!(store.occupied_for_charger("charger-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn paying_twice_fails_the_matching_precondition() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();
        payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap();

        let err = payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CommitFailed(_)));
        assert_eq!(store.payments_for_user("user-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn two_payments_keep_occupied_intervals_sorted() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (bookings, payments) = services(&store, &gateway);

        let later = hours_from_now(6, 8);
        let earlier = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", later).await.unwrap();
        bookings.reserve("user-1", "charger-1", earlier).await.unwrap();

        payments
            .pay("user-1", "charger-1", later, &card(), "eur")
            .await
            .unwrap();
        payments
            .pay("user-1", "charger-1", earlier, &card(), "eur")
            .await
            .unwrap();

        let occupied = store.occupied_for_charger("charger-1").await.unwrap();
        assert_eq!(occupied.len(), 2);
        assert!(occupied[0].start < occupied[1].start);

        let history = payments.payment_history("user-1").await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn booking_inside_paid_interval_is_unavailable() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::charging();
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();
        payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap();

        let err = bookings
            .reserve("user-1", "charger-1", hours_from_now(3, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unavailable));
        // no ledger mutation besides the original booking
        assert_eq!(store.bookings_for_user("user-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_error_maps_to_gateway_failure() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let gateway = FakeGateway::erroring("connection reset");
        let (bookings, payments) = services(&store, &gateway);

        let range = hours_from_now(2, 4);
        bookings.reserve("user-1", "charger-1", range).await.unwrap();

        let err = payments
            .pay("user-1", "charger-1", range, &card(), "eur")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Gateway(_)));
    }

    #[test]
    fn minor_units_truncate_sub_cent() {
        let amount = Decimal::new(1999, 2); // 19.99
        assert_eq!(to_minor_units(amount).unwrap(), 1999);
        let fractional = Decimal::new(12345, 3); // 12.345
        assert_eq!(to_minor_units(fractional).unwrap(), 1234);
    }
}
