//! Reservation use case

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::domain::availability::{validate_interval, TimeRange};
use crate::domain::{
    BookingLedger, BookingRecord, Charger, ChargerRepository, DomainError, DomainResult, User,
    UserRepository,
};

/// Service for creating and reading reservations
pub struct BookingService {
    chargers: Arc<dyn ChargerRepository>,
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn BookingLedger>,
}

impl BookingService {
    pub fn new(
        chargers: Arc<dyn ChargerRepository>,
        users: Arc<dyn UserRepository>,
        ledger: Arc<dyn BookingLedger>,
    ) -> Self {
        Self {
            chargers,
            users,
            ledger,
        }
    }

    /// Reserve a time range on a charger for a user.
    ///
    /// Validation runs before any persisted mutation. The ledger performs
    /// the availability check and the insert as one indivisible step, so
    /// two racing reservations on the same charger cannot both pass.
    pub async fn reserve(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
    ) -> DomainResult<BookingRecord> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;
        if !user.can_book() {
            return Err(DomainError::Forbidden(
                "Providers cannot book chargers".to_string(),
            ));
        }

        let charger =
            self.chargers
                .find_by_id(charger_id)
                .await?
                .ok_or(DomainError::NotFound {
                    entity: "Charger",
                    field: "id",
                    value: charger_id.to_string(),
                })?;

        let now = Utc::now();
        validate_interval(&range, now)
            .map_err(|reason| DomainError::InvalidInterval(reason.to_string()))?;

        debug!(
            "Reserving charger {} for user {} [{} .. {})",
            charger.id, user.id, range.start, range.end
        );
        let record = self.ledger.reserve(user_id, charger_id, range, now).await?;
        info!(
            "Charger {} reserved by user {} (booking {})",
            charger_id, user_id, record.id
        );
        Ok(record)
    }

    /// A user's booking records with the referenced chargers embedded,
    /// ascending by start time
    pub async fn bookings_with_chargers(
        &self,
        user_id: &str,
    ) -> DomainResult<Vec<(BookingRecord, Option<Charger>)>> {
        let records = self.ledger.bookings_for_user(user_id).await?;
        let mut detailed = Vec::with_capacity(records.len());
        for record in records {
            let charger = self.chargers.find_by_id(&record.charger_id).await?;
            detailed.push((record, charger));
        }
        Ok(detailed)
    }

    /// Charger detail with its occupied intervals, ascending by start time
    pub async fn charger_detail(
        &self,
        charger_id: &str,
    ) -> DomainResult<(Charger, Vec<TimeRange>)> {
        let charger =
            self.chargers
                .find_by_id(charger_id)
                .await?
                .ok_or(DomainError::NotFound {
                    entity: "Charger",
                    field: "id",
                    value: charger_id.to_string(),
                })?;
        let occupied = self.ledger.occupied_for_charger(charger_id).await?;
        Ok((charger, occupied))
    }

    /// The authenticated principal's account view
    pub async fn user_detail(&self, user_id: &str) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::{hours_from_now, InMemoryStore};
    use crate::domain::UserRole;

    fn service(store: &Arc<InMemoryStore>) -> BookingService {
        BookingService::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn reserve_creates_unpaid_record() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let svc = service(&store);

        let range = hours_from_now(2, 4);
        let record = svc.reserve("user-1", "charger-1", range).await.unwrap();

        assert_eq!(record.status.as_str(), "unpaid");
        assert_eq!(record.charger_id, "charger-1");
        // occupied intervals are only populated at payment time
        assert!(store.occupied_for_charger("charger-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reserve_rejects_provider_caller() {
        let store = InMemoryStore::with_fixture(UserRole::Provider);
        let svc = service(&store);

        let err = svc
            .reserve("user-1", "charger-1", hours_from_now(2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn reserve_rejects_unknown_charger() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let svc = service(&store);

        let err = svc
            .reserve("user-1", "no-such-charger", hours_from_now(2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Charger", .. }));
    }

    #[tokio::test]
    async fn reserve_rejects_inverted_interval() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let svc = service(&store);

        let err = svc
            .reserve("user-1", "charger-1", hours_from_now(4, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInterval(_)));
    }

    #[tokio::test]
    async fn reserve_rejects_past_start() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let svc = service(&store);

        let err = svc
            .reserve("user-1", "charger-1", hours_from_now(-1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInterval(_)));
    }

    #[tokio::test]
    async fn bookings_are_sorted_ascending_by_start() {
        let store = InMemoryStore::with_fixture(UserRole::User);
        let svc = service(&store);

        svc.reserve("user-1", "charger-1", hours_from_now(6, 7))
            .await
            .unwrap();
        svc.reserve("user-1", "charger-1", hours_from_now(2, 4))
            .await
            .unwrap();

        let detailed = svc.bookings_with_chargers("user-1").await.unwrap();
        assert_eq!(detailed.len(), 2);
        assert!(detailed[0].0.range.start < detailed[1].0.range.start);
        assert!(detailed.iter().all(|(_, c)| c.is_some()));
    }
}
