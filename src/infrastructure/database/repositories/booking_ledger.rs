//! SeaORM implementation of the booking ledger
//!
//! `reserve` serializes check-then-insert per charger: a DashMap of
//! per-charger async mutexes makes the availability read and the booking
//! insert indivisible with respect to other reservations on the same
//! charger. `commit_payment` runs the three-way mutation (status flip,
//! occupied-interval insert, receipt creation) inside one database
//! transaction; the unique `(charger_id, start_time)` index backstops
//! racing commits that slipped past the application-level guard.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};
use tokio::sync::Mutex;

use super::charger_repository::db_err;
use crate::domain::availability::{OverlapRule, TimeRange};
use crate::domain::{
    BookingLedger, BookingRecord, BookingStatus, DomainError, DomainResult, Payment,
};
use crate::infrastructure::database::entities::{booking, occupied_interval, payment};

pub struct SeaOrmBookingLedger {
    db: DatabaseConnection,
    rule: OverlapRule,
    charger_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SeaOrmBookingLedger {
    pub fn new(db: DatabaseConnection, rule: OverlapRule) -> Self {
        Self {
            db,
            rule,
            charger_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, charger_id: &str) -> Arc<Mutex<()>> {
        self.charger_locks
            .entry(charger_id.to_string())
            .or_default()
            .clone()
    }

    async fn occupied_ranges(&self, charger_id: &str) -> DomainResult<Vec<TimeRange>> {
        let models = occupied_interval::Entity::find()
            .filter(occupied_interval::Column::ChargerId.eq(charger_id))
            .order_by_asc(occupied_interval::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| TimeRange::new(m.start_time, m.end_time))
            .collect())
    }
}

fn booking_to_domain(m: booking::Model) -> BookingRecord {
    BookingRecord {
        id: m.id,
        user_id: m.user_id,
        charger_id: m.charger_id,
        range: TimeRange::new(m.start_time, m.end_time),
        status: BookingStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn payment_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        user_id: m.user_id,
        charger_id: m.charger_id,
        range: TimeRange::new(m.start_time, m.end_time),
        total_booking_hours: m.total_booking_hours,
        total_price: m.total_price,
        created_at: m.created_at,
    }
}

#[async_trait]
impl BookingLedger for SeaOrmBookingLedger {
    async fn reserve(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> DomainResult<BookingRecord> {
        let lock = self.lock_for(charger_id);
        let _guard = lock.lock().await;

        let occupied = self.occupied_ranges(charger_id).await?;
        if !self.rule.check(&range, &occupied, now) {
            return Err(DomainError::Unavailable);
        }

        debug!(
            "Inserting unpaid booking for user {} on charger {}",
            user_id, charger_id
        );
        let model = booking::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_string()),
            charger_id: Set(charger_id.to_string()),
            start_time: Set(range.start),
            end_time: Set(range.end),
            status: Set(BookingStatus::Unpaid.as_str().to_string()),
            created_at: Set(now),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(booking_to_domain(inserted))
    }

    async fn commit_payment(
        &self,
        user_id: &str,
        charger_id: &str,
        range: TimeRange,
        total_hours: i64,
        total_price: Decimal,
    ) -> DomainResult<Payment> {
        debug!(
            "Committing payment for user {} on charger {} [{} .. {})",
            user_id, charger_id, range.start, range.end
        );

        // owned copies so the transaction future borrows nothing from the caller
        let user_id = user_id.to_string();
        let charger_id = charger_id.to_string();
        let result = self
            .db
            .transaction::<_, Payment, DomainError>(move |txn| {
                Box::pin(async move {
                    // matching unpaid record for the exact triple
                    let record = booking::Entity::find()
                        .filter(booking::Column::UserId.eq(user_id.as_str()))
                        .filter(booking::Column::ChargerId.eq(charger_id.as_str()))
                        .filter(booking::Column::StartTime.eq(range.start))
                        .filter(booking::Column::EndTime.eq(range.end))
                        .filter(booking::Column::Status.eq(BookingStatus::Unpaid.as_str()))
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            DomainError::CommitFailed(
                                "no matching unpaid reservation".to_string(),
                            )
                        })?;

                    let mut active: booking::ActiveModel = record.into();
                    active.status = Set(BookingStatus::Paid.as_str().to_string());
                    active.update(txn).await?;

                    occupied_interval::ActiveModel {
                        id: NotSet,
                        charger_id: Set(charger_id.clone()),
                        start_time: Set(range.start),
                        end_time: Set(range.end),
                    }
                    .insert(txn)
                    .await?;

                    let receipt =
                        Payment::new(&user_id, &charger_id, range, total_hours, total_price);
                    payment::ActiveModel {
                        id: Set(receipt.id.clone()),
                        user_id: Set(receipt.user_id.clone()),
                        charger_id: Set(receipt.charger_id.clone()),
                        start_time: Set(receipt.range.start),
                        end_time: Set(receipt.range.end),
                        total_booking_hours: Set(receipt.total_booking_hours),
                        total_price: Set(receipt.total_price),
                        created_at: Set(receipt.created_at),
                    }
                    .insert(txn)
                    .await?;

                    Ok(receipt)
                })
            })
            .await;

        result.map_err(|e| match e {
            TransactionError::Connection(db) => DomainError::CommitFailed(db.to_string()),
            TransactionError::Transaction(domain) => match domain {
                DomainError::CommitFailed(_) => domain,
                other => DomainError::CommitFailed(other.to_string()),
            },
        })
    }

    async fn bookings_for_user(&self, user_id: &str) -> DomainResult<Vec<BookingRecord>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_asc(booking::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(booking_to_domain).collect())
    }

    async fn occupied_for_charger(&self, charger_id: &str) -> DomainResult<Vec<TimeRange>> {
        self.occupied_ranges(charger_id).await
    }

    async fn payments_for_user(&self, user_id: &str) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .order_by_asc(payment::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(payment_to_domain).collect())
    }

    async fn find_payment(
        &self,
        user_id: &str,
        charger_id: &str,
        range: &TimeRange,
    ) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .filter(payment::Column::ChargerId.eq(charger_id))
            .filter(payment::Column::StartTime.eq(range.start))
            .filter(payment::Column::EndTime.eq(range.end))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(payment_to_domain))
    }
}
