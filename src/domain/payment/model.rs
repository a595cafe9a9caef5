//! Payment receipt entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::availability::TimeRange;

/// Immutable receipt proving a booking was paid.
///
/// Created only by a successful payment commit; never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    /// Unique payment ID
    pub id: String,
    pub user_id: String,
    pub charger_id: String,
    pub range: TimeRange,
    /// Whole hours booked, derived at commit time
    pub total_booking_hours: i64,
    /// Total charged amount, derived at commit time
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        user_id: impl Into<String>,
        charger_id: impl Into<String>,
        range: TimeRange,
        total_booking_hours: i64,
        total_price: Decimal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            charger_id: charger_id.into(),
            range,
            total_booking_hours,
            total_price,
            created_at: Utc::now(),
        }
    }
}
