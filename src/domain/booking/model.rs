//! Booking record entity

use chrono::{DateTime, Utc};

use crate::domain::availability::TimeRange;

/// Payment status of a booking record.
///
/// Created as `Unpaid` by a reservation; flipped to `Paid` only by a
/// successful payment commit; never transitions backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Unpaid,
    Paid,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            _ => Self::Unpaid,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's reservation of a charger for a time range
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub id: i32,
    pub user_id: String,
    pub charger_id: String,
    pub range: TimeRange,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn is_paid(&self) -> bool {
        self.status == BookingStatus::Paid
    }

    /// Whether this record matches the exact `(charger, start, end)` triple
    pub fn matches(&self, charger_id: &str, range: &TimeRange) -> bool {
        self.charger_id == charger_id && self.range == *range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record() -> BookingRecord {
        let start = Utc::now() + Duration::hours(2);
        BookingRecord {
            id: 1,
            user_id: "user-1".into(),
            charger_id: "charger-1".into(),
            range: TimeRange::new(start, start + Duration::hours(2)),
            status: BookingStatus::Unpaid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_roundtrip() {
        assert_eq!(BookingStatus::from_str("paid"), BookingStatus::Paid);
        assert_eq!(BookingStatus::from_str("unpaid"), BookingStatus::Unpaid);
        assert_eq!(BookingStatus::from_str("garbage"), BookingStatus::Unpaid);
    }

    #[test]
    fn matches_exact_triple_only() {
        let r = record();
        assert!(r.matches("charger-1", &r.range));
        assert!(!r.matches("charger-2", &r.range));
        let shifted = TimeRange::new(r.range.start + Duration::minutes(1), r.range.end);
        assert!(!r.matches("charger-1", &shifted));
    }
}
